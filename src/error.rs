use thiserror::Error;

/// Error types for token exchange operations
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("token endpoint returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("failed to decode token response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("blocking wait interrupted before completion")]
    Interrupted,

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[cfg(feature = "blocking")]
    #[error("failed to start blocking runtime: {0}")]
    Runtime(String),

    #[cfg(feature = "browser")]
    #[error("failed to open browser: {0}")]
    BrowserLaunch(String),
}

/// Result type alias for token exchange operations
pub type Result<T> = std::result::Result<T, AuthError>;
