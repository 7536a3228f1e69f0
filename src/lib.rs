//! # rtc-auth
//!
//! OAuth 2.0 token exchange and codec license activation for a calling/RTC
//! SDK.
//!
//! Two independent components:
//!
//! - [`TokenClient`] — stateless OAuth 2.0 authorization-code and
//!   refresh-token exchange, with both asynchronous and blocking APIs.
//! - [`ActivationGate`] — a one-time consent gate consulted before enabling
//!   the licensed H.264 path, backed by injected storage/metrics/prompt
//!   collaborators.
//!
//! ## Features
//!
//! - **Async API** (default): async token exchange over reqwest
//! - **Blocking API** (optional): blocking wrappers derived from the async
//!   client, no duplicated request logic
//! - **Browser** (default): open the license text in the system browser
//!
//! ## Token exchange (async)
//!
//! ```no_run
//! use rtc_auth::{TokenClient, AuthConfig, ClientAccount};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TokenClient::new(AuthConfig::default())?;
//!     let account = ClientAccount::new("client-id", "client-secret");
//!
//!     let token = client
//!         .fetch_access_token("auth-code", &account, "https://example.com/redirect")
//!         .await?;
//!     if token.is_expired() {
//!         let token = client
//!             .refresh_access_token(token.refresh_token.as_deref().unwrap_or(""), &account)
//!             .await?;
//!         println!("refreshed, expires in {:?}", token.expires_in());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Activation gate
//!
//! ```no_run
//! use std::sync::Arc;
//! use rtc_auth::{
//!     ActivationGate, ActivationPrompt, MemoryActivationStore, NoopMetrics,
//!     PromptChoice, PromptRequest,
//! };
//!
//! struct AlwaysActivate;
//!
//! #[async_trait::async_trait]
//! impl ActivationPrompt for AlwaysActivate {
//!     async fn present(&self, _request: &PromptRequest) -> PromptChoice {
//!         PromptChoice::Activate
//!     }
//!     fn open_url(&self, _url: &str) {}
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let gate = ActivationGate::new(
//!         Arc::new(MemoryActivationStore::new()),
//!         Arc::new(NoopMetrics),
//!         Arc::new(AlwaysActivate),
//!     );
//!     assert!(gate.check().await);
//! }
//! ```

mod activation;
mod error;
mod types;

#[cfg(feature = "async")]
mod client;

#[cfg(feature = "blocking")]
pub mod blocking;

#[cfg(feature = "browser")]
mod browser;

// Public API exports
pub use activation::{
    ActivationGate, ActivationMetrics, ActivationPrompt, ActivationStore, LICENSE_URL,
    MemoryActivationStore, NoopMetrics, PromptChoice, PromptRequest,
};
pub use error::{AuthError, Result};
pub use types::{AccessToken, AuthConfig, AuthConfigBuilder, ClientAccount};

#[cfg(feature = "async")]
pub use client::TokenClient;

#[cfg(feature = "browser")]
pub use browser::open_browser;
