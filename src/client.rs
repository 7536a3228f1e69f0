use tracing::debug;
use url::Url;

use crate::types::TokenResponse;
use crate::{AccessToken, AuthConfig, AuthError, ClientAccount, Result};

/// Asynchronous OAuth token exchange client
///
/// Stateless: each call issues one independent request against the token
/// endpoint. Concurrent calls are safe and unordered; callers needing a
/// refresh-before-reuse ordering must sequence calls themselves.
///
/// # Example
///
/// ```no_run
/// use rtc_auth::{TokenClient, AuthConfig, ClientAccount};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = TokenClient::new(AuthConfig::default())?;
///     let account = ClientAccount::new("client-id", "client-secret");
///
///     let token = client
///         .fetch_access_token("auth-code", &account, "https://example.com/redirect")
///         .await?;
///     println!("expires in {:?}", token.expires_in());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct TokenClient {
    config: AuthConfig,
    http: reqwest::Client,
}

impl TokenClient {
    /// Create a new token client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is not a valid URL.
    pub fn new(config: AuthConfig) -> Result<Self> {
        Url::parse(&config.base_url)?;
        Ok(Self {
            config,
            http: reqwest::Client::new(),
        })
    }

    /// Exchange an authorization code for an access token
    ///
    /// Issues `grant_type=authorization_code` against the token endpoint.
    /// The request carries no Authorization header: it precedes
    /// authentication.
    ///
    /// # Arguments
    ///
    /// * `code` - The authorization code from the upstream authorization flow
    /// * `account` - OAuth client credentials
    /// * `redirect_uri` - The redirect URI registered for the client
    ///
    /// # Errors
    ///
    /// `Network` on connectivity failure, `Http` on a non-success status,
    /// `Decode` on a malformed token response. No retries are performed.
    pub async fn fetch_access_token(
        &self,
        code: &str,
        account: &ClientAccount,
        redirect_uri: &str,
    ) -> Result<AccessToken> {
        let params = [
            ("grant_type", "authorization_code"),
            ("redirect_uri", redirect_uri),
            ("code", code),
            ("client_id", &account.client_id),
            ("client_secret", &account.client_secret),
        ];
        debug!(grant_type = "authorization_code", "requesting access token");
        self.post_token_request(&params).await
    }

    /// Refresh an expired access token
    ///
    /// Issues `grant_type=refresh_token` against the token endpoint, with the
    /// same transport contract as [`fetch_access_token`](Self::fetch_access_token).
    ///
    /// # Errors
    ///
    /// Same taxonomy as `fetch_access_token`.
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
        account: &ClientAccount,
    ) -> Result<AccessToken> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &account.client_id),
            ("client_secret", &account.client_secret),
        ];
        debug!(grant_type = "refresh_token", "refreshing access token");
        self.post_token_request(&params).await
    }

    async fn post_token_request(&self, params: &[(&str, &str)]) -> Result<AccessToken> {
        let url = format!("{}/access_token", self.config.base_url.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .form(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Http { status, body });
        }

        // Read the body as text first so a malformed payload surfaces as
        // Decode rather than a transport error.
        let body = response.text().await?;
        let token_response: TokenResponse = serde_json::from_str(&body)?;
        Ok(AccessToken::from(token_response))
    }
}
