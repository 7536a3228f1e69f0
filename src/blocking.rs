//! Blocking token exchange API
//!
//! The blocking client is a thin wrapper over the async [`TokenClient`]:
//! each call spawns the async operation on an owned background runtime and
//! parks the calling thread until the completion fires, then returns the
//! value or re-raises the captured error. Request construction lives only in
//! the async client.
//!
//! [`TokenClient`]: crate::TokenClient

use std::future::Future;
use std::sync::mpsc;

use crate::{AccessToken, AuthConfig, AuthError, ClientAccount, Result};

/// Blocking OAuth token exchange client
///
/// # Example
///
/// ```no_run
/// use rtc_auth::{blocking::TokenClient, AuthConfig, ClientAccount};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = TokenClient::new(AuthConfig::default())?;
///     let account = ClientAccount::new("client-id", "client-secret");
///
///     let token = client.fetch_access_token("auth-code", &account, "https://example.com/redirect")?;
///     println!("expires in {:?}", token.expires_in());
///     Ok(())
/// }
/// ```
pub struct TokenClient {
    inner: crate::TokenClient,
    runtime: tokio::runtime::Runtime,
}

impl TokenClient {
    /// Create a new blocking token client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the background
    /// runtime cannot be started.
    pub fn new(config: AuthConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| AuthError::Runtime(e.to_string()))?;
        Ok(Self {
            inner: crate::TokenClient::new(config)?,
            runtime,
        })
    }

    /// Exchange an authorization code for an access token, blocking until the
    /// exchange completes
    ///
    /// Outcome-equivalent to [`crate::TokenClient::fetch_access_token`].
    pub fn fetch_access_token(
        &self,
        code: &str,
        account: &ClientAccount,
        redirect_uri: &str,
    ) -> Result<AccessToken> {
        let inner = self.inner.clone();
        let code = code.to_string();
        let account = account.clone();
        let redirect_uri = redirect_uri.to_string();
        self.wait(async move {
            inner
                .fetch_access_token(&code, &account, &redirect_uri)
                .await
        })
    }

    /// Refresh an expired access token, blocking until the refresh completes
    ///
    /// Outcome-equivalent to [`crate::TokenClient::refresh_access_token`].
    pub fn refresh_access_token(
        &self,
        refresh_token: &str,
        account: &ClientAccount,
    ) -> Result<AccessToken> {
        let inner = self.inner.clone();
        let refresh_token = refresh_token.to_string();
        let account = account.clone();
        self.wait(async move { inner.refresh_access_token(&refresh_token, &account).await })
    }

    // Spawn the async operation and park on a one-shot channel until its
    // completion fires. A dropped sender (runtime shutdown) surfaces as
    // Interrupted.
    fn wait<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        self.runtime.spawn(async move {
            let _ = tx.send(op.await);
        });
        rx.recv().map_err(|_| AuthError::Interrupted)?
    }
}
