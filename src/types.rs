use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// OAuth client credential pair used for token exchange
///
/// Supplied by the caller; the client never persists it.
#[derive(Debug, Clone)]
pub struct ClientAccount {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
}

impl ClientAccount {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

/// Bearer token set returned by the token endpoint
///
/// Ownership transfers to the caller on return; the client keeps no copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// The access token used to authenticate subsequent requests
    pub access_token: String,
    /// The refresh token, when the grant returns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds) when the access token expires
    pub expires_at: u64,
}

impl AccessToken {
    /// Check if the token is expired or will expire soon (within 5 minutes)
    ///
    /// The 5-minute buffer prevents a token expiring between checking and
    /// using it.
    pub fn is_expired(&self) -> bool {
        self.expires_in() <= Duration::from_secs(300)
    }

    /// Get the duration until the token expires
    ///
    /// Returns `Duration::ZERO` if the token is already expired.
    pub fn expires_in(&self) -> Duration {
        let now = unix_now();
        if self.expires_at > now {
            Duration::from_secs(self.expires_at - now)
        } else {
            Duration::ZERO
        }
    }
}

/// Configuration for the token exchange client
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Base URL of the token service; `access_token` is appended per request
    pub base_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.ciscospark.com/v1".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create a new config builder
    pub fn builder() -> AuthConfigBuilder {
        AuthConfigBuilder::default()
    }
}

/// Builder for AuthConfig
#[derive(Debug, Clone, Default)]
pub struct AuthConfigBuilder {
    base_url: Option<String>,
}

impl AuthConfigBuilder {
    /// Set the token service base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the AuthConfig
    pub fn build(self) -> AuthConfig {
        let defaults = AuthConfig::default();
        AuthConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
        }
    }
}

/// Token response from the OAuth endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
}

impl From<TokenResponse> for AccessToken {
    fn from(response: TokenResponse) -> Self {
        let expires_at = unix_now() + response.expires_in.unwrap_or(3600);
        AccessToken {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at,
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_expiring_within_buffer_reads_as_expired() {
        let token = AccessToken {
            access_token: "tok".into(),
            refresh_token: None,
            expires_at: unix_now() + 60,
        };
        assert!(token.is_expired());
    }

    #[test]
    fn token_beyond_buffer_is_live() {
        let token = AccessToken {
            access_token: "tok".into(),
            refresh_token: None,
            expires_at: unix_now() + 3600,
        };
        assert!(!token.is_expired());
        assert!(token.expires_in() > Duration::from_secs(3000));
    }

    #[test]
    fn past_expiry_reports_zero_remaining() {
        let token = AccessToken {
            access_token: "tok".into(),
            refresh_token: None,
            expires_at: 1,
        };
        assert_eq!(token.expires_in(), Duration::ZERO);
    }

    #[test]
    fn builder_overrides_base_url() {
        let config = AuthConfig::builder().base_url("http://localhost:9/v1").build();
        assert_eq!(config.base_url, "http://localhost:9/v1");
    }

    #[test]
    fn missing_expires_in_defaults_to_one_hour() {
        let response = TokenResponse {
            access_token: "tok".into(),
            refresh_token: Some("ref".into()),
            expires_in: None,
        };
        let token = AccessToken::from(response);
        assert!(token.expires_at >= unix_now() + 3590);
    }
}
