//! Zoho OAuth token exchange.
//!
//! Zoho issues short-lived access tokens against a long-lived refresh
//! token. Tokens are cached in memory by the client and refreshed when
//! within a minute of expiry.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::instrument;

use super::ZohoError;
use crate::config::ZohoConfig;

/// Zoho accounts token endpoint.
const TOKEN_ENDPOINT: &str = "https://accounts.zoho.com/oauth/v2/token";

/// An access token obtained from the refresh-token exchange.
#[derive(Debug, Clone)]
pub struct ZohoToken {
    /// Bearer token for API requests.
    pub access_token: SecretString,
    /// Unix timestamp when the access token expires.
    pub expires_at: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Token lifetime in seconds.
    expires_in: i64,
}

#[derive(Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

impl ZohoToken {
    /// Check if the access token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        // Consider expired if less than 60 seconds remaining
        now >= self.expires_at - 60
    }
}

/// Exchange the configured refresh token for a fresh access token.
///
/// # Errors
///
/// Returns `ZohoError::AuthenticationFailed` if the exchange is rejected.
#[instrument(skip_all)]
pub async fn fetch_access_token(
    client: &reqwest::Client,
    config: &ZohoConfig,
) -> Result<ZohoToken, ZohoError> {
    let now = chrono::Utc::now().timestamp();

    let response = client
        .post(TOKEN_ENDPOINT)
        .form(&[
            ("refresh_token", config.refresh_token.expose_secret()),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.expose_secret()),
            ("grant_type", "refresh_token"),
        ])
        .send()
        .await?;

    let status = response.status();

    if status.is_success() {
        let token: TokenResponse = response.json().await?;
        Ok(ZohoToken {
            access_token: SecretString::from(token.access_token),
            expires_at: now + token.expires_in,
        })
    } else {
        let error: TokenErrorResponse = response
            .json()
            .await
            .unwrap_or(TokenErrorResponse { error: None });

        Err(ZohoError::AuthenticationFailed(
            error
                .error
                .unwrap_or_else(|| format!("token endpoint returned {status}")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_expired() {
        let now = chrono::Utc::now().timestamp();

        let expired = ZohoToken {
            access_token: SecretString::from("t"),
            expires_at: now - 3600,
        };
        assert!(expired.is_expired());

        let valid = ZohoToken {
            access_token: SecretString::from("t"),
            expires_at: now + 3600,
        };
        assert!(!valid.is_expired());

        // Within the 60-second refresh buffer counts as expired
        let nearly = ZohoToken {
            access_token: SecretString::from("t"),
            expires_at: now + 30,
        };
        assert!(nearly.is_expired());
    }
}
