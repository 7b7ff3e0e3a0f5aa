//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (application role)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `STOREFRONT_SESSION_SECRET` - Session signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `UPLOADS_DIR` - Root directory for uploaded images (default: data/uploads)
//! - `UPLOADS_PUBLIC_PREFIX` - URL prefix uploads are served under (default: /uploads)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//!
//! ## Zoho Inventory (all-or-nothing)
//!
//! The inventory mirror is enabled only when the whole block is present.
//! A partially configured block is a startup error; a fully absent block
//! disables mirroring.
//!
//! - `ZOHO_CLIENT_ID`
//! - `ZOHO_CLIENT_SECRET`
//! - `ZOHO_REFRESH_TOKEN`
//! - `ZOHO_ORGANIZATION_ID`
//! - `ZOHO_SALES_ACCOUNT_ID`
//! - `ZOHO_TAX_ID`

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
    #[error("Incomplete Zoho configuration, missing: {0}")]
    IncompleteZoho(String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// Upload storage configuration
    pub uploads: UploadConfig,
    /// Zoho Inventory mirror configuration; `None` disables mirroring
    pub zoho: Option<ZohoConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Where uploaded images live on disk and how they are served.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Root directory for stored files
    pub root: PathBuf,
    /// URL prefix the root is served under
    pub public_prefix: String,
}

/// Zoho Inventory API credentials.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct ZohoConfig {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: SecretString,
    /// Long-lived refresh token exchanged for short-lived access tokens
    pub refresh_token: SecretString,
    /// Zoho organization ID (query parameter on every inventory call)
    pub organization_id: String,
    /// Sales account new items are booked against
    pub sales_account_id: String,
    /// VAT tax ID applied to new items
    pub tax_id: String,
}

impl std::fmt::Debug for ZohoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZohoConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("organization_id", &self.organization_id)
            .field("sales_account_id", &self.sales_account_id)
            .field("tax_id", &self.tax_id)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("STOREFRONT_DATABASE_URL")?;
        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        let session_secret = get_validated_secret("STOREFRONT_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "STOREFRONT_SESSION_SECRET")?;

        let uploads = UploadConfig {
            root: PathBuf::from(get_env_or_default("UPLOADS_DIR", "data/uploads")),
            public_prefix: get_env_or_default("UPLOADS_PUBLIC_PREFIX", "/uploads"),
        };

        let zoho = ZohoConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret,
            uploads,
            zoho,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ZohoConfig {
    /// Load the Zoho block from the environment.
    ///
    /// Returns `Ok(None)` when no `ZOHO_*` variable is set at all, and an
    /// error when the block is only partially configured: a missing
    /// credential must never surface later as a silent mirroring failure.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        const VARS: [&str; 6] = [
            "ZOHO_CLIENT_ID",
            "ZOHO_CLIENT_SECRET",
            "ZOHO_REFRESH_TOKEN",
            "ZOHO_ORGANIZATION_ID",
            "ZOHO_SALES_ACCOUNT_ID",
            "ZOHO_TAX_ID",
        ];

        let missing: Vec<&str> = VARS
            .iter()
            .copied()
            .filter(|v| std::env::var(v).is_err())
            .collect();

        if missing.len() == VARS.len() {
            return Ok(None);
        }
        if !missing.is_empty() {
            return Err(ConfigError::IncompleteZoho(missing.join(", ")));
        }

        Ok(Some(Self {
            client_id: get_required_env("ZOHO_CLIENT_ID")?,
            client_secret: SecretString::from(get_required_env("ZOHO_CLIENT_SECRET")?),
            refresh_token: SecretString::from(get_required_env("ZOHO_REFRESH_TOKEN")?),
            organization_id: get_required_env("ZOHO_ORGANIZATION_ID")?,
            sales_account_id: get_required_env("ZOHO_SALES_ACCOUNT_ID")?,
            tax_id: get_required_env("ZOHO_TAX_ID")?,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real secrets (random API keys) have high entropy
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_degenerate_inputs() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_random_looking_string() {
        let entropy = shannon_entropy("aB3$xY9!mK2@nL5#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_rejects_placeholders() {
        assert!(validate_secret_strength("your-api-key-here", "TEST_VAR").is_err());
        assert!(validate_secret_strength("changeme123", "TEST_VAR").is_err());
    }

    #[test]
    fn test_validate_secret_strength_rejects_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InsecureSecret(_, _)
        ));
    }

    #[test]
    fn test_validate_secret_strength_accepts_random_secret() {
        assert!(validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_validate_session_secret_length() {
        let short = SecretString::from("short");
        assert!(validate_session_secret(&short, "TEST_SESSION").is_err());

        let ok = SecretString::from("a".repeat(32));
        assert!(validate_session_secret(&ok, "TEST_SESSION").is_ok());
    }

    #[test]
    fn test_zoho_config_debug_redacts_secrets() {
        let config = ZohoConfig {
            client_id: "1000.ABCDEF".to_string(),
            client_secret: SecretString::from("very_secret_client_value"),
            refresh_token: SecretString::from("very_secret_refresh_value"),
            organization_id: "700000001".to_string(),
            sales_account_id: "460000000000388".to_string(),
            tax_id: "460000000017001".to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("1000.ABCDEF"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("very_secret_client_value"));
        assert!(!debug_output.contains("very_secret_refresh_value"));
    }
}
