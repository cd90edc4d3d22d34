//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_BASE_URL` - Public URL for the admin panel
//! - `AUTH_API_URL` - Backend authentication service (`POST /login`)
//! - `PRODUCTS_API_URL` - Backend products resource
//! - `BRANDS_API_URL` - Backend brands resource
//! - `QUOTES_API_URL` - Backend RFQ resource
//! - `USERS_API_URL` - Backend users resource
//! - `EBAY_API_URL` - Backend eBay integration (`/oauth`, `/products`)
//! - `ADMIN_API_URL` - Backend admin service (`/dashboard/stats`)
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `EBAY_OAUTH_URL` - eBay consent URL the "Connect eBay" button redirects to
//! - `BACKEND_TIMEOUT_SECS` - Per-request timeout for backend calls (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - Sample rates (default: 1.0)
//!
//! ## Optional (TLS)
//! - `ADMIN_TLS_CERT` - PEM-encoded certificate chain
//! - `ADMIN_TLS_KEY` - PEM-encoded private key

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin panel
    pub base_url: String,
    /// Base URLs of the backend resources
    pub backend: BackendConfig,
    /// eBay consent URL (carries the eBay client id and redirect URI)
    pub ebay_oauth_url: Option<SecretString>,
    /// Timeout applied to every backend request
    pub backend_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
    /// TLS configuration for HTTPS (optional)
    pub tls: Option<TlsConfig>,
}

/// Base URLs of the REST backend, one per resource.
///
/// Each value is validated as an absolute URL and stored without a trailing
/// slash so paths can be appended directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub auth: String,
    pub products: String,
    pub brands: String,
    pub quotes: String,
    pub users: String,
    pub ebay: String,
    pub admin: String,
}

impl BackendConfig {
    /// Load the backend URLs alone, for tools that do not serve the panel.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first missing or invalid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            auth: get_backend_url("AUTH_API_URL")?,
            products: get_backend_url("PRODUCTS_API_URL")?,
            brands: get_backend_url("BRANDS_API_URL")?,
            quotes: get_backend_url("QUOTES_API_URL")?,
            users: get_backend_url("USERS_API_URL")?,
            ebay: get_backend_url("EBAY_API_URL")?,
            admin: get_backend_url("ADMIN_API_URL")?,
        })
    }

    /// Point every resource at one backend origin, each under its own path.
    ///
    /// Used by the CLI and tests where a single gateway serves all resources
    /// (`{origin}/auth`, `{origin}/products`, ...).
    #[must_use]
    pub fn single_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            auth: format!("{origin}/auth"),
            products: format!("{origin}/products"),
            brands: format!("{origin}/brands"),
            quotes: format!("{origin}/quotes"),
            users: format!("{origin}/users"),
            ebay: format!("{origin}/ebay"),
            admin: format!("{origin}/admin"),
        }
    }
}

/// TLS configuration for HTTPS.
#[derive(Clone)]
pub struct TlsConfig {
    /// PEM-encoded certificate chain
    pub cert_pem: String,
    /// PEM-encoded private key
    pub key_pem: SecretString,
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("cert_pem", &"[CERTIFICATE]")
            .field("key_pem", &"[REDACTED]")
            .finish()
    }
}

impl TlsConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let cert_pem = get_optional_env("ADMIN_TLS_CERT");
        let key_pem = get_optional_env("ADMIN_TLS_KEY");

        match (cert_pem, key_pem) {
            (Some(cert), Some(key)) => Ok(Some(Self {
                cert_pem: cert,
                key_pem: SecretString::from(key),
            })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "ADMIN_TLS_*".to_string(),
                "Both ADMIN_TLS_CERT and ADMIN_TLS_KEY must be set together".to_string(),
            )),
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("ADMIN_BASE_URL")?;
        let backend = BackendConfig::from_env()?;
        let ebay_oauth_url = get_optional_env("EBAY_OAUTH_URL")
            .map(|raw| validate_url("EBAY_OAUTH_URL", &raw).map(SecretString::from))
            .transpose()?;
        let backend_timeout = get_optional_env("BACKEND_TIMEOUT_SECS")
            .map(|s| {
                s.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("BACKEND_TIMEOUT_SECS".to_string(), e.to_string())
                })
            })
            .transpose()?
            .map_or(
                Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS),
                Duration::from_secs,
            );
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let tls = TlsConfig::from_env()?;

        Ok(Self {
            host,
            port,
            base_url,
            backend,
            ebay_oauth_url,
            backend_timeout,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
            tls,
        })
    }

    /// Minimal configuration pointing at the given backend, with defaults elsewhere.
    #[must_use]
    pub fn for_backend(backend: BackendConfig) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3001,
            base_url: "http://127.0.0.1:3001".to_string(),
            backend,
            ebay_oauth_url: None,
            backend_timeout: Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
            tls: None,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the panel is served over HTTPS (controls the `Secure` cookie flag).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a required backend base URL, validated and without a trailing slash.
fn get_backend_url(key: &str) -> Result<String, ConfigError> {
    let raw = get_required_env(key)?;
    validate_url(key, &raw)
}

/// Validate an absolute http(s) URL and strip any trailing slash.
fn validate_url(key: &str, raw: &str) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }

    Ok(raw.trim().trim_end_matches('/').to_string())
}
