//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: http://localhost:3000)
//! - `STOREFRONT_GATE_PASSWORD` - Wholesale page password (default: fieldday)
//! - `STOREFRONT_GATE_DESTINATION` - Path behind the gate (default: /wholesale)
//! - `STOREFRONT_CATALOG_PATH` - JSON catalog replacing the built-in products
//! - `STOREFRONT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)
//!
//! The gate password is not a credential. It keeps casual visitors off the
//! wholesale page and nothing more; see [`loam_core::gate`].

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const DEFAULT_GATE_PASSWORD: &str = "fieldday";
const DEFAULT_GATE_DESTINATION: &str = "/wholesale";

/// Paths owned by built-in routes; the gate destination may not shadow them.
const RESERVED_PATHS: &[&str] = &[
    "/health", "/cart", "/checkout", "/contact", "/gate", "/tabs", "/static",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Wholesale password gate
    pub gate: GateConfig,
    /// Catalog file replacing the built-in products
    pub catalog_path: Option<PathBuf>,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Password gate configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct GateConfig {
    /// Password compared (trimmed) against the visitor's entry
    pub password: SecretString,
    /// Absolute path of the page behind the gate
    pub destination: String,
}

impl std::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateConfig")
            .field("password", &"[REDACTED]")
            .field("destination", &self.destination)
            .finish()
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            password: SecretString::from(DEFAULT_GATE_PASSWORD),
            destination: DEFAULT_GATE_DESTINATION.to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let host = env.parsed::<IpAddr>("STOREFRONT_HOST", "127.0.0.1")?;
        let port = env.parsed::<u16>("STOREFRONT_PORT", "3000")?;
        let base_url = env.or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        validate_base_url(&base_url)?;

        let gate = GateConfig::from_env(&env)?;
        let catalog_path = env.optional("STOREFRONT_CATALOG_PATH").map(PathBuf::from);
        let static_dir =
            PathBuf::from(env.or_default("STOREFRONT_STATIC_DIR", "crates/storefront/static"));

        let sentry_dsn = env.optional("SENTRY_DSN");
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env.rate("SENTRY_SAMPLE_RATE", "1.0")?;
        let sentry_traces_sample_rate = env.rate("SENTRY_TRACES_SAMPLE_RATE", "0.0")?;

        Ok(Self {
            host,
            port,
            base_url,
            gate,
            catalog_path,
            static_dir,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl GateConfig {
    fn from_env<F: Fn(&str) -> Option<String>>(env: &Env<F>) -> Result<Self, ConfigError> {
        let password = env.or_default("STOREFRONT_GATE_PASSWORD", DEFAULT_GATE_PASSWORD);
        if password.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_GATE_PASSWORD".to_string(),
                "cannot be blank".to_string(),
            ));
        }

        let destination = env.or_default("STOREFRONT_GATE_DESTINATION", DEFAULT_GATE_DESTINATION);
        validate_destination(&destination)?;

        Ok(Self {
            password: SecretString::from(password),
            destination,
        })
    }

    /// The password as plain text for comparison.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Environment lookup with typed accessors.
struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable, treating empty values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get and parse a variable, falling back to `default` when unset.
    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    /// Get a sampling rate in `0.0..=1.0`.
    fn rate(&self, key: &str, default: &str) -> Result<f32, ConfigError> {
        let rate = self.parsed::<f32>(key, default)?;
        if (0.0..=1.0).contains(&rate) {
            Ok(rate)
        } else {
            Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("{rate} is outside 0.0..=1.0"),
            ))
        }
    }
}

/// The base URL must be an absolute http(s) URL.
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), reason);

    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

/// The gate destination must be a plain absolute path that no built-in route owns.
fn validate_destination(destination: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| {
        ConfigError::InvalidEnvVar("STOREFRONT_GATE_DESTINATION".to_string(), reason.to_string())
    };

    if !destination.starts_with('/') || destination == "/" {
        return Err(invalid("must be an absolute path other than /"));
    }
    if destination.contains(['{', '}', '*', '?', '#']) {
        return Err(invalid("must be a literal path"));
    }
    let reserved = RESERVED_PATHS.iter().any(|reserved| {
        destination == *reserved
            || destination
                .strip_prefix(reserved)
                .is_some_and(|rest| rest.starts_with('/'))
    });
    if reserved {
        return Err(invalid("collides with a built-in route"));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.gate.password(), "fieldday");
        assert_eq!(config.gate.destination, "/wholesale");
        assert!(config.catalog_path.is_none());
        assert!(!config.is_secure());
        assert!((config.sentry_sample_rate - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_BASE_URL", "https://loamsoil.co"),
            ("STOREFRONT_GATE_PASSWORD", "compost-tea"),
            ("STOREFRONT_GATE_DESTINATION", "/trade/prices"),
            ("STOREFRONT_CATALOG_PATH", "/etc/loam/catalog.json"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.is_secure());
        assert_eq!(config.gate.password(), "compost-tea");
        assert_eq!(config.gate.destination, "/trade/prices");
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/loam/catalog.json"))
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("STOREFRONT_PORT", "seventy")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(load(&[("STOREFRONT_BASE_URL", "not a url")]).is_err());
        assert!(load(&[("STOREFRONT_BASE_URL", "ftp://loamsoil.co")]).is_err());
    }

    #[test]
    fn test_blank_gate_password_rejected() {
        assert!(load(&[("STOREFRONT_GATE_PASSWORD", "   ")]).is_err());
    }

    #[test]
    fn test_gate_destination_validation() {
        for bad in ["wholesale", "/", "/cart", "/static/css", "/gate", "/{id}"] {
            assert!(
                load(&[("STOREFRONT_GATE_DESTINATION", bad)]).is_err(),
                "{bad} should be rejected"
            );
        }
        assert!(load(&[("STOREFRONT_GATE_DESTINATION", "/cartography")]).is_ok());
    }

    #[test]
    fn test_sample_rate_range() {
        assert!(load(&[("SENTRY_SAMPLE_RATE", "1.5")]).is_err());
        assert!(load(&[("SENTRY_TRACES_SAMPLE_RATE", "0.25")]).is_ok());
    }

    #[test]
    fn test_gate_config_debug_redacts_password() {
        let gate = GateConfig {
            password: SecretString::from("super_secret_gate_word"),
            destination: "/wholesale".to_string(),
        };
        let debug_output = format!("{gate:?}");
        assert!(debug_output.contains("/wholesale"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_gate_word"));
    }
}
