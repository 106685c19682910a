//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_ADMIN_URL` - Target of the header's admin link
//!   (default: <http://localhost:3001/admin>)
//! - `BACKEND_URL` - Products/checkout backend (default: <http://localhost:8000>)
//! - `BACKEND_TIMEOUT_SECS` - Per-request timeout in seconds, at least 1 (default: none)
//! - `LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU64;
use std::time::Duration;

use coffee_stand_core::client::{BackendConfig, DEFAULT_BACKEND_URL};
use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Where the "Admin Dashboard" header link points
    pub admin_url: String,
    pub backend: BackendConfig,
    pub log_format: LogFormat,
    pub sentry_dsn: Option<SecretString>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let invalid = |key: &str, e: &dyn std::fmt::Display| {
            ConfigError::InvalidEnvVar(key.to_string(), e.to_string())
        };

        let host = get_or("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| invalid("STOREFRONT_HOST", &e))?;
        let port = get_or("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| invalid("STOREFRONT_PORT", &e))?;
        let admin_url = get_or("STOREFRONT_ADMIN_URL", "http://localhost:3001/admin");

        let base_url = BackendConfig::parse_base_url(&get_or("BACKEND_URL", DEFAULT_BACKEND_URL))
            .map_err(|e| invalid("BACKEND_URL", &e))?;
        let mut backend = BackendConfig::new(base_url);
        if let Some(secs) = lookup("BACKEND_TIMEOUT_SECS") {
            let secs = secs
                .parse::<NonZeroU64>()
                .map_err(|e| invalid("BACKEND_TIMEOUT_SECS", &e))?;
            backend = backend.with_timeout(Duration::from_secs(secs.get()));
        }

        let log_format = match get_or("LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "text" | "" => LogFormat::Text,
            other => return Err(invalid("LOG_FORMAT", &format!("unknown format '{other}'"))),
        };

        Ok(Self {
            host,
            port,
            admin_url,
            backend,
            log_format,
            sentry_dsn: lookup("SENTRY_DSN").map(SecretString::from),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: lookup("SENTRY_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0),
            sentry_traces_sample_rate: lookup("SENTRY_TRACES_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.0),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.backend.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.backend.timeout, None);
        assert_eq!(config.admin_url, "http://localhost:3001/admin");
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_backend_settings() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("BACKEND_URL", "https://api.example.com"),
            ("BACKEND_TIMEOUT_SECS", "5"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.backend.base_url.host_str(), Some("api.example.com"));
        assert_eq!(config.backend.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values() {
        assert!(StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_PORT", "70000")])).is_err());
        assert!(StorefrontConfig::from_lookup(lookup(&[("BACKEND_URL", "file:///tmp")])).is_err());
        assert!(StorefrontConfig::from_lookup(lookup(&[("LOG_FORMAT", "yaml")])).is_err());
        assert!(StorefrontConfig::from_lookup(lookup(&[("BACKEND_TIMEOUT_SECS", "0")])).is_err());
    }
}
