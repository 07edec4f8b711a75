//! Front-end configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `HEARTSYNC_API_URL` - Base URL of the HeartSync backend API
//!
//! ## Optional
//! - `HEARTSYNC_HOST` - Bind address (default: 127.0.0.1)
//! - `HEARTSYNC_PORT` - Listen port (default: 3000)
//! - `HEARTSYNC_BASE_URL` - Public URL for the front-end
//!   (default: `http://localhost:3000`; controls the secure-cookie flag)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Default bind address.
const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port.
const DEFAULT_PORT: u16 = 3000;

/// Default public URL.
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Front-end application configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Base URL of the HeartSync backend API.
    pub api_url: String,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Public base URL for the front-end.
    pub base_url: String,
    /// Sentry DSN for error tracking.
    pub sentry_dsn: Option<String>,
    /// Sentry environment name.
    pub sentry_environment: Option<String>,
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value cannot
    /// be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let api_url = require_env("HEARTSYNC_API_URL")?;

        let host_raw = optional_env("HEARTSYNC_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host: IpAddr = host_raw
            .parse()
            .map_err(|e| ConfigError::InvalidEnvVar("HEARTSYNC_HOST".to_string(), format!("{e}")))?;

        let port = match optional_env("HEARTSYNC_PORT") {
            Some(raw) => raw.parse().map_err(|e| {
                ConfigError::InvalidEnvVar("HEARTSYNC_PORT".to_string(), format!("{e}"))
            })?,
            None => DEFAULT_PORT,
        };

        let base_url =
            optional_env("HEARTSYNC_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            host,
            port,
            base_url,
            sentry_dsn: optional_env("SENTRY_DSN"),
            sentry_environment: optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the front-end is served over HTTPS (controls cookie flags).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    optional_env(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
