//! Application state shared across handlers.

use std::sync::Arc;

use secrecy::SecretString;

use heartsync_api::HeartSyncClient;

use crate::config::WebConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. There is no local database: the backend owns
/// all persistence, so the state is just configuration plus the shared HTTP
/// connection pool that per-request backend clients are built from.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    http: reqwest::Client,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: WebConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                http: reqwest::Client::new(),
            }),
        }
    }

    /// Get a reference to the front-end configuration.
    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// Get the shared HTTP client (for unauthenticated calls such as login).
    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Build a backend client carrying the given session token.
    ///
    /// Clients are per-request because the credential is per-session; the
    /// connection pool underneath is shared.
    #[must_use]
    pub fn backend(&self, token: &str) -> HeartSyncClient {
        HeartSyncClient::with_http(
            self.inner.http.clone(),
            &self.inner.config.api_url,
            SecretString::from(token),
        )
    }
}
