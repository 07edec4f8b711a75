//! Login and signup against the external identity endpoint.
//!
//! Token issuance is entirely a backend concern: these calls forward
//! credentials and hand back the opaque token plus the display identity. They
//! run before any session exists, so they take a plain `reqwest::Client`
//! rather than an authenticated [`crate::HeartSyncClient`].

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::instrument;

use crate::error::ApiError;

/// Identity of the logged-in user as reported by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub name: String,
    pub email: String,
}

/// Successful login/signup response.
#[derive(Debug, Deserialize)]
pub struct AuthSession {
    /// Opaque session credential. Presence, not validity, is what the
    /// front-end checks; a stale token fails later at the remote-call
    /// boundary.
    pub token: String,
    pub user: AuthUser,
}

/// Exchange credentials for a session token.
///
/// # Errors
///
/// Returns [`ApiError`] if the request fails or the backend rejects the
/// credentials.
#[instrument(skip(http, password), fields(email = %email))]
pub async fn login(
    http: &reqwest::Client,
    base_url: &str,
    email: &str,
    password: &SecretString,
) -> Result<AuthSession, ApiError> {
    post_credentials(
        http,
        base_url,
        "/auth/login",
        &serde_json::json!({
            "email": email,
            "password": password.expose_secret(),
        }),
    )
    .await
}

/// Create an account and log straight in.
///
/// # Errors
///
/// Returns [`ApiError`] if the request fails or the backend refuses the
/// registration (for example, the email is already taken).
#[instrument(skip(http, password), fields(email = %email))]
pub async fn signup(
    http: &reqwest::Client,
    base_url: &str,
    name: &str,
    email: &str,
    password: &SecretString,
) -> Result<AuthSession, ApiError> {
    post_credentials(
        http,
        base_url,
        "/auth/signup",
        &serde_json::json!({
            "name": name,
            "email": email,
            "password": password.expose_secret(),
        }),
    )
    .await
}

async fn post_credentials(
    http: &reqwest::Client,
    base_url: &str,
    path: &str,
    body: &serde_json::Value,
) -> Result<AuthSession, ApiError> {
    let url = format!("{}{path}", base_url.trim_end_matches('/'));
    let response = http.post(url).json(body).send().await?;
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<AuthSession>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_session_parses() {
        let session: AuthSession = serde_json::from_str(
            r#"{"token":"tok-1","user":{"name":"Ada","email":"ada@example.com"}}"#,
        )
        .expect("parse");
        assert_eq!(session.token, "tok-1");
        assert_eq!(session.user.name, "Ada");
    }
}
