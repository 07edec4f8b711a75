//! HTTP client for the HeartSync backend.
//!
//! Resource endpoints wrap their payloads in a `{ "data": ... }` envelope;
//! the helpers here unwrap it once so the per-collection modules stay thin.
//! The session credential is attached as a bearer token on every request.

use reqwest::{RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Wrapper for the backend's `{ "data": ... }` response envelope.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Typed client for the HeartSync backend API.
///
/// One instance is built per authenticated request from the session token;
/// the underlying `reqwest::Client` is shared so the connection pool is too.
#[derive(Clone)]
pub struct HeartSyncClient {
    http: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl std::fmt::Debug for HeartSyncClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeartSyncClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl HeartSyncClient {
    /// Create a client with its own connection pool.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: SecretString) -> Self {
        Self::with_http(reqwest::Client::new(), base_url, token)
    }

    /// Create a client that shares an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http(
        http: reqwest::Client,
        base_url: impl Into<String>,
        token: SecretString,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Backend base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(self.token.expose_secret())
    }

    /// GET a resource and unwrap the data envelope.
    pub(crate) async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.authorize(self.http.get(self.url(path))).send().await?;
        Self::unwrap_data(response).await
    }

    /// POST a JSON body and unwrap the data envelope of the response.
    pub(crate) async fn post_data<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        Self::unwrap_data(response).await
    }

    /// PUT a JSON body and unwrap the data envelope of the response.
    pub(crate) async fn put_data<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.put(self.url(path)))
            .json(body)
            .send()
            .await?;
        Self::unwrap_data(response).await
    }

    /// POST a multipart form and unwrap the data envelope of the response.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(self.http.post(self.url(path)))
            .multipart(form)
            .send()
            .await?;
        Self::unwrap_data(response).await
    }

    /// DELETE a resource, discarding any response body.
    pub(crate) async fn delete_path(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .authorize(self.http.delete(self.url(path)))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ApiError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn unwrap_data<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = HeartSyncClient::new("https://api.heartsync.app/", SecretString::from("t"));
        assert_eq!(client.base_url(), "https://api.heartsync.app");
        assert_eq!(
            client.url("/relationships"),
            "https://api.heartsync.app/relationships"
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = HeartSyncClient::new("https://api.heartsync.app", SecretString::from("s3cr3t"));
        let debug = format!("{client:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("s3cr3t"));
    }

    #[test]
    fn test_envelope_parses() {
        let envelope: Envelope<Vec<String>> =
            serde_json::from_str(r#"{"data":["a","b"]}"#).expect("parse");
        assert_eq!(envelope.data, vec!["a", "b"]);
    }
}
