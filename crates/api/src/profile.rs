//! Profile singleton client.
//!
//! The profile is one-per-session and addressed without an id. Password
//! changes go through the same update endpoint with a dedicated body; the
//! avatar has its own multipart upload call.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use heartsync_core::Theme;

use crate::client::HeartSyncClient;
use crate::error::ApiError;

/// Notification and theme preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub theme: Theme,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: false,
            theme: Theme::default(),
        }
    }
}

/// The user's profile, exactly as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: String,
    /// Avatar image URL, rewritten by the backend on upload.
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub preferences: Preferences,
}

/// Fields the user controls when editing the profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub preferences: Preferences,
}

impl HeartSyncClient {
    /// Fetch the profile for the current session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn get_profile(&self) -> Result<Profile, ApiError> {
        self.get_data("/profile").await
    }

    /// Update the profile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self, draft))]
    pub async fn update_profile(&self, draft: &ProfileDraft) -> Result<Profile, ApiError> {
        self.put_data("/profile", draft).await
    }

    /// Change the account password.
    ///
    /// Confirmation matching happens client-side before this is called; the
    /// backend applies its own policy on top.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip_all)]
    pub async fn change_password(&self, new_password: &SecretString) -> Result<Profile, ApiError> {
        self.put_data(
            "/profile",
            &serde_json::json!({ "password": new_password.expose_secret() }),
        )
        .await
    }

    /// Upload a new avatar image.
    ///
    /// The backend stores the image and rewrites the profile's avatar URL;
    /// the returned profile carries the new reference.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self, bytes), fields(file_name = %file_name, size = bytes.len()))]
    pub async fn upload_avatar(
        &self,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<Profile, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("avatar", part);
        self.post_multipart("/profile/avatar", form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_wire_shape() {
        let json = r#"{
            "name": "Ada",
            "email": "ada@example.com",
            "bio": "Hello",
            "avatar": "https://cdn.heartsync.app/a.png",
            "preferences": {
                "emailNotifications": true,
                "pushNotifications": false,
                "theme": "dark"
            }
        }"#;

        let profile: Profile = serde_json::from_str(json).expect("parse");
        assert_eq!(profile.preferences.theme, Theme::Dark);
        assert!(profile.preferences.email_notifications);
    }

    #[test]
    fn test_profile_defaults_when_sparse() {
        let profile: Profile =
            serde_json::from_str(r#"{"name":"Ada","email":"ada@example.com"}"#).expect("parse");
        assert!(profile.bio.is_empty());
        assert!(profile.avatar.is_none());
        assert_eq!(profile.preferences.theme, Theme::Light);
    }

    #[test]
    fn test_draft_uses_camel_case_keys() {
        let draft = ProfileDraft {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            bio: String::new(),
            preferences: Preferences::default(),
        };

        let json = serde_json::to_value(&draft).expect("serialize");
        assert_eq!(json["preferences"]["emailNotifications"], true);
        assert_eq!(json["preferences"]["theme"], "light");
    }
}
