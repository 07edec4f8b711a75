//! Relationships collection client.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use heartsync_core::RelationshipId;

use crate::client::HeartSyncClient;
use crate::error::ApiError;

/// A tracked relationship, exactly as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: RelationshipId,
    pub name: String,
    /// Relationship kind ("Partner", "Friend", "Family", ...). Free-form on
    /// the wire, keyed as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Avatar image URL, rewritten by the backend on upload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anniversary: Option<NaiveDate>,
}

/// Fields the user controls when creating or editing a relationship.
///
/// The id is server-assigned and the avatar URL is server-rewritten, so
/// neither appears here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anniversary: Option<NaiveDate>,
}

impl HeartSyncClient {
    /// Fetch all relationships, in backend order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn list_relationships(&self) -> Result<Vec<Relationship>, ApiError> {
        self.get_data("/relationships").await
    }

    /// Fetch a single relationship by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the id is unknown.
    #[instrument(skip(self))]
    pub async fn get_relationship(&self, id: &RelationshipId) -> Result<Relationship, ApiError> {
        self.get_data(&format!("/relationships/{id}")).await
    }

    /// Create a relationship. Never retried: a replay would duplicate the
    /// entity.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_relationship(
        &self,
        draft: &RelationshipDraft,
    ) -> Result<Relationship, ApiError> {
        self.post_data("/relationships", draft).await
    }

    /// Update an existing relationship.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self, draft))]
    pub async fn update_relationship(
        &self,
        id: &RelationshipId,
        draft: &RelationshipDraft,
    ) -> Result<Relationship, ApiError> {
        self.put_data(&format!("/relationships/{id}"), draft).await
    }

    /// Delete a relationship.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_relationship(&self, id: &RelationshipId) -> Result<(), ApiError> {
        self.delete_path(&format!("/relationships/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_wire_shape() {
        let json = r#"{
            "id": "rel-1",
            "name": "Alex",
            "type": "Partner",
            "description": "College sweetheart",
            "birthday": "1992-03-14",
            "anniversary": "2015-06-01"
        }"#;

        let relationship: Relationship = serde_json::from_str(json).expect("parse");
        assert_eq!(relationship.id.as_str(), "rel-1");
        assert_eq!(relationship.kind, "Partner");
        assert!(relationship.avatar.is_none());
        assert_eq!(
            relationship.birthday,
            NaiveDate::from_ymd_opt(1992, 3, 14)
        );
    }

    #[test]
    fn test_draft_serializes_type_key() {
        let draft = RelationshipDraft {
            name: "Sam".to_string(),
            kind: "Friend".to_string(),
            description: String::new(),
            birthday: None,
            anniversary: None,
        };

        let json = serde_json::to_value(&draft).expect("serialize");
        assert_eq!(json["type"], "Friend");
        assert!(json.get("birthday").is_none());
    }

    #[test]
    fn test_visible_fields_survive_round_trip() {
        let draft = RelationshipDraft {
            name: "Robin".to_string(),
            kind: "Family".to_string(),
            description: "Sibling".to_string(),
            birthday: NaiveDate::from_ymd_opt(1988, 11, 2),
            anniversary: None,
        };

        // Simulate the backend echoing the draft with a server-assigned id.
        let mut stored = serde_json::to_value(&draft).expect("serialize");
        stored["id"] = serde_json::Value::String("rel-9".to_string());
        let fetched: Relationship = serde_json::from_value(stored).expect("parse");

        assert_eq!(fetched.name, draft.name);
        assert_eq!(fetched.kind, draft.kind);
        assert_eq!(fetched.description, draft.description);
        assert_eq!(fetched.birthday, draft.birthday);
        assert_eq!(fetched.anniversary, draft.anniversary);
    }
}
