//! Goals collection client.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use heartsync_core::{GoalCategory, GoalId, Progress, RelationshipId};

use crate::client::HeartSyncClient;
use crate::error::ApiError;

/// A relationship goal, exactly as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub target_date: NaiveDate,
    pub category: GoalCategory,
    pub progress: Progress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_id: Option<RelationshipId>,
    /// Derived by the backend from `progress == 100`.
    #[serde(default)]
    pub completed: bool,
}

impl Goal {
    /// Whether this goal still counts as active on the dashboard.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.completed
    }
}

/// Fields the user controls when creating or editing a goal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub target_date: NaiveDate,
    pub category: GoalCategory,
    pub progress: Progress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_id: Option<RelationshipId>,
}

impl HeartSyncClient {
    /// Fetch all goals, in backend order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn list_goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.get_data("/goals").await
    }

    /// Create a goal. Never retried: a replay would duplicate the entity.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_goal(&self, draft: &GoalDraft) -> Result<Goal, ApiError> {
        self.post_data("/goals", draft).await
    }

    /// Update an existing goal.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self, draft))]
    pub async fn update_goal(&self, id: &GoalId, draft: &GoalDraft) -> Result<Goal, ApiError> {
        self.put_data(&format!("/goals/{id}"), draft).await
    }

    /// Update only the progress of a goal (the tracker's bump shortcut).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn set_goal_progress(
        &self,
        id: &GoalId,
        progress: Progress,
    ) -> Result<Goal, ApiError> {
        self.put_data(
            &format!("/goals/{id}"),
            &serde_json::json!({ "progress": progress }),
        )
        .await
    }

    /// Delete a goal.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_goal(&self, id: &GoalId) -> Result<(), ApiError> {
        self.delete_path(&format!("/goals/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_wire_shape() {
        let json = r#"{
            "id": "goal-1",
            "title": "Weekly check-in",
            "description": "Talk without screens",
            "targetDate": "2026-10-01",
            "category": "Communication",
            "progress": 40,
            "relationshipId": "rel-1",
            "completed": false
        }"#;

        let goal: Goal = serde_json::from_str(json).expect("parse");
        assert_eq!(goal.category, GoalCategory::Communication);
        assert_eq!(goal.progress.value(), 40);
        assert_eq!(
            goal.relationship_id.as_ref().map(RelationshipId::as_str),
            Some("rel-1")
        );
        assert!(goal.is_active());
    }

    #[test]
    fn test_goal_optional_fields_default() {
        let json = r#"{
            "id": "goal-2",
            "title": "Date night",
            "targetDate": "2026-09-15",
            "category": "Quality Time",
            "progress": 100
        }"#;

        let goal: Goal = serde_json::from_str(json).expect("parse");
        assert!(goal.description.is_empty());
        assert!(goal.relationship_id.is_none());
        // `completed` defaults to false when the backend omits it; the derived
        // flag is its responsibility, not ours.
        assert!(!goal.completed);
        assert!(goal.progress.is_complete());
    }

    #[test]
    fn test_draft_uses_camel_case_keys() {
        let draft = GoalDraft {
            title: "Read together".to_string(),
            description: String::new(),
            target_date: NaiveDate::from_ymd_opt(2026, 12, 1).expect("valid date"),
            category: GoalCategory::SharedActivities,
            progress: Progress::ZERO,
            relationship_id: None,
        };

        let json = serde_json::to_value(&draft).expect("serialize");
        assert_eq!(json["targetDate"], "2026-12-01");
        assert_eq!(json["category"], "Shared Activities");
        assert_eq!(json["progress"], 0);
    }
}
