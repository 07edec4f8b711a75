//! AI insights collection client (read-only).

use serde::{Deserialize, Serialize};
use tracing::instrument;

use heartsync_core::InsightId;

use crate::client::HeartSyncClient;
use crate::error::ApiError;

/// An AI-generated insight. The client never mutates these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: InsightId,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub category: String,
}

impl HeartSyncClient {
    /// Fetch all insights, in backend order (the backend decides what
    /// "latest" means).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn list_insights(&self) -> Result<Vec<Insight>, ApiError> {
        self.get_data("/insights").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_wire_shape() {
        let json = r#"{"id":"ins-1","title":"Make time","summary":"...","category":"Quality Time"}"#;
        let insight: Insight = serde_json::from_str(json).expect("parse");
        assert_eq!(insight.id.as_str(), "ins-1");
        assert_eq!(insight.category, "Quality Time");
    }
}
