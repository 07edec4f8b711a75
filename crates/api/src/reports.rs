//! Relationship reports collection client (read-only).

use serde::{Deserialize, Serialize};
use tracing::instrument;

use heartsync_core::ReportId;

use crate::client::HeartSyncClient;
use crate::error::ApiError;

/// A generated relationship report. The client never mutates these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub details: String,
}

impl HeartSyncClient {
    /// Fetch all reports, in backend order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self))]
    pub async fn list_reports(&self) -> Result<Vec<Report>, ApiError> {
        self.get_data("/reports").await
    }

    /// Fetch a single report with its full details.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the id is unknown.
    #[instrument(skip(self))]
    pub async fn get_report(&self, id: &ReportId) -> Result<Report, ApiError> {
        self.get_data(&format!("/reports/{id}")).await
    }
}
