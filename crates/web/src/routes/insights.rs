//! Insights page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::instrument;

use heartsync_api::Insight;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::{Chrome, NoticeQuery};
use crate::state::AppState;

pub struct InsightRow {
    pub title: String,
    pub summary: String,
    pub category: String,
}

impl From<Insight> for InsightRow {
    fn from(insight: Insight) -> Self {
        Self {
            title: insight.title,
            summary: insight.summary,
            category: insight.category,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "insights.html")]
pub struct InsightsTemplate {
    pub chrome: Chrome,
    pub insights: Vec<InsightRow>,
}

/// Banner shown in place of the list when the load fails.
pub const LOAD_FAILED: &str = "Insights could not be loaded. Please try again.";

/// Display all generated insights.
///
/// A failed load renders the page with an error banner instead of replacing
/// it with a bare error response; only a rejected token leaves the page (back
/// to login, via `AppError`).
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let client = state.backend(&user.token);
    let insights = match client.list_insights().await {
        Ok(insights) => insights,
        Err(err) if err.is_unauthorized() => return Err(err.into()),
        Err(err) => {
            tracing::error!(error = %err, "Failed to load insights");
            return Ok(InsightsTemplate {
                chrome: Chrome::bare(&user).with_error(LOAD_FAILED),
                insights: Vec::new(),
            });
        }
    };
    Ok(InsightsTemplate {
        chrome: Chrome::for_user(&user, &query),
        insights: insights.into_iter().map(InsightRow::from).collect(),
    })
}
