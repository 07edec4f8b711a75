//! Reports list and detail pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use heartsync_api::Report;
use heartsync_core::ReportId;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::{Chrome, NoticeQuery};
use crate::state::AppState;

pub struct ReportRow {
    pub id: String,
    pub title: String,
    pub summary: String,
}

impl From<Report> for ReportRow {
    fn from(report: Report) -> Self {
        Self {
            id: report.id.to_string(),
            title: report.title,
            summary: report.summary,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "reports/index.html")]
pub struct ReportIndexTemplate {
    pub chrome: Chrome,
    pub reports: Vec<ReportRow>,
}

#[derive(Template, WebTemplate)]
#[template(path = "reports/show.html")]
pub struct ReportShowTemplate {
    pub chrome: Chrome,
    pub title: String,
    pub summary: String,
    pub details: String,
}

/// Banner shown in place of the list when the load fails.
pub const LOAD_FAILED: &str = "Reports could not be loaded. Please try again.";

/// Display the report list.
///
/// A failed load renders the page with an error banner instead of replacing
/// it with a bare error response; only a rejected token leaves the page.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let client = state.backend(&user.token);
    let reports = match client.list_reports().await {
        Ok(reports) => reports,
        Err(err) if err.is_unauthorized() => return Err(err.into()),
        Err(err) => {
            tracing::error!(error = %err, "Failed to load reports");
            return Ok(ReportIndexTemplate {
                chrome: Chrome::bare(&user).with_error(LOAD_FAILED),
                reports: Vec::new(),
            });
        }
    };
    Ok(ReportIndexTemplate {
        chrome: Chrome::for_user(&user, &query),
        reports: reports.into_iter().map(ReportRow::from).collect(),
    })
}

/// Display one report with full details.
///
/// A failed detail load lands back on the list with an error notice rather
/// than an error response.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Response> {
    let client = state.backend(&user.token);
    let report = match client.get_report(&ReportId::from(id)).await {
        Ok(report) => report,
        Err(err) if err.is_unauthorized() => return Err(err.into()),
        Err(err) => {
            tracing::error!(error = %err, "Failed to load report");
            return Ok(
                Redirect::to("/reports?error=Report%20could%20not%20be%20loaded").into_response(),
            );
        }
    };
    Ok(ReportShowTemplate {
        chrome: Chrome::bare(&user),
        title: report.title,
        summary: report.summary,
        details: report.details,
    }
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CurrentUser;

    fn user() -> CurrentUser {
        CurrentUser {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            token: "tok".to_string(),
        }
    }

    #[test]
    fn test_failed_load_renders_banner_in_chrome() {
        let page = ReportIndexTemplate {
            chrome: Chrome::bare(&user()).with_error(LOAD_FAILED),
            reports: Vec::new(),
        }
        .render()
        .expect("render");

        assert!(page.contains(LOAD_FAILED));
        assert!(page.contains("Dashboard"));
        assert!(page.contains("No reports yet"));
    }
}
