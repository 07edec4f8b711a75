//! HTTP route handlers for the front-end.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//!
//! # Auth (public)
//! GET  /login                       - Login page
//! POST /login                       - Login action
//! GET  /signup                      - Signup page
//! POST /signup                      - Signup action
//! POST /logout                      - Logout action
//!
//! # Protected (redirect to /login without a session)
//! GET  /                            - Dashboard
//! GET  /relationships               - Relationship list
//! GET  /relationships/add           - New relationship form
//! POST /relationships/add           - Create relationship
//! GET  /relationships/edit/{id}     - Edit relationship form
//! POST /relationships/edit/{id}     - Update relationship
//! POST /relationships/{id}/delete   - Delete relationship
//! GET  /goals                       - Goal tracker
//! GET  /goals/add                   - New goal form
//! POST /goals/add                   - Create goal
//! GET  /goals/edit/{id}             - Edit goal form
//! POST /goals/edit/{id}             - Update goal
//! POST /goals/{id}/progress         - Bump goal progress
//! POST /goals/{id}/delete           - Delete goal
//! GET  /insights                    - AI insights (read-only)
//! GET  /reports                     - Reports (read-only)
//! GET  /reports/{id}                - Report details
//! GET  /compatibility               - Compatibility test form
//! POST /compatibility               - Run compatibility test
//! GET  /profile                     - Profile settings
//! POST /profile                     - Update profile
//! POST /profile/password            - Change password
//! POST /profile/avatar              - Upload avatar (multipart)
//!
//! *                                 - Redirect to /
//! ```

pub mod auth;
pub mod compatibility;
pub mod dashboard;
pub mod goals;
pub mod insights;
pub mod profile;
pub mod relationships;
pub mod reports;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use serde::Deserialize;

use crate::models::CurrentUser;
use crate::state::AppState;

/// Query parameters carrying a one-shot notice across a redirect.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Page chrome shared by every template through the base layout: the
/// navigation identity plus the current notice banners. Empty strings mean
/// "absent" so templates stay free of `Option` plumbing.
#[derive(Debug, Clone, Default)]
pub struct Chrome {
    pub user_name: String,
    pub logged_in: bool,
    pub notice: String,
    pub error: String,
}

impl Chrome {
    /// Chrome for a logged-in page, with any redirect notices applied.
    #[must_use]
    pub fn for_user(user: &CurrentUser, query: &NoticeQuery) -> Self {
        Self {
            user_name: user.name.clone(),
            logged_in: true,
            notice: query.notice.clone().unwrap_or_default(),
            error: query.error.clone().unwrap_or_default(),
        }
    }

    /// Chrome for a logged-in page without redirect notices.
    #[must_use]
    pub fn bare(user: &CurrentUser) -> Self {
        Self::for_user(user, &NoticeQuery::default())
    }

    /// Chrome for the public pages.
    #[must_use]
    pub fn guest(query: &NoticeQuery) -> Self {
        Self {
            user_name: String::new(),
            logged_in: false,
            notice: query.notice.clone().unwrap_or_default(),
            error: query.error.clone().unwrap_or_default(),
        }
    }

    /// Replace the notice banner (used when rendering a page directly after
    /// a mutation instead of redirecting).
    #[must_use]
    pub fn with_notice(mut self, notice: &str) -> Self {
        self.notice = notice.to_string();
        self
    }

    /// Replace the error banner.
    #[must_use]
    pub fn with_error(mut self, error: &str) -> Self {
        self.error = error.to_string();
        self
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", post(auth::logout))
}

/// Create the relationship routes router.
pub fn relationship_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(relationships::index))
        .route(
            "/add",
            get(relationships::add_page).post(relationships::create),
        )
        .route(
            "/edit/{id}",
            get(relationships::edit_page).post(relationships::update),
        )
        .route("/{id}/delete", post(relationships::delete))
}

/// Create the goal routes router.
pub fn goal_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(goals::index))
        .route("/add", get(goals::add_page).post(goals::create))
        .route("/edit/{id}", get(goals::edit_page).post(goals::update))
        .route("/{id}/progress", post(goals::bump_progress))
        .route("/{id}/delete", post(goals::delete))
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show).post(profile::update))
        .route("/password", post(profile::change_password))
        .route("/avatar", post(profile::upload_avatar))
}

/// Create all routes for the front-end.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Dashboard
        .route("/", get(dashboard::index))
        // Entity collections
        .nest("/relationships", relationship_routes())
        .nest("/goals", goal_routes())
        .nest("/profile", profile_routes())
        // Read-only collections
        .route("/insights", get(insights::index))
        .route("/reports", get(reports::index))
        .route("/reports/{id}", get(reports::show))
        // Compatibility test
        .route(
            "/compatibility",
            get(compatibility::page).post(compatibility::run),
        )
        // Auth
        .merge(auth_routes())
        // Anything else goes home
        .fallback(fallback)
}

/// Redirect unmatched paths to the dashboard.
async fn fallback() -> Redirect {
    Redirect::to("/")
}
