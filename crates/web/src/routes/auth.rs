//! Authentication route handlers.
//!
//! Login and signup forward credentials to the external identity endpoint;
//! the only state kept here is the session record written on success. Failed
//! attempts redirect back with an error notice and never leak backend detail.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use heartsync_core::Email;

use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::routes::{Chrome, NoticeQuery};
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub chrome: Chrome,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub chrome: Chrome,
}

/// Display the login page. Already-authenticated visitors go straight to
/// the dashboard.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<NoticeQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    LoginTemplate {
        chrome: Chrome::guest(&query),
    }
    .into_response()
}

/// Handle login form submission.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    // Structural validation only; the backend decides whether the account
    // exists.
    if Email::parse(&form.email).is_err() {
        return Redirect::to("/login?error=Enter%20a%20valid%20email%20address").into_response();
    }
    if form.password.is_empty() {
        return Redirect::to("/login?error=Password%20is%20required").into_response();
    }

    let password = SecretString::from(form.password);
    match heartsync_api::auth::login(state.http(), &state.config().api_url, &form.email, &password)
        .await
    {
        Ok(auth) => {
            let user = CurrentUser {
                name: auth.user.name,
                email: auth.user.email,
                token: auth.token,
            };
            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to write session: {e}");
                return Redirect::to("/login?error=Could%20not%20start%20a%20session")
                    .into_response();
            }
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            Redirect::to("/login?error=Login%20failed.%20Check%20your%20email%20and%20password")
                .into_response()
        }
    }
}

/// Display the signup page. Already-authenticated visitors go straight to
/// the dashboard.
pub async fn signup_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<NoticeQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    SignupTemplate {
        chrome: Chrome::guest(&query),
    }
    .into_response()
}

/// Handle signup form submission.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Response {
    if form.name.trim().is_empty() {
        return Redirect::to("/signup?error=Name%20is%20required").into_response();
    }
    if Email::parse(&form.email).is_err() {
        return Redirect::to("/signup?error=Enter%20a%20valid%20email%20address").into_response();
    }
    if form.password.is_empty() {
        return Redirect::to("/signup?error=Password%20is%20required").into_response();
    }
    // Confirmation matching happens here, before any network call.
    if form.password != form.password_confirm {
        return Redirect::to("/signup?error=Passwords%20do%20not%20match").into_response();
    }

    let password = SecretString::from(form.password);
    match heartsync_api::auth::signup(
        state.http(),
        &state.config().api_url,
        form.name.trim(),
        &form.email,
        &password,
    )
    .await
    {
        Ok(auth) => {
            let user = CurrentUser {
                name: auth.user.name,
                email: auth.user.email,
                token: auth.token,
            };
            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to write session: {e}");
                return Redirect::to("/login?error=Could%20not%20start%20a%20session")
                    .into_response();
            }
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::warn!("Signup failed: {e}");
            let message = e.to_string();
            if message.contains("taken") || message.contains("exists") {
                Redirect::to("/signup?error=An%20account%20with%20this%20email%20already%20exists")
                    .into_response()
            } else {
                Redirect::to("/signup?error=Signup%20failed.%20Please%20try%20again")
                    .into_response()
            }
        }
    }
}

/// Handle logout: destroy the session record and return to login.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }
    Redirect::to("/login").into_response()
}
