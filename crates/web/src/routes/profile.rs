//! Profile settings routes: details, preferences, password, avatar.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, Multipart, Query, State},
    response::IntoResponse,
};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use heartsync_api::{Preferences, Profile, ProfileDraft};
use heartsync_core::{Email, Theme};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::{Chrome, NoticeQuery};
use crate::state::AppState;
use crate::workflow::FormError;

/// Details-and-preferences form. Checkboxes only post a value when ticked,
/// so the booleans default to off.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub email_notifications: Option<String>,
    #[serde(default)]
    pub push_notifications: Option<String>,
    #[serde(default)]
    pub theme: String,
}

impl ProfileForm {
    /// Validate into a draft for the update call.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] when the name or email is missing or the
    /// email does not parse.
    pub fn validate(&self) -> std::result::Result<ProfileDraft, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::Missing("name"));
        }
        let email = Email::parse(&self.email).map_err(|_| FormError::Missing("email"))?;

        Ok(ProfileDraft {
            name: name.to_string(),
            email: email.to_string(),
            bio: self.bio.trim().to_string(),
            preferences: Preferences {
                email_notifications: self.email_notifications.is_some(),
                push_notifications: self.push_notifications.is_some(),
                theme: Theme::from_str_opt(self.theme.trim()).unwrap_or_default(),
            },
        })
    }

    fn from_profile(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            bio: profile.bio.clone(),
            email_notifications: profile
                .preferences
                .email_notifications
                .then(|| "on".to_string()),
            push_notifications: profile
                .preferences
                .push_notifications
                .then(|| "on".to_string()),
            theme: profile.preferences.theme.as_str().to_string(),
        }
    }
}

/// Password change form.
#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
}

impl PasswordForm {
    /// Check the pair locally; nothing reaches the backend until both
    /// fields agree.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] if a field is empty or the two don't match.
    pub fn validate(&self) -> std::result::Result<SecretString, FormError> {
        if self.password.is_empty() {
            return Err(FormError::Missing("password"));
        }
        if self.password != self.password_confirm {
            return Err(FormError::PasswordMismatch);
        }
        Ok(SecretString::from(self.password.clone()))
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub chrome: Chrome,
    pub form: ProfileForm,
    pub avatar: String,
    pub themes: Vec<&'static str>,
}

fn profile_template(chrome: Chrome, profile: &Profile) -> ProfileTemplate {
    ProfileTemplate {
        chrome,
        form: ProfileForm::from_profile(profile),
        avatar: profile.avatar.clone().unwrap_or_default(),
        themes: Theme::ALL.iter().map(|t| t.as_str()).collect(),
    }
}

/// Display the profile settings page.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let client = state.backend(&user.token);
    let profile = client.get_profile().await?;
    Ok(profile_template(Chrome::for_user(&user, &query), &profile))
}

/// Save details and preferences, then show the stored state.
#[instrument(skip(state, user, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<ProfileForm>,
) -> Result<impl IntoResponse> {
    let client = state.backend(&user.token);

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(reason) => {
            let profile = client.get_profile().await?;
            let chrome = Chrome::bare(&user).with_error(&reason.to_string());
            // Keep what the user typed, not the stored values.
            let mut template = profile_template(chrome, &profile);
            template.form = form;
            return Ok(template);
        }
    };

    client.update_profile(&draft).await?;
    // Render from a fresh fetch so the page always shows what the backend
    // actually stored.
    let profile = client.get_profile().await?;
    let chrome = Chrome::bare(&user).with_notice("Profile updated.");
    Ok(profile_template(chrome, &profile))
}

/// Change the account password.
#[instrument(skip(state, user, form))]
pub async fn change_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<PasswordForm>,
) -> Result<impl IntoResponse> {
    let client = state.backend(&user.token);

    let password = match form.validate() {
        Ok(password) => password,
        Err(reason) => {
            let profile = client.get_profile().await?;
            let chrome = Chrome::bare(&user).with_error(&reason.to_string());
            return Ok(profile_template(chrome, &profile));
        }
    };

    client.change_password(&password).await?;
    let profile = client.get_profile().await?;
    let chrome = Chrome::bare(&user).with_notice("Password changed.");
    Ok(profile_template(chrome, &profile))
}

/// Upload a new avatar image.
#[instrument(skip(state, user, multipart))]
pub async fn upload_avatar(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let client = state.backend(&user.token);

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("Malformed upload".to_string()))?
    {
        if field.name() == Some("avatar") {
            let file_name = field.file_name().unwrap_or("avatar").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|_| AppError::BadRequest("Malformed upload".to_string()))?;
            upload = Some((file_name, bytes.to_vec()));
            break;
        }
    }

    let Some((file_name, bytes)) = upload else {
        let profile = client.get_profile().await?;
        let chrome = Chrome::bare(&user).with_error("No image was selected.");
        return Ok(profile_template(chrome, &profile));
    };

    let chrome = match client.upload_avatar(file_name, bytes).await {
        Ok(_) => Chrome::bare(&user).with_notice("Avatar updated."),
        Err(err) => {
            tracing::error!("Avatar upload failed: {err}");
            Chrome::bare(&user).with_error("Could not upload the avatar.")
        }
    };
    let profile = client.get_profile().await?;
    Ok(profile_template(chrome, &profile))
}
