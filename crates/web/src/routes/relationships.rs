//! Relationship list, editor, and delete routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, Path, Query, State},
    response::{IntoResponse, Redirect},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use heartsync_api::{ApiError, HeartSyncClient, Relationship, RelationshipDraft};
use heartsync_core::RelationshipId;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::{Chrome, NoticeQuery};
use crate::state::AppState;
use crate::workflow::{self, EditableEntity, EditorMode, EntityForm, FormError, SubmitError};

/// Where a submission lands when the save succeeded but the list refetch
/// failed. The index GET fetches again; resubmitting the form instead could
/// duplicate a create.
const SAVED_REFRESH_FAILED: &str = "/relationships?notice=Relationship%20saved.&error=The%20list%20could%20not%20be%20refreshed%20just%20now.";

impl EditableEntity for Relationship {
    type Id = RelationshipId;
    type Draft = RelationshipDraft;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn list(
        client: &HeartSyncClient,
    ) -> impl Future<Output = std::result::Result<Vec<Self>, ApiError>> + Send {
        client.list_relationships()
    }

    fn create(
        client: &HeartSyncClient,
        draft: &Self::Draft,
    ) -> impl Future<Output = std::result::Result<Self, ApiError>> + Send {
        client.create_relationship(draft)
    }

    fn update(
        client: &HeartSyncClient,
        id: &Self::Id,
        draft: &Self::Draft,
    ) -> impl Future<Output = std::result::Result<Self, ApiError>> + Send {
        client.update_relationship(id, draft)
    }

    fn delete(
        client: &HeartSyncClient,
        id: &Self::Id,
    ) -> impl Future<Output = std::result::Result<(), ApiError>> + Send {
        client.delete_relationship(id)
    }
}

/// Raw form fields for the relationship editor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelationshipForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub birthday: String,
    #[serde(default)]
    pub anniversary: String,
    #[serde(default)]
    pub submit_token: String,
}

fn parse_optional_date(
    raw: &str,
    field: &'static str,
) -> std::result::Result<Option<NaiveDate>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FormError::InvalidDate(field))
}

impl EntityForm for RelationshipForm {
    type Entity = Relationship;

    fn validate(&self) -> std::result::Result<RelationshipDraft, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::Missing("name"));
        }
        let kind = self.kind.trim();
        if kind.is_empty() {
            return Err(FormError::Missing("type"));
        }

        Ok(RelationshipDraft {
            name: name.to_string(),
            kind: kind.to_string(),
            description: self.description.trim().to_string(),
            birthday: parse_optional_date(&self.birthday, "birthday")?,
            anniversary: parse_optional_date(&self.anniversary, "anniversary")?,
        })
    }
}

impl RelationshipForm {
    fn from_entity(relationship: &Relationship) -> Self {
        Self {
            name: relationship.name.clone(),
            kind: relationship.kind.clone(),
            description: relationship.description.clone(),
            birthday: relationship
                .birthday
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            anniversary: relationship
                .anniversary
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            submit_token: String::new(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// One row on the relationship list.
pub struct RelationshipRow {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub description: String,
}

impl From<Relationship> for RelationshipRow {
    fn from(relationship: Relationship) -> Self {
        Self {
            id: relationship.id.to_string(),
            name: relationship.name,
            kind: relationship.kind,
            description: relationship.description,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "relationships/index.html")]
pub struct RelationshipIndexTemplate {
    pub chrome: Chrome,
    pub relationships: Vec<RelationshipRow>,
}

#[derive(Template, WebTemplate)]
#[template(path = "relationships/form.html")]
pub struct RelationshipFormTemplate {
    pub chrome: Chrome,
    /// Empty for a create form, the entity id for an edit form.
    pub editing_id: String,
    pub form: RelationshipForm,
    pub submit_token: String,
}

fn index_template(
    chrome: Chrome,
    relationships: Vec<Relationship>,
) -> RelationshipIndexTemplate {
    RelationshipIndexTemplate {
        chrome,
        relationships: relationships.into_iter().map(RelationshipRow::from).collect(),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the relationship list.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let client = state.backend(&user.token);
    let relationships = client.list_relationships().await?;
    Ok(index_template(Chrome::for_user(&user, &query), relationships))
}

/// Display the create form.
#[instrument(skip(session, user))]
pub async fn add_page(
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let submit_token = workflow::issue_submit_token(&session).await?;
    Ok(RelationshipFormTemplate {
        chrome: Chrome::bare(&user),
        editing_id: String::new(),
        form: RelationshipForm::default(),
        submit_token,
    })
}

/// Display the edit form pre-filled from the stored entity.
#[instrument(skip(state, session, user))]
pub async fn edit_page(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let client = state.backend(&user.token);
    let id = RelationshipId::from(id);
    let relationship = client.get_relationship(&id).await?;
    let submit_token = workflow::issue_submit_token(&session).await?;
    Ok(RelationshipFormTemplate {
        chrome: Chrome::bare(&user),
        editing_id: id.to_string(),
        form: RelationshipForm::from_entity(&relationship),
        submit_token,
    })
}

async fn handle_submit(
    state: &AppState,
    session: &Session,
    user: &crate::models::CurrentUser,
    mode: EditorMode<Relationship>,
    form: RelationshipForm,
) -> Result<axum::response::Response> {
    let editing_id = match &mode {
        EditorMode::Create => String::new(),
        EditorMode::Edit(id) => id.to_string(),
    };

    if !workflow::consume_submit_token(session, &form.submit_token).await? {
        // Duplicate or stale submission: no request leaves this process.
        let relationships = state.backend(&user.token).list_relationships().await?;
        let chrome =
            Chrome::bare(user).with_error("That form was already submitted.");
        return Ok(index_template(chrome, relationships).into_response());
    }

    let client = state.backend(&user.token);
    match workflow::submit(&client, mode, &form).await {
        Ok(relationships) => {
            let notice = if editing_id.is_empty() {
                "Relationship added."
            } else {
                "Relationship updated."
            };
            let chrome = Chrome::bare(user).with_notice(notice);
            Ok(index_template(chrome, relationships).into_response())
        }
        Err(SubmitError::Invalid(reason)) => {
            // Re-render with the entered values so nothing is lost.
            let submit_token = workflow::issue_submit_token(session).await?;
            let chrome = Chrome::bare(user).with_error(&reason.to_string());
            Ok(RelationshipFormTemplate {
                chrome,
                editing_id,
                form,
                submit_token,
            }
            .into_response())
        }
        Err(SubmitError::Api(err)) => {
            tracing::error!("Relationship save failed: {err}");
            let submit_token = workflow::issue_submit_token(session).await?;
            let chrome =
                Chrome::bare(user).with_error("Could not save the relationship.");
            Ok(RelationshipFormTemplate {
                chrome,
                editing_id,
                form,
                submit_token,
            }
            .into_response())
        }
        Err(SubmitError::Refetch(err)) => {
            // The save landed; offering the form again would invite a
            // duplicate submission.
            tracing::error!("Relationship list refresh failed after save: {err}");
            Ok(Redirect::to(SAVED_REFRESH_FAILED).into_response())
        }
    }
}

/// Create a relationship and show the refreshed list.
#[instrument(skip(state, session, user, form))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Form(form): Form<RelationshipForm>,
) -> Result<impl IntoResponse> {
    handle_submit(&state, &session, &user, EditorMode::Create, form).await
}

/// Update a relationship and show the refreshed list.
#[instrument(skip(state, session, user, form))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Form(form): Form<RelationshipForm>,
) -> Result<impl IntoResponse> {
    let mode = EditorMode::Edit(RelationshipId::from(id));
    handle_submit(&state, &session, &user, mode, form).await
}

/// Delete a relationship. The row leaves the rendered list only after the
/// backend confirms the delete.
#[instrument(skip(state, user))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let client = state.backend(&user.token);
    let relationships = client.list_relationships().await?;
    let id = RelationshipId::from(id);

    let (relationships, outcome) = workflow::remove(&client, relationships, &id).await;
    let chrome = match outcome {
        Ok(()) => Chrome::bare(&user).with_notice("Relationship removed."),
        Err(err) => {
            tracing::error!("Relationship delete failed: {err}");
            Chrome::bare(&user).with_error("Could not delete the relationship.")
        }
    };
    Ok(index_template(chrome, relationships))
}
