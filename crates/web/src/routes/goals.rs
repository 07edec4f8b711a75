//! Goal tracker routes: list, editor, progress bump, delete.

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

use heartsync_api::{ApiError, Goal, GoalDraft, HeartSyncClient, Relationship};
use heartsync_core::{GoalCategory, GoalId, Progress, RelationshipId};

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::routes::{Chrome, NoticeQuery};
use crate::state::AppState;
use crate::workflow::{self, EditableEntity, EditorMode, EntityForm, FormError, SubmitError};

/// Default progress step when the bump form doesn't name one.
const PROGRESS_STEP: u8 = 10;

/// Where a submission lands when the save succeeded but the list refetch
/// failed. The index GET fetches again; resubmitting the form instead could
/// duplicate a create.
const SAVED_REFRESH_FAILED: &str =
    "/goals?notice=Goal%20saved.&error=The%20list%20could%20not%20be%20refreshed%20just%20now.";

impl EditableEntity for Goal {
    type Id = GoalId;
    type Draft = GoalDraft;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn list(
        client: &HeartSyncClient,
    ) -> impl Future<Output = std::result::Result<Vec<Self>, ApiError>> + Send {
        client.list_goals()
    }

    fn create(
        client: &HeartSyncClient,
        draft: &Self::Draft,
    ) -> impl Future<Output = std::result::Result<Self, ApiError>> + Send {
        client.create_goal(draft)
    }

    fn update(
        client: &HeartSyncClient,
        id: &Self::Id,
        draft: &Self::Draft,
    ) -> impl Future<Output = std::result::Result<Self, ApiError>> + Send {
        client.update_goal(id, draft)
    }

    fn delete(
        client: &HeartSyncClient,
        id: &Self::Id,
    ) -> impl Future<Output = std::result::Result<(), ApiError>> + Send {
        client.delete_goal(id)
    }
}

/// Raw form fields for the goal editor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub progress: String,
    #[serde(default)]
    pub relationship_id: String,
    #[serde(default)]
    pub submit_token: String,
}

impl EntityForm for GoalForm {
    type Entity = Goal;

    fn validate(&self) -> std::result::Result<GoalDraft, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::Missing("title"));
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(FormError::Missing("description"));
        }
        let target_date = NaiveDate::parse_from_str(self.target_date.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate("target date"))?;
        let category = GoalCategory::from_label(self.category.trim())
            .ok_or(FormError::Missing("category"))?;

        let progress = if self.progress.trim().is_empty() {
            Progress::ZERO
        } else {
            let raw: u8 = self
                .progress
                .trim()
                .parse()
                .map_err(|_| FormError::InvalidNumber("progress"))?;
            Progress::new(raw).ok_or(FormError::InvalidNumber("progress"))?
        };

        let relationship_id = match self.relationship_id.trim() {
            "" => None,
            id => Some(RelationshipId::from(id)),
        };

        Ok(GoalDraft {
            title: title.to_string(),
            description: description.to_string(),
            target_date,
            category,
            progress,
            relationship_id,
        })
    }
}

impl GoalForm {
    fn from_entity(goal: &Goal) -> Self {
        Self {
            title: goal.title.clone(),
            description: goal.description.clone(),
            target_date: goal.target_date.format("%Y-%m-%d").to_string(),
            category: goal.category.label().to_string(),
            progress: goal.progress.value().to_string(),
            relationship_id: goal
                .relationship_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            submit_token: String::new(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// One card on the goal list.
pub struct GoalRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub target_date: String,
    pub progress: u8,
    pub completed: bool,
}

impl From<Goal> for GoalRow {
    fn from(goal: Goal) -> Self {
        Self {
            id: goal.id.to_string(),
            title: goal.title,
            description: goal.description,
            category: goal.category.label().to_string(),
            target_date: goal.target_date.format("%Y-%m-%d").to_string(),
            progress: goal.progress.value(),
            completed: goal.completed,
        }
    }
}

/// An option in the relationship `<select>`.
pub struct RelationshipOption {
    pub id: String,
    pub name: String,
}

impl From<Relationship> for RelationshipOption {
    fn from(relationship: Relationship) -> Self {
        Self {
            id: relationship.id.to_string(),
            name: relationship.name,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "goals/index.html")]
pub struct GoalIndexTemplate {
    pub chrome: Chrome,
    pub goals: Vec<GoalRow>,
}

#[derive(Template, WebTemplate)]
#[template(path = "goals/form.html")]
pub struct GoalFormTemplate {
    pub chrome: Chrome,
    /// Empty for a create form, the entity id for an edit form.
    pub editing_id: String,
    pub form: GoalForm,
    pub categories: Vec<&'static str>,
    pub relationships: Vec<RelationshipOption>,
    pub submit_token: String,
}

fn index_template(chrome: Chrome, goals: Vec<Goal>) -> GoalIndexTemplate {
    GoalIndexTemplate {
        chrome,
        goals: goals.into_iter().map(GoalRow::from).collect(),
    }
}

fn category_labels() -> Vec<&'static str> {
    GoalCategory::ALL.iter().map(|c| c.label()).collect()
}

/// Load the relationships for the form's link dropdown, degrading to an
/// empty list if that collection is unavailable.
async fn relationship_options(client: &HeartSyncClient) -> Vec<RelationshipOption> {
    match client.list_relationships().await {
        Ok(relationships) => relationships.into_iter().map(RelationshipOption::from).collect(),
        Err(err) => {
            tracing::warn!("Failed to load relationships for goal form: {err}");
            Vec::new()
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the goal list.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let client = state.backend(&user.token);
    let goals = client.list_goals().await?;
    Ok(index_template(Chrome::for_user(&user, &query), goals))
}

/// Display the create form.
#[instrument(skip(state, session, user))]
pub async fn add_page(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let client = state.backend(&user.token);
    let relationships = relationship_options(&client).await;
    let submit_token = workflow::issue_submit_token(&session).await?;
    Ok(GoalFormTemplate {
        chrome: Chrome::bare(&user),
        editing_id: String::new(),
        form: GoalForm::default(),
        categories: category_labels(),
        relationships,
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
    let id = GoalId::from(id);

    // No single-goal endpoint, so pull the list and pick the row out.
    let goals = client.list_goals().await?;
    let goal = goals
        .iter()
        .find(|g| g.id == id)
        .ok_or_else(|| crate::error::AppError::NotFound(format!("goal {id}")))?;

    let relationships = relationship_options(&client).await;
    let submit_token = workflow::issue_submit_token(&session).await?;
    Ok(GoalFormTemplate {
        chrome: Chrome::bare(&user),
        editing_id: id.to_string(),
        form: GoalForm::from_entity(goal),
        categories: category_labels(),
        relationships,
        submit_token,
    })
}

async fn handle_submit(
    state: &AppState,
    session: &Session,
    user: &CurrentUser,
    mode: EditorMode<Goal>,
    form: GoalForm,
) -> Result<axum::response::Response> {
    let editing_id = match &mode {
        EditorMode::Create => String::new(),
        EditorMode::Edit(id) => id.to_string(),
    };

    if !workflow::consume_submit_token(session, &form.submit_token).await? {
        // Duplicate or stale submission: no request leaves this process.
        let goals = state.backend(&user.token).list_goals().await?;
        let chrome = Chrome::bare(user).with_error("That form was already submitted.");
        return Ok(index_template(chrome, goals).into_response());
    }

    let client = state.backend(&user.token);
    match workflow::submit(&client, mode, &form).await {
        Ok(goals) => {
            let notice = if editing_id.is_empty() {
                "Goal added."
            } else {
                "Goal updated."
            };
            let chrome = Chrome::bare(user).with_notice(notice);
            Ok(index_template(chrome, goals).into_response())
        }
        Err(SubmitError::Invalid(reason)) => {
            let relationships = relationship_options(&client).await;
            let submit_token = workflow::issue_submit_token(session).await?;
            let chrome = Chrome::bare(user).with_error(&reason.to_string());
            Ok(GoalFormTemplate {
                chrome,
                editing_id,
                form,
                categories: category_labels(),
                relationships,
                submit_token,
            }
            .into_response())
        }
        Err(SubmitError::Api(err)) => {
            tracing::error!("Goal save failed: {err}");
            let relationships = relationship_options(&client).await;
            let submit_token = workflow::issue_submit_token(session).await?;
            let chrome = Chrome::bare(user).with_error("Could not save the goal.");
            Ok(GoalFormTemplate {
                chrome,
                editing_id,
                form,
                categories: category_labels(),
                relationships,
                submit_token,
            }
            .into_response())
        }
        Err(SubmitError::Refetch(err)) => {
            // The save landed; offering the form again would invite a
            // duplicate submission.
            tracing::error!("Goal list refresh failed after save: {err}");
            Ok(Redirect::to(SAVED_REFRESH_FAILED).into_response())
        }
    }
}

/// Create a goal and show the refreshed list.
#[instrument(skip(state, session, user, form))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Form(form): Form<GoalForm>,
) -> Result<impl IntoResponse> {
    handle_submit(&state, &session, &user, EditorMode::Create, form).await
}

/// Update a goal and show the refreshed list.
#[instrument(skip(state, session, user, form))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Form(form): Form<GoalForm>,
) -> Result<impl IntoResponse> {
    let mode = EditorMode::Edit(GoalId::from(id));
    handle_submit(&state, &session, &user, mode, form).await
}

/// Bump form body. The step is optional so plain "+10" buttons can post an
/// empty form.
#[derive(Debug, Deserialize)]
pub struct BumpForm {
    #[serde(default)]
    pub step: Option<u8>,
}

/// Compute the bumped progress for a goal.
///
/// Pure so the clamp is testable: the result never exceeds 100 and never
/// goes backwards.
#[must_use]
pub fn bumped_progress(current: Progress, step: Option<u8>) -> Progress {
    current.bumped(step.unwrap_or(PROGRESS_STEP))
}

/// Advance a goal's progress by one step and show the refreshed list.
#[instrument(skip(state, user, form))]
pub async fn bump_progress(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Form(form): Form<BumpForm>,
) -> Result<impl IntoResponse> {
    let client = state.backend(&user.token);
    let id = GoalId::from(id);

    let goals = client.list_goals().await?;
    let goal = goals
        .iter()
        .find(|g| g.id == id)
        .ok_or_else(|| crate::error::AppError::NotFound(format!("goal {id}")))?;

    let next = bumped_progress(goal.progress, form.step);
    let chrome = match client.set_goal_progress(&id, next).await {
        Ok(_) => Chrome::bare(&user).with_notice("Progress updated."),
        Err(err) => {
            tracing::error!("Progress update failed: {err}");
            Chrome::bare(&user).with_error("Could not update progress.")
        }
    };

    let goals = client.list_goals().await?;
    Ok(index_template(chrome, goals))
}

/// Delete a goal. The card leaves the rendered list only after the backend
/// confirms the delete.
#[instrument(skip(state, user))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let client = state.backend(&user.token);
    let goals = client.list_goals().await?;
    let id = GoalId::from(id);

    let (goals, outcome) = workflow::remove(&client, goals, &id).await;
    let chrome = match outcome {
        Ok(()) => Chrome::bare(&user).with_notice("Goal removed."),
        Err(err) => {
            tracing::error!("Goal delete failed: {err}");
            Chrome::bare(&user).with_error("Could not delete the goal.")
        }
    };
    Ok(index_template(chrome, goals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_failure_lands_on_index_not_the_form() {
        // A failed refetch after a successful save must never re-offer the
        // form; the redirect goes to the index and names both outcomes.
        assert!(SAVED_REFRESH_FAILED.starts_with("/goals?"));
        assert!(SAVED_REFRESH_FAILED.contains("notice=Goal%20saved."));
        assert!(SAVED_REFRESH_FAILED.contains("error=The%20list%20could%20not%20be%20refreshed"));
        assert!(!SAVED_REFRESH_FAILED.contains("edit"));
        assert!(!SAVED_REFRESH_FAILED.contains("add"));
    }

    fn filled_form() -> GoalForm {
        GoalForm {
            title: "Weekly date night".to_string(),
            description: "One evening out every week".to_string(),
            target_date: "2026-12-31".to_string(),
            category: "Quality Time".to_string(),
            progress: "40".to_string(),
            relationship_id: String::new(),
            submit_token: String::new(),
        }
    }

    #[test]
    fn test_validate_accepts_filled_form() {
        let draft = filled_form().validate().expect("valid form");
        assert_eq!(draft.title, "Weekly date night");
        assert_eq!(draft.category, GoalCategory::QualityTime);
        assert_eq!(draft.progress.value(), 40);
        assert!(draft.relationship_id.is_none());
    }

    #[test]
    fn test_validate_requires_title() {
        let form = GoalForm {
            title: "  ".to_string(),
            ..filled_form()
        };
        assert!(matches!(form.validate(), Err(FormError::Missing("title"))));
    }

    #[test]
    fn test_validate_rejects_unknown_category() {
        let form = GoalForm {
            category: "Snowboarding".to_string(),
            ..filled_form()
        };
        assert!(matches!(
            form.validate(),
            Err(FormError::Missing("category"))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_date() {
        let form = GoalForm {
            target_date: "soon".to_string(),
            ..filled_form()
        };
        assert!(matches!(
            form.validate(),
            Err(FormError::InvalidDate("target date"))
        ));
    }

    #[test]
    fn test_validate_rejects_progress_over_100() {
        let form = GoalForm {
            progress: "120".to_string(),
            ..filled_form()
        };
        assert!(matches!(
            form.validate(),
            Err(FormError::InvalidNumber("progress"))
        ));
    }

    #[test]
    fn test_validate_empty_progress_defaults_to_zero() {
        let form = GoalForm {
            progress: String::new(),
            ..filled_form()
        };
        let draft = form.validate().expect("valid form");
        assert_eq!(draft.progress, Progress::ZERO);
    }

    #[test]
    fn test_validate_keeps_relationship_link() {
        let form = GoalForm {
            relationship_id: "r7".to_string(),
            ..filled_form()
        };
        let draft = form.validate().expect("valid form");
        assert_eq!(draft.relationship_id, Some(RelationshipId::from("r7")));
    }

    #[test]
    fn test_bump_clamps_at_complete() {
        let progress = Progress::new(95).expect("in range");
        assert_eq!(bumped_progress(progress, None), Progress::COMPLETE);
    }

    #[test]
    fn test_bump_uses_default_step() {
        let progress = Progress::new(40).expect("in range");
        assert_eq!(bumped_progress(progress, None).value(), 50);
    }

    #[test]
    fn test_bump_honors_explicit_step() {
        let progress = Progress::new(40).expect("in range");
        assert_eq!(bumped_progress(progress, Some(25)).value(), 65);
    }
}
