//! Generic create/edit/delete workflow for user-owned entities.
//!
//! One state machine covers every entity kind instead of per-entity dialog
//! handlers dispatching on field names: an entity implements
//! [`EditableEntity`] (its id, its draft payload, its CRUD calls) and each of
//! its forms implements [`EntityForm`] (required-field validation producing
//! the draft). Create vs. edit is a tagged [`EditorMode`] variant.
//!
//! Consistency rules:
//! - `submit` validates first (a validation failure makes no remote call),
//!   then dispatches create/update, then refetches the full list so ordering
//!   and derived fields stay authoritative. The list is eventually, not
//!   immediately, consistent with the backend.
//! - `remove` splices the entity out of the caller's list only after the
//!   server confirms the delete; a failed delete hands the list back
//!   untouched.
//! - Each rendered form carries a one-shot submission token held in the
//!   session; submitting consumes it, so repeated activation of the same
//!   form yields exactly one remote call.

use thiserror::Error;
use tower_sessions::Session;
use uuid::Uuid;

use heartsync_api::{ApiError, HeartSyncClient};

use crate::models::session_keys;

/// Validation error for a form field.
///
/// Pre-submit validation is limited to required-field presence plus the two
/// special cases (password confirmation, numeric age); cross-field business
/// rules belong to the backend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} must be a valid date (YYYY-MM-DD)")]
    InvalidDate(&'static str),
    #[error("{0} must be a whole number")]
    InvalidNumber(&'static str),
    #[error("passwords do not match")]
    PasswordMismatch,
}

/// An entity the generic workflow can drive.
///
/// `Draft` is the typed payload the backend accepts for both create and
/// update; the id is always server-assigned.
pub trait EditableEntity: Sized + Send {
    type Id: PartialEq + std::fmt::Display + Send + Sync;
    type Draft: Send + Sync;

    /// The entity's server-assigned id.
    fn id(&self) -> &Self::Id;

    fn list(
        client: &HeartSyncClient,
    ) -> impl Future<Output = Result<Vec<Self>, ApiError>> + Send;

    fn create(
        client: &HeartSyncClient,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<Self, ApiError>> + Send;

    fn update(
        client: &HeartSyncClient,
        id: &Self::Id,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<Self, ApiError>> + Send;

    fn delete(
        client: &HeartSyncClient,
        id: &Self::Id,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// A form that edits one entity kind.
///
/// Validation is the only pure step of the submission machine: it either
/// yields the typed draft or names the first offending field, and no remote
/// call happens in the latter case.
pub trait EntityForm {
    type Entity: EditableEntity;

    fn validate(&self) -> Result<<Self::Entity as EditableEntity>::Draft, FormError>;
}

/// Whether the open form creates a new entity or edits an existing one.
#[derive(Debug, Clone)]
pub enum EditorMode<E: EditableEntity> {
    Create,
    Edit(E::Id),
}

/// Submission failure.
///
/// `Invalid` and `Api` mean nothing was saved: the caller re-renders the form
/// with the entered data so the user can retry. `Refetch` means the save
/// landed and only the follow-up list fetch failed; the caller must NOT offer
/// the form again (resubmitting a create would duplicate the entity).
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    /// The create/update call itself failed.
    #[error(transparent)]
    Api(ApiError),
    /// Saved, but the post-mutation list refetch failed.
    #[error("saved, but the list could not be refreshed: {0}")]
    Refetch(ApiError),
}

/// Validate and submit a form, then resynchronize.
///
/// On success the returned list is the backend's current state, refetched
/// after the mutation.
///
/// # Errors
///
/// [`SubmitError::Invalid`] if validation fails (no remote call was made);
/// [`SubmitError::Api`] if the create/update fails (nothing saved);
/// [`SubmitError::Refetch`] if the save succeeded but the refetch did not.
pub async fn submit<F: EntityForm>(
    client: &HeartSyncClient,
    mode: EditorMode<F::Entity>,
    form: &F,
) -> Result<Vec<F::Entity>, SubmitError> {
    let draft = form.validate()?;

    match mode {
        EditorMode::Create => {
            F::Entity::create(client, &draft)
                .await
                .map_err(SubmitError::Api)?;
        }
        EditorMode::Edit(id) => {
            F::Entity::update(client, &id, &draft)
                .await
                .map_err(SubmitError::Api)?;
        }
    }

    // Mutate, then resynchronize: ordering and derived fields come from the
    // backend, never from a local patch.
    F::Entity::list(client).await.map_err(SubmitError::Refetch)
}

/// Delete an entity and splice it out of an already-fetched list.
///
/// The local removal happens only after the server confirms success, so a
/// failed delete hands back the original list element-for-element intact.
/// No refetch is needed: removal does not disturb the order of the rest.
pub async fn remove<E: EditableEntity>(
    client: &HeartSyncClient,
    mut list: Vec<E>,
    id: &E::Id,
) -> (Vec<E>, Result<(), ApiError>) {
    match E::delete(client, id).await {
        Ok(()) => {
            list.retain(|entity| entity.id() != id);
            (list, Ok(()))
        }
        Err(err) => (list, Err(err)),
    }
}

/// Compare the token removed from the session against the one the form
/// posted. Removal happens before the comparison, so a second post of the
/// same form finds nothing stored and is rejected.
#[must_use]
pub fn token_matches(stored: Option<String>, presented: &str) -> bool {
    !presented.is_empty() && stored.as_deref() == Some(presented)
}

/// Issue a fresh one-shot submission token and store it in the session.
///
/// The returned value goes into a hidden form field; [`consume_submit_token`]
/// checks it on the way back.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn issue_submit_token(
    session: &Session,
) -> Result<String, tower_sessions::session::Error> {
    let token = Uuid::new_v4().to_string();
    session.insert(session_keys::SUBMIT_TOKEN, &token).await?;
    Ok(token)
}

/// Take the stored submission token and compare it to the presented one.
///
/// Returns `true` exactly once per issued token; the caller must not make
/// any remote call when this returns `false`.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn consume_submit_token(
    session: &Session,
    presented: &str,
) -> Result<bool, tower_sessions::session::Error> {
    let stored: Option<String> = session.remove(session_keys::SUBMIT_TOKEN).await?;
    Ok(token_matches(stored, presented))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_matches_exactly_once_semantics() {
        let issued = "f81d4fae-7dec-11d0-a765-00a0c91e6bf6".to_string();

        // First presentation: stored token available, values equal.
        assert!(token_matches(Some(issued.clone()), &issued));

        // Second presentation: the store is empty after removal.
        assert!(!token_matches(None, &issued));
    }

    #[test]
    fn test_token_rejects_mismatch_and_empty() {
        assert!(!token_matches(Some("a".to_string()), "b"));
        assert!(!token_matches(Some(String::new()), ""));
        assert!(!token_matches(None, ""));
    }

    #[test]
    fn test_submit_error_separates_save_failure_from_refresh_failure() {
        let backend_down = || ApiError::Api {
            status: 503,
            message: "maintenance".to_string(),
        };

        let save_failed = SubmitError::Api(backend_down());
        let refresh_failed = SubmitError::Refetch(backend_down());

        assert!(!save_failed.to_string().contains("saved"));
        assert!(refresh_failed.to_string().starts_with("saved, but"));
    }

    #[test]
    fn test_form_error_messages() {
        assert_eq!(FormError::Missing("title").to_string(), "title is required");
        assert_eq!(
            FormError::PasswordMismatch.to_string(),
            "passwords do not match"
        );
    }
}
