//! Local form checks that gate every mutation: nothing reaches the backend
//! until the form validates, and progress bumps never escape the 0..=100
//! range.

use heartsync_core::{GoalCategory, Progress, RelationshipId};
use heartsync_web::routes::compatibility::CompatibilityForm;
use heartsync_web::routes::goals::{self, GoalForm};
use heartsync_web::routes::profile::{PasswordForm, ProfileForm};
use heartsync_web::routes::relationships::RelationshipForm;
use heartsync_web::workflow::{EntityForm, FormError, token_matches};

fn goal_form() -> GoalForm {
    GoalForm {
        title: "Weekly date night".to_string(),
        description: "One evening out every week".to_string(),
        target_date: "2026-12-31".to_string(),
        category: "Quality Time".to_string(),
        progress: "40".to_string(),
        relationship_id: "r42".to_string(),
        submit_token: String::new(),
    }
}

// =============================================================================
// Goal editor
// =============================================================================

#[test]
fn test_goal_form_full_round_trip() {
    let draft = goal_form().validate().expect("valid form");
    assert_eq!(draft.title, "Weekly date night");
    assert_eq!(draft.category, GoalCategory::QualityTime);
    assert_eq!(draft.progress.value(), 40);
    assert_eq!(draft.relationship_id, Some(RelationshipId::from("r42")));
}

#[test]
fn test_goal_form_rejects_every_missing_required_field() {
    let blank = GoalForm::default();
    assert!(matches!(blank.validate(), Err(FormError::Missing("title"))));

    let form = GoalForm {
        description: String::new(),
        ..goal_form()
    };
    assert!(matches!(
        form.validate(),
        Err(FormError::Missing("description"))
    ));

    let form = GoalForm {
        category: "Gardening".to_string(),
        ..goal_form()
    };
    assert!(matches!(
        form.validate(),
        Err(FormError::Missing("category"))
    ));
}

#[test]
fn test_goal_form_date_and_progress_bounds() {
    let form = GoalForm {
        target_date: "2026-13-01".to_string(),
        ..goal_form()
    };
    assert!(matches!(
        form.validate(),
        Err(FormError::InvalidDate("target date"))
    ));

    let form = GoalForm {
        progress: "101".to_string(),
        ..goal_form()
    };
    assert!(matches!(
        form.validate(),
        Err(FormError::InvalidNumber("progress"))
    ));
}

#[test]
fn test_progress_bump_clamps_and_never_decreases() {
    for start in [0_u8, 50, 95, 100] {
        let current = Progress::new(start).expect("in range");
        let next = goals::bumped_progress(current, None);
        assert!(next >= current, "bump from {start} went backwards");
        assert!(next.value() <= 100, "bump from {start} overshot");
    }
    assert_eq!(
        goals::bumped_progress(Progress::new(95).expect("in range"), None),
        Progress::COMPLETE
    );
}

// =============================================================================
// Relationship editor
// =============================================================================

#[test]
fn test_relationship_form_requires_name_and_type() {
    let form = RelationshipForm {
        name: "Jamie".to_string(),
        kind: "Partner".to_string(),
        ..RelationshipForm::default()
    };
    assert!(form.validate().is_ok());

    let form = RelationshipForm::default();
    assert!(matches!(form.validate(), Err(FormError::Missing("name"))));
}

// =============================================================================
// Compatibility form
// =============================================================================

#[test]
fn test_compatibility_form_checks_all_six_fields() {
    let full = CompatibilityForm {
        partner1_name: "Ada".to_string(),
        partner1_age: "33".to_string(),
        partner1_interests: "chess".to_string(),
        partner2_name: "Grace".to_string(),
        partner2_age: "35".to_string(),
        partner2_interests: "sailing".to_string(),
    };
    assert!(full.validate().is_ok());

    // Second partner's fields are checked just as strictly as the first's.
    let form = CompatibilityForm {
        partner2_age: "unknown".to_string(),
        ..full.clone()
    };
    assert!(matches!(
        form.validate(),
        Err(FormError::InvalidNumber("partner 2 age"))
    ));

    let form = CompatibilityForm {
        partner2_interests: "  ".to_string(),
        ..full
    };
    assert!(matches!(
        form.validate(),
        Err(FormError::Missing("partner 2 interests"))
    ));
}

// =============================================================================
// Profile forms
// =============================================================================

#[test]
fn test_password_change_gates_on_local_match() {
    let form = PasswordForm {
        password: "correct horse".to_string(),
        password_confirm: "correct hors".to_string(),
    };
    assert!(matches!(form.validate(), Err(FormError::PasswordMismatch)));

    let form = PasswordForm {
        password: "correct horse".to_string(),
        password_confirm: "correct horse".to_string(),
    };
    assert!(form.validate().is_ok());
}

#[test]
fn test_profile_form_validates_email() {
    let form = ProfileForm {
        name: "Ada".to_string(),
        email: "ada-at-example.com".to_string(),
        ..ProfileForm::default()
    };
    assert!(matches!(form.validate(), Err(FormError::Missing("email"))));
}

// =============================================================================
// One-shot submit tokens
// =============================================================================

#[test]
fn test_submit_token_matches_only_its_own_value() {
    assert!(token_matches(Some("t-1".to_string()), "t-1"));
    assert!(!token_matches(Some("t-1".to_string()), "t-2"));
    assert!(!token_matches(None, "t-1"));
    assert!(!token_matches(Some(String::new()), ""));
}
