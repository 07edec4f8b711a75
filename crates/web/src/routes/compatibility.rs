//! Compatibility test page.
//!
//! A two-partner form posted to the backend's evaluator. Validation is all
//! local and runs before anything leaves the process; a failed submission
//! re-renders the form with everything the user typed.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use heartsync_api::{CompatibilityRequest, Partner};

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::Chrome;
use crate::state::AppState;
use crate::workflow::FormError;

/// Raw form fields, both partners flattened into one body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompatibilityForm {
    #[serde(default)]
    pub partner1_name: String,
    #[serde(default)]
    pub partner1_age: String,
    #[serde(default)]
    pub partner1_interests: String,
    #[serde(default)]
    pub partner2_name: String,
    #[serde(default)]
    pub partner2_age: String,
    #[serde(default)]
    pub partner2_interests: String,
}

fn parse_partner(
    name: &str,
    age: &str,
    interests: &str,
    name_field: &'static str,
    age_field: &'static str,
    interests_field: &'static str,
) -> std::result::Result<Partner, FormError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FormError::Missing(name_field));
    }
    let age: u32 = age
        .trim()
        .parse()
        .map_err(|_| FormError::InvalidNumber(age_field))?;
    let interests = interests.trim();
    if interests.is_empty() {
        return Err(FormError::Missing(interests_field));
    }
    Ok(Partner {
        name: name.to_string(),
        age,
        interests: interests.to_string(),
    })
}

impl CompatibilityForm {
    /// Validate every field of both partners.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] encountered, partner 1 first.
    pub fn validate(&self) -> std::result::Result<CompatibilityRequest, FormError> {
        let partner1 = parse_partner(
            &self.partner1_name,
            &self.partner1_age,
            &self.partner1_interests,
            "partner 1 name",
            "partner 1 age",
            "partner 1 interests",
        )?;
        let partner2 = parse_partner(
            &self.partner2_name,
            &self.partner2_age,
            &self.partner2_interests,
            "partner 2 name",
            "partner 2 age",
            "partner 2 interests",
        )?;
        Ok(CompatibilityRequest { partner1, partner2 })
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "compatibility.html")]
pub struct CompatibilityTemplate {
    pub chrome: Chrome,
    pub form: CompatibilityForm,
    /// Empty until an evaluation has run.
    pub result_message: String,
}

/// Display the blank compatibility form.
#[instrument(skip(user))]
pub async fn page(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    CompatibilityTemplate {
        chrome: Chrome::bare(&user),
        form: CompatibilityForm::default(),
        result_message: String::new(),
    }
}

/// Run the compatibility test and show its verdict under the form.
#[instrument(skip(state, user, form))]
pub async fn run(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<CompatibilityForm>,
) -> Result<impl IntoResponse> {
    let request = match form.validate() {
        Ok(request) => request,
        Err(reason) => {
            return Ok(CompatibilityTemplate {
                chrome: Chrome::bare(&user).with_error(&reason.to_string()),
                form,
                result_message: String::new(),
            });
        }
    };

    let client = state.backend(&user.token);
    match client.evaluate_compatibility(&request).await {
        Ok(result) => Ok(CompatibilityTemplate {
            chrome: Chrome::bare(&user),
            form,
            result_message: result.message,
        }),
        Err(err) => {
            tracing::error!("Compatibility test failed: {err}");
            Ok(CompatibilityTemplate {
                chrome: Chrome::bare(&user)
                    .with_error("The compatibility test is unavailable right now."),
                form,
                result_message: String::new(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> CompatibilityForm {
        CompatibilityForm {
            partner1_name: "Ada".to_string(),
            partner1_age: "33".to_string(),
            partner1_interests: "chess, hiking".to_string(),
            partner2_name: "Grace".to_string(),
            partner2_age: "35".to_string(),
            partner2_interests: "sailing".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_filled_form() {
        let request = filled_form().validate().expect("valid form");
        assert_eq!(request.partner1.name, "Ada");
        assert_eq!(request.partner2.age, 35);
    }

    #[test]
    fn test_validate_rejects_missing_second_partner_name() {
        let form = CompatibilityForm {
            partner2_name: " ".to_string(),
            ..filled_form()
        };
        assert!(matches!(
            form.validate(),
            Err(FormError::Missing("partner 2 name"))
        ));
    }

    #[test]
    fn test_validate_rejects_non_numeric_age() {
        let form = CompatibilityForm {
            partner2_age: "thirty".to_string(),
            ..filled_form()
        };
        assert!(matches!(
            form.validate(),
            Err(FormError::InvalidNumber("partner 2 age"))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_second_partner_age() {
        let form = CompatibilityForm {
            partner2_age: String::new(),
            ..filled_form()
        };
        assert!(matches!(
            form.validate(),
            Err(FormError::InvalidNumber("partner 2 age"))
        ));
    }

    #[test]
    fn test_validate_reports_partner1_errors_first() {
        let form = CompatibilityForm {
            partner1_age: String::new(),
            partner2_age: String::new(),
            ..filled_form()
        };
        assert!(matches!(
            form.validate(),
            Err(FormError::InvalidNumber("partner 1 age"))
        ));
    }
}
