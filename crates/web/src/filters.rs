//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns up-to-two uppercase initials for a display name, used as the
/// avatar fallback.
///
/// Usage in templates: `{{ relationship.name|initials }}`
#[askama::filter_fn]
pub fn initials(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let name = value.to_string();
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    Ok(if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        let values = askama::NO_VALUES;
        assert_eq!(
            initials::default()
                .execute("Ada Lovelace", values)
                .expect("filter"),
            "AL"
        );
        assert_eq!(initials::default().execute("ada", values).expect("filter"), "A");
        assert_eq!(initials::default().execute("", values).expect("filter"), "?");
    }
}
