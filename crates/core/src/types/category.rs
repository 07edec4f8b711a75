//! Fixed enums shared with the backend.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Goal category.
///
/// The wire format uses the human-readable labels verbatim (for example
/// `"Quality Time"`), matching what the backend stores and returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalCategory {
    Communication,
    #[serde(rename = "Quality Time")]
    QualityTime,
    #[serde(rename = "Personal Growth")]
    PersonalGrowth,
    #[serde(rename = "Shared Activities")]
    SharedActivities,
    #[serde(rename = "Emotional Connection")]
    EmotionalConnection,
}

impl GoalCategory {
    /// All categories, in the order they are offered in the goal form.
    pub const ALL: [Self; 5] = [
        Self::Communication,
        Self::QualityTime,
        Self::PersonalGrowth,
        Self::SharedActivities,
        Self::EmotionalConnection,
    ];

    /// Human-readable label (identical to the wire value).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Communication => "Communication",
            Self::QualityTime => "Quality Time",
            Self::PersonalGrowth => "Personal Growth",
            Self::SharedActivities => "Shared Activities",
            Self::EmotionalConnection => "Emotional Connection",
        }
    }

    /// Parse a label back into a category.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// UI theme preference stored on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

impl Theme {
    /// All themes, in the order they are offered in the profile form.
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::System];

    /// Wire value (lowercase).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Parse a wire value back into a theme.
    #[must_use]
    pub fn from_str_opt(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|theme| theme.as_str() == value)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_labels() {
        let json = serde_json::to_string(&GoalCategory::QualityTime).expect("serialize");
        assert_eq!(json, "\"Quality Time\"");

        let back: GoalCategory = serde_json::from_str("\"Emotional Connection\"").expect("parse");
        assert_eq!(back, GoalCategory::EmotionalConnection);
    }

    #[test]
    fn test_category_label_round_trip() {
        for category in GoalCategory::ALL {
            assert_eq!(GoalCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(GoalCategory::from_label("Gardening"), None);
    }

    #[test]
    fn test_theme_wire_values() {
        let json = serde_json::to_string(&Theme::Dark).expect("serialize");
        assert_eq!(json, "\"dark\"");
        assert_eq!(Theme::default(), Theme::Light);
    }
}
