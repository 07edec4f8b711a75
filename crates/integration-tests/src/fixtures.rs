//! Shared builders for backend records used across the test files.

use chrono::NaiveDate;
use heartsync_api::{Goal, Insight, Relationship};
use heartsync_core::{GoalCategory, Progress};

/// A relationship with only the required fields set.
#[must_use]
pub fn relationship(id: &str, name: &str) -> Relationship {
    Relationship {
        id: id.into(),
        name: name.to_string(),
        kind: "Friend".to_string(),
        avatar: None,
        description: String::new(),
        birthday: None,
        anniversary: None,
    }
}

/// A goal at the given progress; `completed` follows the 100% rule the
/// backend applies.
#[must_use]
pub fn goal(id: &str, title: &str, progress: u8) -> Goal {
    let progress = Progress::new(progress).expect("progress in range");
    Goal {
        id: id.into(),
        title: title.to_string(),
        description: "Something to work on".to_string(),
        target_date: NaiveDate::from_ymd_opt(2026, 12, 31).expect("valid date"),
        category: GoalCategory::Communication,
        progress,
        relationship_id: None,
        completed: progress.is_complete(),
    }
}

/// A bare insight.
#[must_use]
pub fn insight(id: &str, title: &str) -> Insight {
    Insight {
        id: id.into(),
        title: title.to_string(),
        summary: "Observation".to_string(),
        category: "Communication".to_string(),
    }
}
