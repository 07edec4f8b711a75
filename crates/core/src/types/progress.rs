//! Goal progress type.
//!
//! Progress is an integer percentage with a hard `0..=100` invariant. The
//! "bump" operation used by the goal tracker clamps at 100, so repeated bumps
//! can never overshoot regardless of delta or call frequency.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a progress value is outside `0..=100`.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("progress must be between 0 and 100, got {0}")]
pub struct ProgressOutOfRange(pub u8);

/// Goal completion percentage, always within `0..=100`.
///
/// A goal is considered complete when progress reaches exactly 100; the
/// backend derives the `completed` flag from the same rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Progress(u8);

impl Progress {
    /// Zero progress (the draft default).
    pub const ZERO: Self = Self(0);

    /// Full completion.
    pub const COMPLETE: Self = Self(100);

    /// Create a progress value, rejecting anything above 100.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 100 { Some(Self(value)) } else { None }
    }

    /// Get the underlying percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether the goal this progress belongs to is complete.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.0 == 100
    }

    /// Increase by `delta`, clamping at 100.
    ///
    /// The result is `min(self + delta, 100)`; a bump never decreases the
    /// value and never exceeds 100.
    #[must_use]
    pub const fn bumped(self, delta: u8) -> Self {
        let raw = self.0.saturating_add(delta);
        if raw > 100 { Self(100) } else { Self(raw) }
    }
}

impl TryFrom<u8> for Progress {
    type Error = ProgressOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ProgressOutOfRange(value))
    }
}

impl From<Progress> for u8 {
    fn from(progress: Progress) -> Self {
        progress.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range() {
        assert!(Progress::new(100).is_some());
        assert!(Progress::new(101).is_none());
        assert!(Progress::try_from(255).is_err());
    }

    #[test]
    fn test_bump_clamps_at_100() {
        let p = Progress::new(95).expect("valid");
        assert_eq!(p.bumped(10), Progress::COMPLETE);
        assert_eq!(Progress::COMPLETE.bumped(10), Progress::COMPLETE);
        assert_eq!(Progress::COMPLETE.bumped(255), Progress::COMPLETE);
    }

    #[test]
    fn test_bump_never_decreases() {
        for start in 0..=100u8 {
            let p = Progress::new(start).expect("valid");
            assert!(p.bumped(10) >= p, "bump from {start} decreased");
        }
    }

    #[test]
    fn test_completion_threshold() {
        assert!(!Progress::new(99).expect("valid").is_complete());
        assert!(Progress::COMPLETE.is_complete());
    }

    #[test]
    fn test_serde_rejects_invalid_wire_value() {
        let ok: Progress = serde_json::from_str("42").expect("valid");
        assert_eq!(ok.value(), 42);

        let err = serde_json::from_str::<Progress>("120");
        assert!(err.is_err());
    }
}
