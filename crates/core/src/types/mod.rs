//! Core type definitions.
//!
//! All types here are plain data with invariants enforced at construction;
//! anything that talks to the network belongs in the `api` crate.

pub mod category;
pub mod email;
pub mod id;
pub mod progress;

pub use category::{GoalCategory, Theme};
pub use email::{Email, EmailError};
pub use id::{GoalId, InsightId, RelationshipId, ReportId};
pub use progress::{Progress, ProgressOutOfRange};
