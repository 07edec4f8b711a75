//! HeartSync backend API client.
//!
//! All business logic (compatibility scoring, insight generation, persistence,
//! token issuance) lives in the external HeartSync backend; this crate is the
//! thin typed façade over its REST interface. Every collection gets its own
//! module with the wire records and the corresponding [`HeartSyncClient`]
//! methods:
//!
//! - [`relationships`] - full CRUD
//! - [`goals`] - full CRUD plus the progress shortcut
//! - [`insights`] - read-only
//! - [`reports`] - read-only
//! - [`profile`] - singleton get/update, password change, avatar upload
//! - [`compatibility`] - single-shot evaluate
//! - [`auth`] - login/signup against the external identity endpoint
//!
//! # Contract
//!
//! Calls are never retried here; `get`/`list`/`delete` are idempotent from the
//! caller's perspective, `create` is not and must not be replayed. Failures
//! surface as [`ApiError`] with a human-readable message.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod client;
pub mod compatibility;
pub mod error;
pub mod goals;
pub mod insights;
pub mod profile;
pub mod relationships;
pub mod reports;

pub use auth::{AuthSession, AuthUser};
pub use client::HeartSyncClient;
pub use compatibility::{CompatibilityRequest, CompatibilityResult, Partner};
pub use error::ApiError;
pub use goals::{Goal, GoalDraft};
pub use insights::Insight;
pub use profile::{Preferences, Profile, ProfileDraft};
pub use relationships::{Relationship, RelationshipDraft};
pub use reports::Report;
