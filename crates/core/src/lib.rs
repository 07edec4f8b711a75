//! HeartSync Core - Shared types library.
//!
//! This crate provides common types used across all HeartSync components:
//! - `api` - Typed client for the HeartSync backend API
//! - `web` - Server-rendered front-end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Entity
//! records exchanged with the backend live in the `api` crate; this crate
//! holds the invariant-carrying primitives those records are built from.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, goal progress,
//!   and the fixed enums (goal categories, UI theme)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
