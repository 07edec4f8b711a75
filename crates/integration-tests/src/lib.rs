//! Integration tests for HeartSync.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p heartsync-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `wire_format` - Backend JSON payloads round-tripped through the typed
//!   records
//! - `form_validation` - Local form checks that gate every mutation
//! - `dashboard_summary` - Fan-in derivation for the dashboard page
//!
//! All tests run in-process against library code; none of them needs a
//! running backend.

pub mod fixtures;
