//! HeartSync front-end library.
//!
//! This crate provides the front-end functionality as a library, allowing it
//! to be tested and reused. The binary entry point is in `main.rs`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod workflow;
