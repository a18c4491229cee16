//! # PawMinder Shared Library
//!
//! Types and business logic shared by the PawMinder API server and client.
//!
//! ## Module Organization
//!
//! - `models`: Accounts, pets and reminders with their database operations
//! - `classify`: Upcoming / overdue / completed bucketing of reminders
//! - `auth`: Password hashing, bearer tokens and Axum middleware
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod classify;
pub mod db;
pub mod models;

/// Current version of the PawMinder shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
