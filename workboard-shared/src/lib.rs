//! # Workboard Shared Library
//!
//! This crate contains the types and business building blocks shared by the
//! Workboard API server: database models, the uniform response envelope,
//! password hashing, and the email notification dispatcher.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `db`: Connection pool and migration utilities
//! - `response`: The response envelope returned by every service operation
//! - `notify`: Email rendering and fire-and-forget dispatch
//! - `auth`: Password hashing

pub mod auth;
pub mod db;
pub mod models;
pub mod notify;
pub mod response;

/// Current version of the Workboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
