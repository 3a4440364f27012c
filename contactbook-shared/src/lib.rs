//! # Contactbook Shared Library
//!
//! Types and storage used by the Contactbook API server.
//!
//! ## Module Organization
//!
//! - `models`: contact record and inbound payload
//! - `store`: the `UserStore` trait with PostgreSQL and in-memory implementations
//! - `validation`: field-level validation of inbound records
//! - `seed`: sample data generation run at startup
//! - `db`: connection pool and schema migrations

pub mod db;
pub mod models;
pub mod seed;
pub mod store;
pub mod validation;

/// Current version of the Contactbook shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
