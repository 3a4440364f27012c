//! # Contactbook API Server Library
//!
//! HTTP surface for the contact record service.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers
//! - `startup`: Startup seeding task

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod startup;
