//! User API - user management over HTTP
//!
//! Create, read, update and delete user records, storing passwords
//! only as salted Argon2 hashes.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: User entity, request/response types, password hashing
//! - **services**: Application use cases and business logic
//! - **infra**: Database connection, migrations and repositories
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared request types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{PasswordHasher, User};
pub use errors::{AppError, AppResult};
