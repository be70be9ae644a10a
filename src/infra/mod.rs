//! Infrastructure layer - External systems integration
//!
//! - Database connection pool and migrations
//! - Repositories over the persisted entities

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
