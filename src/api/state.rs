//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::domain::Argon2Hasher;
use crate::errors::AppResult;
use crate::infra::{Database, UserStore};
use crate::services::{UserManager, UserService};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the production service graph from configuration.
    ///
    /// # Errors
    /// Fails when the hashing policy in `config` is invalid.
    pub fn from_config(database: Arc<Database>, config: &Config) -> AppResult<Self> {
        let hasher = Argon2Hasher::from_config(&config.hashing)?;
        let repo = UserStore::new(database.get_connection());
        let user_service = UserManager::new(Arc::new(repo), Arc::new(hasher))
            .with_max_list_limit(config.max_list_limit);

        Ok(Self::new(Arc::new(user_service), database))
    }

    /// Create application state with manually injected services.
    pub fn new(user_service: Arc<dyn UserService>, database: Arc<Database>) -> Self {
        Self {
            user_service,
            database,
        }
    }
}
