//! User service - Handles user-related business logic.
//!
//! Enforces the id, uniqueness and existence rules in front of the
//! repository, and hashes passwords before anything is persisted.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::config::MAX_LIST_LIMIT;
use crate::domain::{
    normalize_email, CreateUser, NewUser, PasswordHasher, UpdateUser, User, UserChanges,
};
use crate::errors::{AppError, AppResult, OptionExt, EMAIL_EXISTS};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List users in id order. `limit` is clamped to the configured maximum.
    async fn list_users(&self, skip: u64, limit: u64) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Register a new user with a hashed password
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Replace firstname, lastname and email
    async fn update_user(&self, id: i32, input: UpdateUser) -> AppResult<User>;

    /// Permanently delete user
    async fn delete_user(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    max_list_limit: u64,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(repo: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            repo,
            hasher,
            max_list_limit: MAX_LIST_LIMIT,
        }
    }

    /// Override the list page cap.
    pub fn with_max_list_limit(mut self, max_list_limit: u64) -> Self {
        self.max_list_limit = max_list_limit;
        self
    }

    /// Hash on the blocking pool; Argon2 is CPU and memory bound.
    async fn hash_password(&self, plain_text: String) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&plain_text))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))??;
        Ok(hash)
    }
}

/// Reject non-positive ids before they reach the store.
fn ensure_valid_id(id: i32) -> AppResult<()> {
    if id <= 0 {
        return Err(AppError::validation("id", "must be greater than 0"));
    }
    Ok(())
}

/// A store-level duplicate becomes the same conflict the pre-check reports.
fn unique_to_conflict(err: AppError) -> AppError {
    match err {
        AppError::UniqueViolation(detail) => {
            warn!(%detail, "Email uniqueness enforced by store");
            AppError::conflict(EMAIL_EXISTS)
        }
        other => other,
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self, skip: u64, limit: u64) -> AppResult<Vec<User>> {
        let limit = limit.min(self.max_list_limit);
        debug!(skip, limit, "Listing users");
        self.repo.list(skip, limit).await
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        ensure_valid_id(id)?;
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_user(&self, mut input: CreateUser) -> AppResult<User> {
        input.email = normalize_email(&input.email);
        input.validate()?;

        let email = input.email;
        if self.repo.find_by_email(&email).await?.is_some() {
            warn!(%email, "Rejected duplicate email");
            return Err(AppError::conflict(EMAIL_EXISTS));
        }

        let password_hash = self.hash_password(input.password).await?;
        let user = self
            .repo
            .insert(NewUser {
                firstname: input.firstname,
                lastname: input.lastname,
                email,
                password_hash,
            })
            .await
            .map_err(unique_to_conflict)?;

        info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: i32, mut input: UpdateUser) -> AppResult<User> {
        ensure_valid_id(id)?;
        input.email = normalize_email(&input.email);
        input.validate()?;

        let user = self
            .repo
            .update(id, UserChanges::from(input))
            .await
            .map_err(unique_to_conflict)?
            .ok_or_not_found()?;

        info!(user_id = user.id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        ensure_valid_id(id)?;

        if !self.repo.delete_by_id(id).await? {
            return Err(AppError::NotFound);
        }

        info!(user_id = id, "User deleted");
        Ok(())
    }
}
