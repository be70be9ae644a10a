//! User repository - persistence boundary over the `users` table.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User, UserChanges};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups return `None` for absent rows; only storage faults are errors.
/// A write rejected by the unique email index surfaces as
/// [`AppError::UniqueViolation`](crate::errors::AppError::UniqueViolation).
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by email address (exact match on the stored form)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// List users ordered by ID. Out-of-range windows yield an empty list.
    async fn list(&self, skip: u64, limit: u64) -> AppResult<Vec<User>>;

    /// Insert a new user; the store assigns `id` and `is_active`.
    async fn insert(&self, new_user: NewUser) -> AppResult<User>;

    /// Replace the mutable fields. `None` if the user does not exist.
    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<Option<User>>;

    /// Permanently delete a user. Returns whether a row was removed.
    async fn delete_by_id(&self, id: i32) -> AppResult<bool>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;

        Ok(result.map(User::from))
    }

    async fn list(&self, skip: u64, limit: u64) -> AppResult<Vec<User>> {
        // Bound parameters are signed 64-bit on every backend
        let max = i64::MAX as u64;
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .offset(skip.min(max))
            .limit(limit.min(max))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn insert(&self, new_user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            id: NotSet,
            firstname: Set(new_user.firstname),
            lastname: Set(new_user.lastname),
            email: Set(new_user.email),
            password: Set(new_user.password_hash),
            is_active: Set(true),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<Option<User>> {
        // Dropping the transaction without commit rolls it back
        let txn = self.db.begin().await?;

        let Some(existing) = UserEntity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.firstname = Set(changes.firstname);
        active.lastname = Set(changes.lastname);
        active.email = Set(changes.email);

        let model = active.update(&txn).await?;
        txn.commit().await?;

        Ok(Some(User::from(model)))
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<bool> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
