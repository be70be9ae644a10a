//! User domain entity and related types.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User domain entity.
///
/// `password` holds the hash produced by a [`PasswordHasher`](super::PasswordHasher),
/// never plaintext. The entity is not serializable; respond with [`UserResponse`].
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: String,
    pub password: String,
    pub is_active: bool,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("is_active", &self.is_active)
            .finish()
    }
}

/// Data for inserting a user. The store assigns `id` and `is_active`.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: String,
    pub password_hash: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// The mutable subset of a user. Applied as a full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: String,
}

/// Canonical form used for every email lookup and write.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalizes an incoming email before the `email` rule sees it.
fn deserialize_email<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_email(&raw))
}

/// User creation data transfer object
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[schema(example = "John")]
    pub firstname: Option<String>,
    #[schema(example = "Doe")]
    pub lastname: Option<String>,
    /// User email address; trimmed and lower-cased on input
    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Plaintext password, hashed before storage
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!", min_length = 1)]
    pub password: String,
}

impl std::fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUser")
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// User update data transfer object.
///
/// Replaces `firstname`, `lastname` and `email`; omitted names are cleared.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[schema(example = "Jane")]
    pub firstname: Option<String>,
    #[schema(example = "Doe")]
    pub lastname: Option<String>,
    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub email: String,
}

impl From<UpdateUser> for UserChanges {
    fn from(dto: UpdateUser) -> Self {
        Self {
            firstname: dto.firstname,
            lastname: dto.lastname,
            email: normalize_email(&dto.email),
        }
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "John")]
    pub firstname: Option<String>,
    #[schema(example = "Doe")]
    pub lastname: Option<String>,
    #[schema(example = "user@example.com")]
    pub email: String,
    #[schema(example = true)]
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname,
            lastname: user.lastname,
            email: user.email,
            is_active: user.is_active,
        }
    }
}
