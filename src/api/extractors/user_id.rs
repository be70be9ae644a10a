//! Path extractor for user identifiers.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::errors::AppError;

/// A positive user id taken from the `:id` path segment.
///
/// Non-numeric and non-positive ids reject with 422, before any lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation("id", e.body_text()))?;

        if id <= 0 {
            return Err(AppError::validation("id", "must be greater than 0"));
        }

        Ok(UserId(id))
    }
}
