//! Query-string extractor with the API's error format.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// [`Query`] whose parse failures reject with 422 and the usual error body.
///
/// The target type's field types are the whole contract: a `u64` field
/// rejects `-1` or `ten` here. Nothing else is checked.
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation("query", e.body_text()))?;

        Ok(QueryParams(value))
    }
}
