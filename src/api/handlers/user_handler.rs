//! User CRUD handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::{QueryParams, UserId, ValidatedJson};
use crate::api::AppState;
use crate::domain::{CreateUser, UpdateUser, UserResponse};
use crate::errors::AppResult;
use crate::types::ListParams;

/// Create user routes, mounted under `/users`
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List users in id order
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "user",
    params(ListParams),
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>),
        (status = 422, description = "Invalid skip or limit")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state
        .user_service
        .list_users(params.skip, params.limit)
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "user",
    params(("id" = i32, Path, description = "User ID, greater than 0")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 422, description = "Invalid user ID")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "user",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Email already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUser>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Replace a user's names and email
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "user",
    params(("id" = i32, Path, description = "User ID, greater than 0")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Email already exists"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    ValidatedJson(payload): ValidatedJson<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.update_user(id, payload).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete user permanently
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "user",
    params(("id" = i32, Path, description = "User ID, greater than 0")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Invalid user ID")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<StatusCode> {
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
