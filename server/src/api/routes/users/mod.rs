//! User API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::types::{ApiError, MessageResponse};
use crate::data::types::UserRow;
use crate::domain::Resources;
use crate::domain::fields::UserFields;

use types::{UserCreatedResponse, UserDto};

/// Build User API routes
pub fn routes(resources: Arc<Resources>) -> Router<()> {
    Router::new()
        .route("/users", post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(resources)
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = UserFields,
    responses(
        (status = 201, description = "User created", body = UserCreatedResponse),
        (status = 400, description = "Missing or empty field")
    )
)]
pub async fn create_user(
    State(resources): State<Arc<Resources>>,
    ValidatedJson(body): ValidatedJson<UserFields>,
) -> Result<(StatusCode, Json<UserCreatedResponse>), ApiError> {
    let user_id = resources.create::<UserRow>(body).await?;
    Ok((StatusCode::CREATED, Json(UserCreatedResponse::new(user_id))))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserDto),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
) -> Result<Json<UserDto>, ApiError> {
    let user = resources.read::<UserRow>(id).await?;
    Ok(Json(UserDto::from(user)))
}

/// Replace a user's attributes
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UserFields,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Missing or empty field"),
        (status = 404, description = "User not found (require_existing mode)")
    )
)]
pub async fn update_user(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<UserFields>,
) -> Result<Json<MessageResponse>, ApiError> {
    resources.update::<UserRow>(id, body).await?;
    Ok(Json(MessageResponse::new("User updated successfully")))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses((status = 200, description = "User deleted", body = MessageResponse))
)]
pub async fn delete_user(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    resources.delete::<UserRow>(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
