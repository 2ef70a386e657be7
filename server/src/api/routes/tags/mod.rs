//! Tag API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::types::{ApiError, MessageResponse};
use crate::data::types::TagRow;
use crate::domain::Resources;
use crate::domain::fields::TagFields;

use types::{TagCreatedResponse, TagDto};

pub fn routes(resources: Arc<Resources>) -> Router<()> {
    Router::new()
        .route("/tags", post(create_tag))
        .route(
            "/tags/{id}",
            get(get_tag).put(update_tag).delete(delete_tag),
        )
        .with_state(resources)
}

/// Create a tag
#[utoipa::path(
    post,
    path = "/tags",
    tag = "tags",
    request_body = TagFields,
    responses(
        (status = 201, description = "Tag created", body = TagCreatedResponse),
        (status = 400, description = "Missing or empty field")
    )
)]
pub async fn create_tag(
    State(resources): State<Arc<Resources>>,
    ValidatedJson(body): ValidatedJson<TagFields>,
) -> Result<(StatusCode, Json<TagCreatedResponse>), ApiError> {
    let tag_id = resources.create::<TagRow>(body).await?;
    Ok((StatusCode::CREATED, Json(TagCreatedResponse::new(tag_id))))
}

/// Get a tag by ID
#[utoipa::path(
    get,
    path = "/tags/{id}",
    tag = "tags",
    params(("id" = Uuid, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Tag", body = TagDto),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn get_tag(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
) -> Result<Json<TagDto>, ApiError> {
    let tag = resources.read::<TagRow>(id).await?;
    Ok(Json(TagDto::from(tag)))
}

/// Rename a tag
#[utoipa::path(
    put,
    path = "/tags/{id}",
    tag = "tags",
    params(("id" = Uuid, Path, description = "Tag ID")),
    request_body = TagFields,
    responses(
        (status = 200, description = "Tag updated", body = MessageResponse),
        (status = 400, description = "Missing or empty field"),
        (status = 404, description = "Tag not found (require_existing mode)")
    )
)]
pub async fn update_tag(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<TagFields>,
) -> Result<Json<MessageResponse>, ApiError> {
    resources.update::<TagRow>(id, body).await?;
    Ok(Json(MessageResponse::new("Tag updated successfully")))
}

/// Delete a tag
#[utoipa::path(
    delete,
    path = "/tags/{id}",
    tag = "tags",
    params(("id" = Uuid, Path, description = "Tag ID")),
    responses((status = 200, description = "Tag deleted", body = MessageResponse))
)]
pub async fn delete_tag(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    resources.delete::<TagRow>(id).await?;
    Ok(Json(MessageResponse::new("Tag deleted successfully")))
}
