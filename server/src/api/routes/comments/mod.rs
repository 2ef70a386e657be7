//! Comment API endpoints
//!
//! Comment content goes through the content gate the same way snippet
//! content does.

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::types::{ApiError, MessageResponse};
use crate::data::types::CommentRow;
use crate::domain::Resources;
use crate::domain::fields::CommentFields;

use types::{CommentCreatedResponse, CommentDto};

pub fn routes(resources: Arc<Resources>) -> Router<()> {
    Router::new()
        .route("/comments", post(create_comment))
        .route(
            "/comments/{id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
        .with_state(resources)
}

/// Comment on a snippet
#[utoipa::path(
    post,
    path = "/comments",
    tag = "comments",
    request_body = CommentFields,
    responses(
        (status = 201, description = "Comment created", body = CommentCreatedResponse),
        (status = 400, description = "Missing or empty field"),
        (status = 422, description = "Content rejected by moderation"),
        (status = 503, description = "Moderation or store unavailable")
    )
)]
pub async fn create_comment(
    State(resources): State<Arc<Resources>>,
    ValidatedJson(body): ValidatedJson<CommentFields>,
) -> Result<(StatusCode, Json<CommentCreatedResponse>), ApiError> {
    let comment_id = resources.create::<CommentRow>(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(CommentCreatedResponse::new(comment_id)),
    ))
}

#[utoipa::path(
    get,
    path = "/comments/{id}",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment", body = CommentDto),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn get_comment(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
) -> Result<Json<CommentDto>, ApiError> {
    let comment = resources.read::<CommentRow>(id).await?;
    Ok(Json(CommentDto::from(comment)))
}

/// Edit a comment
#[utoipa::path(
    put,
    path = "/comments/{id}",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Comment ID")),
    request_body = CommentFields,
    responses(
        (status = 200, description = "Comment updated", body = MessageResponse),
        (status = 400, description = "Missing or empty field"),
        (status = 404, description = "Comment not found (require_existing mode)"),
        (status = 422, description = "Content rejected by moderation")
    )
)]
pub async fn update_comment(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<CommentFields>,
) -> Result<Json<MessageResponse>, ApiError> {
    resources.update::<CommentRow>(id, body).await?;
    Ok(Json(MessageResponse::new("Comment updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/comments/{id}",
    tag = "comments",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses((status = 200, description = "Comment deleted", body = MessageResponse))
)]
pub async fn delete_comment(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    resources.delete::<CommentRow>(id).await?;
    Ok(Json(MessageResponse::new("Comment deleted successfully")))
}
