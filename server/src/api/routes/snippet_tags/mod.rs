//! Snippet tag API endpoints
//!
//! A snippet tag is the (SnippetID, TagID) pair itself. Posting a pair that
//! already exists overwrites the same row, so the call is idempotent and
//! still answers 201.

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::extractors::{SnippetTagPath, ValidatedJson};
use crate::api::types::{ApiError, MessageResponse};
use crate::domain::Resources;
use crate::domain::fields::SnippetTagFields;

use types::{SnippetTagCreatedResponse, SnippetTagDto};

pub fn routes(resources: Arc<Resources>) -> Router<()> {
    Router::new()
        .route("/snippettags", post(create_snippet_tag))
        .route(
            "/snippettags/{snippet_id}/{tag_id}",
            get(get_snippet_tag).delete(delete_snippet_tag),
        )
        .with_state(resources)
}

/// Tag a snippet
#[utoipa::path(
    post,
    path = "/snippettags",
    tag = "snippet-tags",
    request_body = SnippetTagFields,
    responses(
        (status = 201, description = "Snippet tagged", body = SnippetTagCreatedResponse),
        (status = 400, description = "Missing or malformed ID")
    )
)]
pub async fn create_snippet_tag(
    State(resources): State<Arc<Resources>>,
    ValidatedJson(body): ValidatedJson<SnippetTagFields>,
) -> Result<(StatusCode, Json<SnippetTagCreatedResponse>), ApiError> {
    let key = resources.create_snippet_tag(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(SnippetTagCreatedResponse::new(key.snippet_id, key.tag_id)),
    ))
}

/// Get a snippet tag by its pair of IDs
#[utoipa::path(
    get,
    path = "/snippettags/{snippet_id}/{tag_id}",
    tag = "snippet-tags",
    params(
        ("snippet_id" = Uuid, Path, description = "Snippet ID"),
        ("tag_id" = Uuid, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Snippet tag", body = SnippetTagDto),
        (status = 404, description = "Snippet is not tagged with this tag")
    )
)]
pub async fn get_snippet_tag(
    State(resources): State<Arc<Resources>>,
    SnippetTagPath(key): SnippetTagPath,
) -> Result<Json<SnippetTagDto>, ApiError> {
    let row = resources.read_snippet_tag(key).await?;
    Ok(Json(SnippetTagDto::from(row)))
}

/// Untag a snippet
#[utoipa::path(
    delete,
    path = "/snippettags/{snippet_id}/{tag_id}",
    tag = "snippet-tags",
    params(
        ("snippet_id" = Uuid, Path, description = "Snippet ID"),
        ("tag_id" = Uuid, Path, description = "Tag ID")
    ),
    responses((status = 200, description = "Snippet tag deleted", body = MessageResponse))
)]
pub async fn delete_snippet_tag(
    State(resources): State<Arc<Resources>>,
    SnippetTagPath(key): SnippetTagPath,
) -> Result<Json<MessageResponse>, ApiError> {
    resources.delete_snippet_tag(key).await?;
    Ok(Json(MessageResponse::new("SnippetTag deleted successfully")))
}
