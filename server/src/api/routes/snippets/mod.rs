//! Snippet API endpoints
//!
//! Snippet content is screened by the content gate on create (and on update
//! unless `moderation.screen_updates` is off); flagged content gets a 422 and
//! nothing is stored.

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::types::{ApiError, MessageResponse};
use crate::data::types::SnippetRow;
use crate::domain::Resources;
use crate::domain::fields::SnippetFields;

use types::{SnippetCreatedResponse, SnippetDto};

/// Build Snippet API routes
pub fn routes(resources: Arc<Resources>) -> Router<()> {
    Router::new()
        .route("/snippets", post(create_snippet))
        .route(
            "/snippets/{id}",
            get(get_snippet).put(update_snippet).delete(delete_snippet),
        )
        .with_state(resources)
}

/// Create a snippet
#[utoipa::path(
    post,
    path = "/snippets",
    tag = "snippets",
    request_body = SnippetFields,
    responses(
        (status = 201, description = "Snippet created", body = SnippetCreatedResponse),
        (status = 400, description = "Missing or empty field"),
        (status = 422, description = "Content rejected by moderation"),
        (status = 503, description = "Moderation or store unavailable")
    )
)]
pub async fn create_snippet(
    State(resources): State<Arc<Resources>>,
    ValidatedJson(body): ValidatedJson<SnippetFields>,
) -> Result<(StatusCode, Json<SnippetCreatedResponse>), ApiError> {
    let snippet_id = resources.create::<SnippetRow>(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(SnippetCreatedResponse::new(snippet_id)),
    ))
}

/// Get a snippet by ID
#[utoipa::path(
    get,
    path = "/snippets/{id}",
    tag = "snippets",
    params(("id" = Uuid, Path, description = "Snippet ID")),
    responses(
        (status = 200, description = "Snippet", body = SnippetDto),
        (status = 404, description = "Snippet not found")
    )
)]
pub async fn get_snippet(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
) -> Result<Json<SnippetDto>, ApiError> {
    let snippet = resources.read::<SnippetRow>(id).await?;
    Ok(Json(SnippetDto::from(snippet)))
}

/// Replace a snippet's attributes
///
/// CreatedAt is kept; UpdatedAt moves forward.
#[utoipa::path(
    put,
    path = "/snippets/{id}",
    tag = "snippets",
    params(("id" = Uuid, Path, description = "Snippet ID")),
    request_body = SnippetFields,
    responses(
        (status = 200, description = "Snippet updated", body = MessageResponse),
        (status = 400, description = "Missing or empty field"),
        (status = 404, description = "Snippet not found (require_existing mode)"),
        (status = 422, description = "Content rejected by moderation")
    )
)]
pub async fn update_snippet(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<SnippetFields>,
) -> Result<Json<MessageResponse>, ApiError> {
    resources.update::<SnippetRow>(id, body).await?;
    Ok(Json(MessageResponse::new("Snippet updated successfully")))
}

/// Delete a snippet
///
/// Tags, comments and bounties that reference it are left in place.
#[utoipa::path(
    delete,
    path = "/snippets/{id}",
    tag = "snippets",
    params(("id" = Uuid, Path, description = "Snippet ID")),
    responses((status = 200, description = "Snippet deleted", body = MessageResponse))
)]
pub async fn delete_snippet(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    resources.delete::<SnippetRow>(id).await?;
    Ok(Json(MessageResponse::new("Snippet deleted successfully")))
}
