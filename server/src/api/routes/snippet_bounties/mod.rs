//! Snippet bounty API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::types::{ApiError, MessageResponse};
use crate::data::types::SnippetBountyRow;
use crate::domain::Resources;
use crate::domain::fields::SnippetBountyFields;

use types::{SnippetBountyCreatedResponse, SnippetBountyDto};

pub fn routes(resources: Arc<Resources>) -> Router<()> {
    Router::new()
        .route("/snippetbounties", post(create_snippet_bounty))
        .route(
            "/snippetbounties/{id}",
            get(get_snippet_bounty)
                .put(update_snippet_bounty)
                .delete(delete_snippet_bounty),
        )
        .with_state(resources)
}

/// Post a bounty on a snippet
#[utoipa::path(
    post,
    path = "/snippetbounties",
    tag = "snippet-bounties",
    request_body = SnippetBountyFields,
    responses(
        (status = 201, description = "Bounty created", body = SnippetBountyCreatedResponse),
        (status = 400, description = "Missing field or negative reward")
    )
)]
pub async fn create_snippet_bounty(
    State(resources): State<Arc<Resources>>,
    ValidatedJson(body): ValidatedJson<SnippetBountyFields>,
) -> Result<(StatusCode, Json<SnippetBountyCreatedResponse>), ApiError> {
    let bounty_id = resources.create::<SnippetBountyRow>(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(SnippetBountyCreatedResponse::new(bounty_id)),
    ))
}

#[utoipa::path(
    get,
    path = "/snippetbounties/{id}",
    tag = "snippet-bounties",
    params(("id" = Uuid, Path, description = "Bounty ID")),
    responses(
        (status = 200, description = "Snippet bounty", body = SnippetBountyDto),
        (status = 404, description = "Snippet bounty not found")
    )
)]
pub async fn get_snippet_bounty(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
) -> Result<Json<SnippetBountyDto>, ApiError> {
    let bounty = resources.read::<SnippetBountyRow>(id).await?;
    Ok(Json(SnippetBountyDto::from(bounty)))
}

#[utoipa::path(
    put,
    path = "/snippetbounties/{id}",
    tag = "snippet-bounties",
    params(("id" = Uuid, Path, description = "Bounty ID")),
    request_body = SnippetBountyFields,
    responses(
        (status = 200, description = "Snippet bounty updated", body = MessageResponse),
        (status = 400, description = "Missing field or negative reward"),
        (status = 404, description = "Snippet bounty not found (require_existing mode)")
    )
)]
pub async fn update_snippet_bounty(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<SnippetBountyFields>,
) -> Result<Json<MessageResponse>, ApiError> {
    resources.update::<SnippetBountyRow>(id, body).await?;
    Ok(Json(MessageResponse::new(
        "SnippetBounty updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/snippetbounties/{id}",
    tag = "snippet-bounties",
    params(("id" = Uuid, Path, description = "Bounty ID")),
    responses((status = 200, description = "Snippet bounty deleted", body = MessageResponse))
)]
pub async fn delete_snippet_bounty(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    resources.delete::<SnippetBountyRow>(id).await?;
    Ok(Json(MessageResponse::new(
        "SnippetBounty deleted successfully",
    )))
}
