//! Bug bounty API endpoints
//!
//! Platform-wide bounties, not tied to a snippet.

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::types::{ApiError, MessageResponse};
use crate::data::types::BugBountyRow;
use crate::domain::Resources;
use crate::domain::fields::BugBountyFields;

use types::{BugBountyCreatedResponse, BugBountyDto};

pub fn routes(resources: Arc<Resources>) -> Router<()> {
    Router::new()
        .route("/bugbounties", post(create_bug_bounty))
        .route(
            "/bugbounties/{id}",
            get(get_bug_bounty)
                .put(update_bug_bounty)
                .delete(delete_bug_bounty),
        )
        .with_state(resources)
}

#[utoipa::path(
    post,
    path = "/bugbounties",
    tag = "bug-bounties",
    request_body = BugBountyFields,
    responses(
        (status = 201, description = "Bug bounty created", body = BugBountyCreatedResponse),
        (status = 400, description = "Missing field or negative reward")
    )
)]
pub async fn create_bug_bounty(
    State(resources): State<Arc<Resources>>,
    ValidatedJson(body): ValidatedJson<BugBountyFields>,
) -> Result<(StatusCode, Json<BugBountyCreatedResponse>), ApiError> {
    let bounty_id = resources.create::<BugBountyRow>(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(BugBountyCreatedResponse::new(bounty_id)),
    ))
}

#[utoipa::path(
    get,
    path = "/bugbounties/{id}",
    tag = "bug-bounties",
    params(("id" = Uuid, Path, description = "Bounty ID")),
    responses(
        (status = 200, description = "Bug bounty", body = BugBountyDto),
        (status = 404, description = "Bug bounty not found")
    )
)]
pub async fn get_bug_bounty(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
) -> Result<Json<BugBountyDto>, ApiError> {
    let bounty = resources.read::<BugBountyRow>(id).await?;
    Ok(Json(BugBountyDto::from(bounty)))
}

#[utoipa::path(
    put,
    path = "/bugbounties/{id}",
    tag = "bug-bounties",
    params(("id" = Uuid, Path, description = "Bounty ID")),
    request_body = BugBountyFields,
    responses(
        (status = 200, description = "Bug bounty updated", body = MessageResponse),
        (status = 400, description = "Missing field or negative reward"),
        (status = 404, description = "Bug bounty not found (require_existing mode)")
    )
)]
pub async fn update_bug_bounty(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<BugBountyFields>,
) -> Result<Json<MessageResponse>, ApiError> {
    resources.update::<BugBountyRow>(id, body).await?;
    Ok(Json(MessageResponse::new("BugBounty updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/bugbounties/{id}",
    tag = "bug-bounties",
    params(("id" = Uuid, Path, description = "Bounty ID")),
    responses((status = 200, description = "Bug bounty deleted", body = MessageResponse))
)]
pub async fn delete_bug_bounty(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    resources.delete::<BugBountyRow>(id).await?;
    Ok(Json(MessageResponse::new("BugBounty deleted successfully")))
}
