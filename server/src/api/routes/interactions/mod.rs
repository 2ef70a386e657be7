//! Interaction API endpoints
//!
//! Interactions are immutable once recorded: there is no update route.

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::types::{ApiError, MessageResponse};
use crate::data::types::InteractionRow;
use crate::domain::Resources;
use crate::domain::fields::InteractionFields;

use types::{InteractionCreatedResponse, InteractionDto};

pub fn routes(resources: Arc<Resources>) -> Router<()> {
    Router::new()
        .route("/interactions", post(create_interaction))
        .route(
            "/interactions/{id}",
            get(get_interaction).delete(delete_interaction),
        )
        .with_state(resources)
}

/// Record an interaction with a snippet
#[utoipa::path(
    post,
    path = "/interactions",
    tag = "interactions",
    request_body = InteractionFields,
    responses(
        (status = 201, description = "Interaction created", body = InteractionCreatedResponse),
        (status = 400, description = "Missing or empty field")
    )
)]
pub async fn create_interaction(
    State(resources): State<Arc<Resources>>,
    ValidatedJson(body): ValidatedJson<InteractionFields>,
) -> Result<(StatusCode, Json<InteractionCreatedResponse>), ApiError> {
    let interaction_id = resources.create::<InteractionRow>(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(InteractionCreatedResponse::new(interaction_id)),
    ))
}

#[utoipa::path(
    get,
    path = "/interactions/{id}",
    tag = "interactions",
    params(("id" = Uuid, Path, description = "Interaction ID")),
    responses(
        (status = 200, description = "Interaction", body = InteractionDto),
        (status = 404, description = "Interaction not found")
    )
)]
pub async fn get_interaction(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
) -> Result<Json<InteractionDto>, ApiError> {
    let interaction = resources.read::<InteractionRow>(id).await?;
    Ok(Json(InteractionDto::from(interaction)))
}

#[utoipa::path(
    delete,
    path = "/interactions/{id}",
    tag = "interactions",
    params(("id" = Uuid, Path, description = "Interaction ID")),
    responses((status = 200, description = "Interaction deleted", body = MessageResponse))
)]
pub async fn delete_interaction(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    resources.delete::<InteractionRow>(id).await?;
    Ok(Json(MessageResponse::new("Interaction deleted successfully")))
}
