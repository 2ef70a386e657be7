//! Report API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::types::{ApiError, MessageResponse};
use crate::data::types::ReportRow;
use crate::domain::Resources;
use crate::domain::fields::ReportFields;

use types::{ReportCreatedResponse, ReportDto};

pub fn routes(resources: Arc<Resources>) -> Router<()> {
    Router::new()
        .route("/reports", post(create_report))
        .route("/reports/{id}", get(get_report).delete(delete_report))
        .with_state(resources)
}

/// Report a snippet
#[utoipa::path(
    post,
    path = "/reports",
    tag = "reports",
    request_body = ReportFields,
    responses(
        (status = 201, description = "Report created", body = ReportCreatedResponse),
        (status = 400, description = "Missing or empty field")
    )
)]
pub async fn create_report(
    State(resources): State<Arc<Resources>>,
    ValidatedJson(body): ValidatedJson<ReportFields>,
) -> Result<(StatusCode, Json<ReportCreatedResponse>), ApiError> {
    let report_id = resources.create::<ReportRow>(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReportCreatedResponse::new(report_id)),
    ))
}

#[utoipa::path(
    get,
    path = "/reports/{id}",
    tag = "reports",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report", body = ReportDto),
        (status = 404, description = "Report not found")
    )
)]
pub async fn get_report(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
) -> Result<Json<ReportDto>, ApiError> {
    let report = resources.read::<ReportRow>(id).await?;
    Ok(Json(ReportDto::from(report)))
}

#[utoipa::path(
    delete,
    path = "/reports/{id}",
    tag = "reports",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses((status = 200, description = "Report deleted", body = MessageResponse))
)]
pub async fn delete_report(
    State(resources): State<Arc<Resources>>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    resources.delete::<ReportRow>(id).await?;
    Ok(Json(MessageResponse::new("Report deleted successfully")))
}
