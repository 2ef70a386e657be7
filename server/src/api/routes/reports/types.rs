//! Report API types

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::types::ReportRow;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ReportDto {
    #[serde(rename = "ReportID")]
    pub report_id: Uuid,
    #[serde(rename = "SnippetID")]
    pub snippet_id: Uuid,
    #[serde(rename = "ReportedByUserID")]
    pub reported_by_user_id: Uuid,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReportRow> for ReportDto {
    fn from(row: ReportRow) -> Self {
        Self {
            report_id: row.report_id,
            snippet_id: row.snippet_id,
            reported_by_user_id: row.reported_by_user_id,
            reason: row.reason,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportCreatedResponse {
    pub message: &'static str,
    #[serde(rename = "ReportID")]
    pub report_id: Uuid,
}

impl ReportCreatedResponse {
    pub fn new(report_id: Uuid) -> Self {
        Self {
            message: "Report created successfully",
            report_id,
        }
    }
}
