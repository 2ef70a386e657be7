//! Interaction API types

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::types::InteractionRow;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct InteractionDto {
    #[serde(rename = "InteractionID")]
    pub interaction_id: Uuid,
    #[serde(rename = "SnippetID")]
    pub snippet_id: Uuid,
    #[serde(rename = "UserID")]
    pub user_id: Uuid,
    #[serde(rename = "Type")]
    pub interaction_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<InteractionRow> for InteractionDto {
    fn from(row: InteractionRow) -> Self {
        Self {
            interaction_id: row.interaction_id,
            snippet_id: row.snippet_id,
            user_id: row.user_id,
            interaction_type: row.interaction_type,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InteractionCreatedResponse {
    pub message: &'static str,
    #[serde(rename = "InteractionID")]
    pub interaction_id: Uuid,
}

impl InteractionCreatedResponse {
    pub fn new(interaction_id: Uuid) -> Self {
        Self {
            message: "Interaction created successfully",
            interaction_id,
        }
    }
}
