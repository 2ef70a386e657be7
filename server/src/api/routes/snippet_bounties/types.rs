//! Snippet bounty API types

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::types::SnippetBountyRow;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct SnippetBountyDto {
    #[serde(rename = "BountyID")]
    pub bounty_id: Uuid,
    #[serde(rename = "SnippetID")]
    pub snippet_id: Uuid,
    #[serde(rename = "UserID")]
    pub user_id: Uuid,
    pub description: String,
    pub reward: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl From<SnippetBountyRow> for SnippetBountyDto {
    fn from(row: SnippetBountyRow) -> Self {
        Self {
            bounty_id: row.bounty_id,
            snippet_id: row.snippet_id,
            user_id: row.user_id,
            description: row.description,
            reward: row.reward,
            status: row.status,
            created_at: row.created_at,
            due_date: row.due_date,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SnippetBountyCreatedResponse {
    pub message: &'static str,
    #[serde(rename = "BountyID")]
    pub bounty_id: Uuid,
}

impl SnippetBountyCreatedResponse {
    pub fn new(bounty_id: Uuid) -> Self {
        Self {
            message: "SnippetBounty created successfully",
            bounty_id,
        }
    }
}
