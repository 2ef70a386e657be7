//! Bug bounty API types

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::types::BugBountyRow;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct BugBountyDto {
    #[serde(rename = "BountyID")]
    pub bounty_id: Uuid,
    #[serde(rename = "UserID")]
    pub user_id: Uuid,
    pub description: String,
    pub reward: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl From<BugBountyRow> for BugBountyDto {
    fn from(row: BugBountyRow) -> Self {
        Self {
            bounty_id: row.bounty_id,
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
pub struct BugBountyCreatedResponse {
    pub message: &'static str,
    #[serde(rename = "BountyID")]
    pub bounty_id: Uuid,
}

impl BugBountyCreatedResponse {
    pub fn new(bounty_id: Uuid) -> Self {
        Self {
            message: "BugBounty created successfully",
            bounty_id,
        }
    }
}
