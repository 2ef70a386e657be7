//! Comment API types

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::types::CommentRow;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CommentDto {
    #[serde(rename = "CommentID")]
    pub comment_id: Uuid,
    #[serde(rename = "SnippetID")]
    pub snippet_id: Uuid,
    #[serde(rename = "UserID")]
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentRow> for CommentDto {
    fn from(row: CommentRow) -> Self {
        Self {
            comment_id: row.comment_id,
            snippet_id: row.snippet_id,
            user_id: row.user_id,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentCreatedResponse {
    pub message: &'static str,
    #[serde(rename = "CommentID")]
    pub comment_id: Uuid,
}

impl CommentCreatedResponse {
    pub fn new(comment_id: Uuid) -> Self {
        Self {
            message: "Comment created successfully",
            comment_id,
        }
    }
}
