//! Snippet API types

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::types::SnippetRow;

/// Snippet DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct SnippetDto {
    #[serde(rename = "SnippetID")]
    pub snippet_id: Uuid,
    #[serde(rename = "UserID")]
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SnippetRow> for SnippetDto {
    fn from(row: SnippetRow) -> Self {
        Self {
            snippet_id: row.snippet_id,
            user_id: row.user_id,
            title: row.title,
            content: row.content,
            language: row.language,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SnippetCreatedResponse {
    pub message: &'static str,
    #[serde(rename = "SnippetID")]
    pub snippet_id: Uuid,
}

impl SnippetCreatedResponse {
    pub fn new(snippet_id: Uuid) -> Self {
        Self {
            message: "Snippet created successfully",
            snippet_id,
        }
    }
}
