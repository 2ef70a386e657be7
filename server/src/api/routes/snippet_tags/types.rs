//! Snippet tag API types

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::types::SnippetTagRow;

#[derive(Debug, Serialize, ToSchema)]
pub struct SnippetTagDto {
    #[serde(rename = "SnippetID")]
    pub snippet_id: Uuid,
    #[serde(rename = "TagID")]
    pub tag_id: Uuid,
}

impl From<SnippetTagRow> for SnippetTagDto {
    fn from(row: SnippetTagRow) -> Self {
        Self {
            snippet_id: row.snippet_id,
            tag_id: row.tag_id,
        }
    }
}

/// Echoes both halves of the key
#[derive(Debug, Serialize, ToSchema)]
pub struct SnippetTagCreatedResponse {
    pub message: &'static str,
    #[serde(rename = "SnippetID")]
    pub snippet_id: Uuid,
    #[serde(rename = "TagID")]
    pub tag_id: Uuid,
}

impl SnippetTagCreatedResponse {
    pub fn new(snippet_id: Uuid, tag_id: Uuid) -> Self {
        Self {
            message: "SnippetTag created successfully",
            snippet_id,
            tag_id,
        }
    }
}
