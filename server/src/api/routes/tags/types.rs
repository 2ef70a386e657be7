//! Tag API types

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::types::TagRow;

#[derive(Debug, Serialize, ToSchema)]
pub struct TagDto {
    #[serde(rename = "TagID")]
    pub tag_id: Uuid,
    #[serde(rename = "TagName")]
    pub tag_name: String,
}

impl From<TagRow> for TagDto {
    fn from(row: TagRow) -> Self {
        Self {
            tag_id: row.tag_id,
            tag_name: row.tag_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TagCreatedResponse {
    pub message: &'static str,
    #[serde(rename = "TagID")]
    pub tag_id: Uuid,
}

impl TagCreatedResponse {
    pub fn new(tag_id: Uuid) -> Self {
        Self {
            message: "Tag created successfully",
            tag_id,
        }
    }
}
