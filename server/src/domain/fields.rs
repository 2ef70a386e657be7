//! Client-supplied attributes per entity
//!
//! These are the request bodies for create and update. Keys and server-owned
//! timestamps (CreatedAt, UpdatedAt) are never part of them. Field names on
//! the wire follow the PascalCase names of the data model (`UserID`,
//! `PasswordHash`, `DueDate`, ...). Absent fields fail deserialization;
//! present-but-empty strings fail validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UserFields {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "PasswordHash is required"))]
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct SnippetFields {
    #[serde(rename = "UserID")]
    pub user_id: Uuid,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[validate(length(min = 1, message = "Language is required"))]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct TagFields {
    #[validate(length(min = 1, message = "TagName is required"))]
    pub tag_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SnippetTagFields {
    #[serde(rename = "SnippetID")]
    pub snippet_id: Uuid,
    #[serde(rename = "TagID")]
    pub tag_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct InteractionFields {
    #[serde(rename = "SnippetID")]
    pub snippet_id: Uuid,
    #[serde(rename = "UserID")]
    pub user_id: Uuid,
    /// Reaction kind, e.g. "like"
    #[serde(rename = "Type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub interaction_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct SnippetBountyFields {
    #[serde(rename = "SnippetID")]
    pub snippet_id: Uuid,
    #[serde(rename = "UserID")]
    pub user_id: Uuid,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 0, message = "Reward must be >= 0"))]
    pub reward: i32,
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct BugBountyFields {
    #[serde(rename = "UserID")]
    pub user_id: Uuid,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 0, message = "Reward must be >= 0"))]
    pub reward: i32,
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct ReportFields {
    #[serde(rename = "SnippetID")]
    pub snippet_id: Uuid,
    #[serde(rename = "ReportedByUserID")]
    pub reported_by_user_id: Uuid,
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CommentFields {
    #[serde(rename = "SnippetID")]
    pub snippet_id: Uuid,
    #[serde(rename = "UserID")]
    pub user_id: Uuid,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}
