//! User API types

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::types::UserRow;

/// User DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UserDto {
    #[serde(rename = "UserID")]
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl From<UserRow> for UserDto {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.user_id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserCreatedResponse {
    pub message: &'static str,
    #[serde(rename = "UserID")]
    pub user_id: Uuid,
}

impl UserCreatedResponse {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            message: "User created successfully",
            user_id,
        }
    }
}
