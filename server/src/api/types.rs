//! Shared API types
//!
//! Error rendering and the small message bodies returned by write endpoints.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Unprocessable { code: String, message: String },
    ServiceUnavailable { code: String, message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn unprocessable(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unprocessable {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn service_unavailable(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { entity } => {
                Self::not_found(not_found_code(entity), format!("{} not found", entity))
            }
            DomainError::Validation(message) => Self::bad_request("VALIDATION_ERROR", message),
            DomainError::ContentRejected => Self::unprocessable(
                "CONTENT_REJECTED",
                "Content was flagged by moderation and was not saved",
            ),
            DomainError::StoreUnavailable(e) => {
                tracing::error!(error = %e, "Entity store error");
                Self::service_unavailable("STORE_UNAVAILABLE", "Entity store is unavailable")
            }
            DomainError::GateUnavailable(e) => {
                tracing::error!(error = %e, "Content moderation error");
                Self::service_unavailable(
                    "GATE_UNAVAILABLE",
                    "Content moderation is unavailable, try again later",
                )
            }
        }
    }
}

/// "SnippetBounty" -> "SNIPPET_BOUNTY_NOT_FOUND"
fn not_found_code(entity: &str) -> String {
    let mut code = String::with_capacity(entity.len() + 12);
    for (i, c) in entity.chars().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            code.push('_');
        }
        code.push(c.to_ascii_uppercase());
    }
    code.push_str("_NOT_FOUND");
    code
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Unprocessable { code, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "unprocessable_entity",
                code,
                message,
            ),
            Self::ServiceUnavailable { code, message } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                code,
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

/// Body of update and delete responses
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StoreError;
    use crate::domain::ModerationError;

    #[test]
    fn test_not_found_code() {
        assert_eq!(not_found_code("User"), "USER_NOT_FOUND");
        assert_eq!(not_found_code("SnippetBounty"), "SNIPPET_BOUNTY_NOT_FOUND");
        assert_eq!(not_found_code("SnippetTag"), "SNIPPET_TAG_NOT_FOUND");
    }

    #[test]
    fn test_domain_error_status_mapping() {
        let cases = [
            (DomainError::not_found("Tag"), StatusCode::NOT_FOUND),
            (
                DomainError::Validation("Title is required".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::ContentRejected,
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                DomainError::StoreUnavailable(StoreError::unavailable("scylla", "down")),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                DomainError::GateUnavailable(ModerationError::Timeout),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (err, status) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }
}
