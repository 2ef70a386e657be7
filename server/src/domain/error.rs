//! Domain error kinds

use thiserror::Error;

use super::moderation::ModerationError;
use crate::data::StoreError;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Read (or strict update) against an absent key
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// Required field missing or out of range
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Classifier flagged the submitted text; nothing was written
    #[error("Content rejected by moderation")]
    ContentRejected,

    #[error("Entity store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// Classifier unreachable and the gate fails closed
    #[error("Content moderation unavailable: {0}")]
    GateUnavailable(#[source] ModerationError),
}

impl DomainError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(format_validation_errors(&errors))
    }
}

/// Flatten validator errors into one `; `-separated message
pub fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: validation failed", field))
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        assert_eq!(DomainError::not_found("Snippet").to_string(), "Snippet not found");
    }

    #[test]
    fn test_store_error_converts() {
        let err: DomainError = StoreError::unavailable("scylla", "down").into();
        assert!(matches!(err, DomainError::StoreUnavailable(_)));
    }
}
