//! Error type for the entity store
//!
//! Every backend failure collapses into one of these variants. The resource
//! layer treats all of them as "store unavailable"; the variants only exist
//! to keep log lines precise.

use thiserror::Error;

/// Entity store error
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend could not be reached (connect, schema setup, health probe)
    #[error("Backend {backend} is not available: {reason}")]
    Unavailable {
        backend: &'static str,
        reason: String,
    },

    /// A statement against a table failed (timeout, consistency not met, ...)
    #[error("Query on {table} failed: {reason}")]
    Query { table: &'static str, reason: String },

    /// Record could not be serialized for storage
    #[error("Failed to encode {table} record: {reason}")]
    Encode { table: &'static str, reason: String },

    /// Stored bytes or returned row did not match the record type
    #[error("Failed to decode {table} record: {reason}")]
    Decode { table: &'static str, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Create a backend unavailable error
    pub fn unavailable(backend: &'static str, reason: impl ToString) -> Self {
        Self::Unavailable {
            backend,
            reason: reason.to_string(),
        }
    }

    /// Create a query error for a table
    pub fn query(table: &'static str, reason: impl ToString) -> Self {
        Self::Query {
            table,
            reason: reason.to_string(),
        }
    }

    pub fn encode(table: &'static str, reason: impl ToString) -> Self {
        Self::Encode {
            table,
            reason: reason.to_string(),
        }
    }

    pub fn decode(table: &'static str, reason: impl ToString) -> Self {
        Self::Decode {
            table,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_error_display() {
        let err = StoreError::unavailable("scylla", "connection refused");
        assert_eq!(
            err.to_string(),
            "Backend scylla is not available: connection refused"
        );
    }

    #[test]
    fn test_query_error_display() {
        let err = StoreError::query("snippets", "timed out");
        assert_eq!(err.to_string(), "Query on snippets failed: timed out");
    }

    #[test]
    fn test_decode_error_display() {
        let err = StoreError::decode("users", "missing column");
        assert_eq!(err.to_string(), "Failed to decode users record: missing column");
    }
}
