//! Data storage layer
//!
//! Provides the entity store used by the resource layer:
//! - `record` - `Record`/`RowKey` traits every table implements
//! - `types` - Row types, one per table
//! - `memory` - Process-local backend (development and tests)
//! - `scylla` - ScyllaDB / Cassandra backend
//! - `error` - Store error type
//!
//! Every query is an exact primary-key lookup; no scans, joins or secondary
//! indexes are used anywhere.

pub mod error;
pub mod memory;
pub mod record;
pub mod scylla;
pub mod types;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use record::{Column, Record, RowKey, SnippetTagKey};
pub use self::scylla::ScyllaStore;

use std::sync::Arc;

use crate::core::config::{StoreBackend, StoreConfig};

/// Entity store service enum
///
/// Wraps the backend-specific store. Constructed once at startup and shared
/// (`Arc`) with the resource layer.
pub enum EntityStore {
    /// In-memory backend (default, lost on restart)
    Memory(Arc<MemoryStore>),
    /// ScyllaDB backend (for clustered deployments)
    Scylla(Arc<ScyllaStore>),
}

impl EntityStore {
    /// Initialize the store based on configuration
    pub async fn init(config: &StoreConfig) -> Result<Self, StoreError> {
        match config.backend {
            StoreBackend::Memory => Ok(Self::memory()),
            StoreBackend::Scylla => {
                let scylla = config.scylla.as_ref().ok_or_else(|| {
                    StoreError::Config("Scylla configuration required".to_string())
                })?;
                let store = ScyllaStore::init(scylla).await?;
                Ok(Self::Scylla(Arc::new(store)))
            }
        }
    }

    /// Fresh, empty in-memory store
    pub fn memory() -> Self {
        Self::Memory(Arc::new(MemoryStore::new()))
    }

    /// Point lookup by primary key
    pub async fn get<R: Record>(&self, key: &R::Key) -> Result<Option<R>, StoreError> {
        match self {
            Self::Memory(m) => m.get(key),
            Self::Scylla(s) => s.get(key).await,
        }
    }

    /// Unconditional overwrite at the record's primary key (last writer wins)
    pub async fn put<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        match self {
            Self::Memory(m) => m.put(record),
            Self::Scylla(s) => s.put(record).await,
        }
    }

    /// Delete by primary key; a missing key is a no-op
    pub async fn delete<R: Record>(&self, key: &R::Key) -> Result<(), StoreError> {
        match self {
            Self::Memory(m) => m.delete::<R>(key),
            Self::Scylla(s) => s.delete::<R>(key).await,
        }
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        match self {
            Self::Memory(_) => Ok(()),
            Self::Scylla(s) => s.health_check().await,
        }
    }

    /// Release the store at shutdown
    ///
    /// The Scylla driver closes its connection pool when the last session
    /// handle is dropped; this only clears the memory backend.
    pub async fn close(&self) {
        match self {
            Self::Memory(m) => m.clear(),
            Self::Scylla(_) => {}
        }
        tracing::debug!(backend = self.backend_name(), "Entity store closed");
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => memory::BACKEND_NAME,
            Self::Scylla(_) => self::scylla::BACKEND_NAME,
        }
    }
}
