//! Record and key traits shared by every store backend

use scylla::deserialize::row::DeserializeRow;
use scylla::serialize::row::SerializeRow;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// A column declaration used to generate table DDL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub cql_type: &'static str,
}

impl Column {
    pub const fn new(name: &'static str, cql_type: &'static str) -> Self {
        Self { name, cql_type }
    }
}

/// Primary key of a record.
///
/// `values()` must yield one bound value per `Record::PRIMARY_KEY` column,
/// in the same order.
pub trait RowKey: Send + Sync {
    type Values: SerializeRow + Send + Sync;

    /// Values bound to the key columns of a lookup/delete statement
    fn values(&self) -> Self::Values;

    /// Stable string form, used as the in-memory map key
    fn encode(&self) -> String;
}

impl RowKey for Uuid {
    type Values = (Uuid,);

    fn values(&self) -> Self::Values {
        (*self,)
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

/// Composite key of the snippet/tag junction table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnippetTagKey {
    pub snippet_id: Uuid,
    pub tag_id: Uuid,
}

impl RowKey for SnippetTagKey {
    type Values = (Uuid, Uuid);

    fn values(&self) -> Self::Values {
        (self.snippet_id, self.tag_id)
    }

    fn encode(&self) -> String {
        format!("{}/{}", self.snippet_id, self.tag_id)
    }
}

/// A row of one logical table.
///
/// Implementors derive both serde (memory backend) and the scylla row traits
/// (wide-column backend). Column names in `COLUMNS` must match the struct
/// field names, since rows are bound and read by name.
pub trait Record:
    Serialize
    + DeserializeOwned
    + SerializeRow
    + for<'frame, 'metadata> DeserializeRow<'frame, 'metadata>
    + Clone
    + Send
    + Sync
    + 'static
{
    /// Table name
    const TABLE: &'static str;
    /// All columns, key columns first
    const COLUMNS: &'static [Column];
    /// Primary key columns (first is the partition key)
    const PRIMARY_KEY: &'static [&'static str];

    type Key: RowKey;

    fn key(&self) -> Self::Key;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_key_encode() {
        let id = Uuid::nil();
        assert_eq!(id.encode(), "00000000-0000-0000-0000-000000000000");
        assert_eq!(id.values(), (id,));
    }

    #[test]
    fn test_snippet_tag_key_encode_is_ordered() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let ab = SnippetTagKey {
            snippet_id: a,
            tag_id: b,
        };
        let ba = SnippetTagKey {
            snippet_id: b,
            tag_id: a,
        };
        assert_ne!(ab.encode(), ba.encode());
        assert_eq!(ab.values(), (a, b));
    }
}
