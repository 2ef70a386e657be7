//! In-memory entity store
//!
//! One `DashMap` holds every table; entries are keyed `table/key` and stored
//! MessagePack-encoded so records go through the same serialize boundary as
//! a real backend (no shared references leak out of the store).

use dashmap::DashMap;

use super::error::StoreError;
use super::record::{Record, RowKey};

pub const BACKEND_NAME: &str = "memory";

#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_key<R: Record>(key: &R::Key) -> String {
        format!("{}/{}", R::TABLE, key.encode())
    }

    pub fn get<R: Record>(&self, key: &R::Key) -> Result<Option<R>, StoreError> {
        let Some(bytes) = self.entries.get(&Self::entry_key::<R>(key)) else {
            return Ok(None);
        };
        rmp_serde::from_slice(bytes.value())
            .map(Some)
            .map_err(|e| StoreError::decode(R::TABLE, e))
    }

    /// Overwrite whatever is stored at the record's key
    pub fn put<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        let bytes = rmp_serde::to_vec_named(record).map_err(|e| StoreError::encode(R::TABLE, e))?;
        self.entries
            .insert(Self::entry_key::<R>(&record.key()), bytes);
        Ok(())
    }

    /// Remove the record if present. Absent keys are not an error.
    pub fn delete<R: Record>(&self, key: &R::Key) -> Result<(), StoreError> {
        self.entries.remove(&Self::entry_key::<R>(key));
        Ok(())
    }

    /// Number of rows stored in a table
    pub fn count<R: Record>(&self) -> usize {
        let prefix = format!("{}/", R::TABLE);
        self.entries
            .iter()
            .filter(|e| e.key().starts_with(&prefix))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::SnippetTagKey;
    use crate::data::types::{SnippetTagRow, TagRow, UserRow};
    use uuid::Uuid;

    fn user(name: &str) -> UserRow {
        UserRow {
            user_id: Uuid::new_v4(),
            username: name.to_string(),
            email: format!("{}@x.com", name),
            password_hash: "h".to_string(),
        }
    }

    #[test]
    fn test_get_missing_returns_none() {
        let store = MemoryStore::new();
        assert!(store.get::<UserRow>(&Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_put_then_get() {
        let store = MemoryStore::new();
        let row = user("a");
        store.put(&row).unwrap();
        assert_eq!(store.get::<UserRow>(&row.user_id).unwrap(), Some(row));
    }

    #[test]
    fn test_put_overwrites() {
        let store = MemoryStore::new();
        let mut row = user("a");
        store.put(&row).unwrap();
        row.username = "b".to_string();
        store.put(&row).unwrap();

        let stored = store.get::<UserRow>(&row.user_id).unwrap().unwrap();
        assert_eq!(stored.username, "b");
        assert_eq!(store.count::<UserRow>(), 1);
    }

    #[test]
    fn test_delete_absent_is_ok() {
        let store = MemoryStore::new();
        store.delete::<UserRow>(&Uuid::new_v4()).unwrap();
    }

    #[test]
    fn test_tables_do_not_collide() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        store
            .put(&UserRow {
                user_id: id,
                ..user("a")
            })
            .unwrap();
        store
            .put(&TagRow {
                tag_id: id,
                tag_name: "rust".to_string(),
            })
            .unwrap();

        assert!(store.get::<UserRow>(&id).unwrap().is_some());
        assert!(store.get::<TagRow>(&id).unwrap().is_some());
        store.delete::<TagRow>(&id).unwrap();
        assert!(store.get::<UserRow>(&id).unwrap().is_some());
    }

    #[test]
    fn test_composite_key_is_unique_per_pair() {
        let store = MemoryStore::new();
        let row = SnippetTagRow {
            snippet_id: Uuid::new_v4(),
            tag_id: Uuid::new_v4(),
        };
        store.put(&row).unwrap();
        store.put(&row).unwrap();
        assert_eq!(store.count::<SnippetTagRow>(), 1);

        let key = SnippetTagKey {
            snippet_id: row.snippet_id,
            tag_id: row.tag_id,
        };
        assert_eq!(store.get::<SnippetTagRow>(&key).unwrap(), Some(row));
    }
}
