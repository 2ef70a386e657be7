//! Row types, one per logical table
//!
//! Field names double as CQL column names. Identifiers are stored as native
//! `uuid`, timestamps as `timestamp` (millisecond precision).

use chrono::{DateTime, Utc};
use scylla::{DeserializeRow, SerializeRow};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::data::record::{Column, Record, SnippetTagKey};

/// Implements `Record` for a table keyed by a single uuid column
macro_rules! uuid_keyed {
    ($row:ty, $table:literal, $key:ident, [$(($col:literal, $ty:literal)),+ $(,)?]) => {
        impl Record for $row {
            const TABLE: &'static str = $table;
            const COLUMNS: &'static [Column] = &[$(Column::new($col, $ty)),+];
            const PRIMARY_KEY: &'static [&'static str] = &[stringify!($key)];

            type Key = Uuid;

            fn key(&self) -> Uuid {
                self.$key
            }
        }
    };
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SerializeRow, DeserializeRow)]
pub struct UserRow {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

uuid_keyed!(UserRow, "users", user_id, [
    ("user_id", "uuid"),
    ("username", "text"),
    ("email", "text"),
    ("password_hash", "text"),
]);

// ============================================================================
// Snippets
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SerializeRow, DeserializeRow)]
pub struct SnippetRow {
    pub snippet_id: Uuid,
    /// Owner (reference only, never enforced)
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

uuid_keyed!(SnippetRow, "snippets", snippet_id, [
    ("snippet_id", "uuid"),
    ("user_id", "uuid"),
    ("title", "text"),
    ("content", "text"),
    ("language", "text"),
    ("created_at", "timestamp"),
    ("updated_at", "timestamp"),
]);

// ============================================================================
// Tags
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SerializeRow, DeserializeRow)]
pub struct TagRow {
    pub tag_id: Uuid,
    pub tag_name: String,
}

uuid_keyed!(TagRow, "tags", tag_id, [("tag_id", "uuid"), ("tag_name", "text")]);

// ============================================================================
// Snippet <-> Tag junction
// ============================================================================

/// Junction row. The whole row is the key; writing the same pair twice
/// leaves one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SerializeRow, DeserializeRow)]
pub struct SnippetTagRow {
    pub snippet_id: Uuid,
    pub tag_id: Uuid,
}

impl Record for SnippetTagRow {
    const TABLE: &'static str = "snippet_tags";
    const COLUMNS: &'static [Column] = &[
        Column::new("snippet_id", "uuid"),
        Column::new("tag_id", "uuid"),
    ];
    const PRIMARY_KEY: &'static [&'static str] = &["snippet_id", "tag_id"];

    type Key = SnippetTagKey;

    fn key(&self) -> SnippetTagKey {
        SnippetTagKey {
            snippet_id: self.snippet_id,
            tag_id: self.tag_id,
        }
    }
}

// ============================================================================
// Interactions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SerializeRow, DeserializeRow)]
pub struct InteractionRow {
    pub interaction_id: Uuid,
    pub snippet_id: Uuid,
    pub user_id: Uuid,
    /// Reaction kind, e.g. "like"
    pub interaction_type: String,
    pub created_at: DateTime<Utc>,
}

uuid_keyed!(InteractionRow, "interactions", interaction_id, [
    ("interaction_id", "uuid"),
    ("snippet_id", "uuid"),
    ("user_id", "uuid"),
    ("interaction_type", "text"),
    ("created_at", "timestamp"),
]);

// ============================================================================
// Bounties
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SerializeRow, DeserializeRow)]
pub struct SnippetBountyRow {
    pub bounty_id: Uuid,
    pub snippet_id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub reward: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

uuid_keyed!(SnippetBountyRow, "snippet_bounties", bounty_id, [
    ("bounty_id", "uuid"),
    ("snippet_id", "uuid"),
    ("user_id", "uuid"),
    ("description", "text"),
    ("reward", "int"),
    ("status", "text"),
    ("created_at", "timestamp"),
    ("due_date", "timestamp"),
]);

/// Platform-wide bounty, not attached to a snippet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SerializeRow, DeserializeRow)]
pub struct BugBountyRow {
    pub bounty_id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub reward: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

uuid_keyed!(BugBountyRow, "bug_bounties", bounty_id, [
    ("bounty_id", "uuid"),
    ("user_id", "uuid"),
    ("description", "text"),
    ("reward", "int"),
    ("status", "text"),
    ("created_at", "timestamp"),
    ("due_date", "timestamp"),
]);

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SerializeRow, DeserializeRow)]
pub struct ReportRow {
    pub report_id: Uuid,
    pub snippet_id: Uuid,
    pub reported_by_user_id: Uuid,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

uuid_keyed!(ReportRow, "reports", report_id, [
    ("report_id", "uuid"),
    ("snippet_id", "uuid"),
    ("reported_by_user_id", "uuid"),
    ("reason", "text"),
    ("created_at", "timestamp"),
]);

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SerializeRow, DeserializeRow)]
pub struct CommentRow {
    pub comment_id: Uuid,
    pub snippet_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

uuid_keyed!(CommentRow, "comments", comment_id, [
    ("comment_id", "uuid"),
    ("snippet_id", "uuid"),
    ("user_id", "uuid"),
    ("content", "text"),
    ("created_at", "timestamp"),
]);

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_columns_lead_with_key<R: Record>() {
        for (i, key) in R::PRIMARY_KEY.iter().enumerate() {
            assert_eq!(R::COLUMNS[i].name, *key, "table {}", R::TABLE);
        }
    }

    #[test]
    fn test_key_columns_come_first() {
        assert_columns_lead_with_key::<UserRow>();
        assert_columns_lead_with_key::<SnippetRow>();
        assert_columns_lead_with_key::<TagRow>();
        assert_columns_lead_with_key::<SnippetTagRow>();
        assert_columns_lead_with_key::<InteractionRow>();
        assert_columns_lead_with_key::<SnippetBountyRow>();
        assert_columns_lead_with_key::<BugBountyRow>();
        assert_columns_lead_with_key::<ReportRow>();
        assert_columns_lead_with_key::<CommentRow>();
    }

    #[test]
    fn test_snippet_tag_key_matches_row() {
        let row = SnippetTagRow {
            snippet_id: Uuid::new_v4(),
            tag_id: Uuid::new_v4(),
        };
        let key = row.key();
        assert_eq!(key.snippet_id, row.snippet_id);
        assert_eq!(key.tag_id, row.tag_id);
    }

    #[test]
    fn test_bounty_reward_is_int() {
        for columns in [SnippetBountyRow::COLUMNS, BugBountyRow::COLUMNS] {
            assert!(columns.iter().any(|c| c.name == "reward" && c.cql_type == "int"));
        }
    }
}
