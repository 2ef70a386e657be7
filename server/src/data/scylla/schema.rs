//! CQL statement generation from `Record` declarations

use crate::data::record::Record;
use crate::data::types::{
    BugBountyRow, CommentRow, InteractionRow, ReportRow, SnippetBountyRow, SnippetRow,
    SnippetTagRow, TagRow, UserRow,
};

pub fn create_keyspace_cql(keyspace: &str, replication_factor: u32) -> String {
    format!(
        "CREATE KEYSPACE IF NOT EXISTS {} WITH REPLICATION = \
         {{'class': 'SimpleStrategy', 'replication_factor': {}}}",
        keyspace, replication_factor
    )
}

pub fn create_table_cql<R: Record>(keyspace: &str) -> String {
    let columns: Vec<String> = R::COLUMNS
        .iter()
        .map(|c| format!("{} {}", c.name, c.cql_type))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {}.{} ({}, PRIMARY KEY ({}))",
        keyspace,
        R::TABLE,
        columns.join(", "),
        R::PRIMARY_KEY.join(", ")
    )
}

fn column_list<R: Record>() -> String {
    R::COLUMNS
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn key_predicate<R: Record>() -> String {
    R::PRIMARY_KEY
        .iter()
        .map(|k| format!("{} = ?", k))
        .collect::<Vec<_>>()
        .join(" AND ")
}

pub fn select_cql<R: Record>(keyspace: &str) -> String {
    format!(
        "SELECT {} FROM {}.{} WHERE {}",
        column_list::<R>(),
        keyspace,
        R::TABLE,
        key_predicate::<R>()
    )
}

/// Upsert by primary key (CQL INSERT never checks for an existing row)
pub fn insert_cql<R: Record>(keyspace: &str) -> String {
    let markers = vec!["?"; R::COLUMNS.len()].join(", ");
    format!(
        "INSERT INTO {}.{} ({}) VALUES ({})",
        keyspace,
        R::TABLE,
        column_list::<R>(),
        markers
    )
}

pub fn delete_cql<R: Record>(keyspace: &str) -> String {
    format!(
        "DELETE FROM {}.{} WHERE {}",
        keyspace,
        R::TABLE,
        key_predicate::<R>()
    )
}

/// Every DDL statement needed by the service, keyspace first
pub fn schema_statements(keyspace: &str, replication_factor: u32) -> Vec<String> {
    vec![
        create_keyspace_cql(keyspace, replication_factor),
        create_table_cql::<UserRow>(keyspace),
        create_table_cql::<SnippetRow>(keyspace),
        create_table_cql::<TagRow>(keyspace),
        create_table_cql::<SnippetTagRow>(keyspace),
        create_table_cql::<InteractionRow>(keyspace),
        create_table_cql::<SnippetBountyRow>(keyspace),
        create_table_cql::<BugBountyRow>(keyspace),
        create_table_cql::<ReportRow>(keyspace),
        create_table_cql::<CommentRow>(keyspace),
    ]
}
