//! Row types for every table in the entity store

mod entities;

pub use entities::{
    BugBountyRow, CommentRow, InteractionRow, ReportRow, SnippetBountyRow, SnippetRow,
    SnippetTagRow, TagRow, UserRow,
};
