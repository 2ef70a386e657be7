//! API route handlers

pub mod bug_bounties;
pub mod comments;
pub mod health;
pub mod interactions;
pub mod reports;
pub mod snippet_bounties;
pub mod snippet_tags;
pub mod snippets;
pub mod tags;
pub mod users;

use std::sync::Arc;

use axum::Router;

use crate::domain::Resources;

/// All entity routes, mounted at the root
pub fn resource_routes(resources: Arc<Resources>) -> Router<()> {
    Router::new()
        .merge(users::routes(resources.clone()))
        .merge(snippets::routes(resources.clone()))
        .merge(tags::routes(resources.clone()))
        .merge(snippet_tags::routes(resources.clone()))
        .merge(interactions::routes(resources.clone()))
        .merge(snippet_bounties::routes(resources.clone()))
        .merge(bug_bounties::routes(resources.clone()))
        .merge(reports::routes(resources.clone()))
        .merge(comments::routes(resources))
}
