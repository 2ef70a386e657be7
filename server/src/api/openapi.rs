//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{
    bug_bounties, comments, health, interactions, reports, snippet_bounties, snippet_tags,
    snippets, tags, users,
};
use crate::api::types::MessageResponse;
use crate::domain::fields::{
    BugBountyFields, CommentFields, InteractionFields, ReportFields, SnippetBountyFields,
    SnippetFields, SnippetTagFields, TagFields, UserFields,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Devspace API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Code snippet sharing"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "users", description = "User accounts"),
        (name = "snippets", description = "Code snippets"),
        (name = "tags", description = "Tags"),
        (name = "snippet-tags", description = "Snippet to tag links"),
        (name = "interactions", description = "Reactions to snippets"),
        (name = "snippet-bounties", description = "Bounties on snippets"),
        (name = "bug-bounties", description = "Platform-wide bug bounties"),
        (name = "reports", description = "Snippet reports"),
        (name = "comments", description = "Snippet comments")
    ),
    paths(
        health::health,
        users::create_user,
        users::get_user,
        users::update_user,
        users::delete_user,
        snippets::create_snippet,
        snippets::get_snippet,
        snippets::update_snippet,
        snippets::delete_snippet,
        tags::create_tag,
        tags::get_tag,
        tags::update_tag,
        tags::delete_tag,
        snippet_tags::create_snippet_tag,
        snippet_tags::get_snippet_tag,
        snippet_tags::delete_snippet_tag,
        interactions::create_interaction,
        interactions::get_interaction,
        interactions::delete_interaction,
        snippet_bounties::create_snippet_bounty,
        snippet_bounties::get_snippet_bounty,
        snippet_bounties::update_snippet_bounty,
        snippet_bounties::delete_snippet_bounty,
        bug_bounties::create_bug_bounty,
        bug_bounties::get_bug_bounty,
        bug_bounties::update_bug_bounty,
        bug_bounties::delete_bug_bounty,
        reports::create_report,
        reports::get_report,
        reports::delete_report,
        comments::create_comment,
        comments::get_comment,
        comments::update_comment,
        comments::delete_comment,
    ),
    components(schemas(
        MessageResponse,
        health::HealthResponse,
        // Request bodies
        UserFields,
        SnippetFields,
        TagFields,
        SnippetTagFields,
        InteractionFields,
        SnippetBountyFields,
        BugBountyFields,
        ReportFields,
        CommentFields,
        // Responses
        users::types::UserDto,
        users::types::UserCreatedResponse,
        snippets::types::SnippetDto,
        snippets::types::SnippetCreatedResponse,
        tags::types::TagDto,
        tags::types::TagCreatedResponse,
        snippet_tags::types::SnippetTagDto,
        snippet_tags::types::SnippetTagCreatedResponse,
        interactions::types::InteractionDto,
        interactions::types::InteractionCreatedResponse,
        snippet_bounties::types::SnippetBountyDto,
        snippet_bounties::types::SnippetBountyCreatedResponse,
        bug_bounties::types::BugBountyDto,
        bug_bounties::types::BugBountyCreatedResponse,
        reports::types::ReportDto,
        reports::types::ReportCreatedResponse,
        comments::types::CommentDto,
        comments::types::CommentCreatedResponse,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Devspace API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>"#;
