use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{CategorySlug, Post, PostSlug, PostType, Tool, ToolSlug};
use super::repository::{CatalogRepository, RepositoryError};

/// Read-only directory endpoints backing the tools and blog pages.
pub fn catalog_router<C>(catalog: Arc<C>) -> Router
where
    C: CatalogRepository + 'static,
{
    Router::new()
        .route("/api/categories", get(categories_handler::<C>))
        .route("/api/categories/:slug", get(category_handler::<C>))
        .route("/api/tools", get(tools_handler::<C>))
        .route("/api/tools/:slug", get(tool_handler::<C>))
        .route("/api/posts", get(posts_handler::<C>))
        .route("/api/posts/:slug", get(post_handler::<C>))
        .with_state(catalog)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ToolsQuery {
    category: Option<String>,
    #[serde(default)]
    featured: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PostsQuery {
    #[serde(rename = "type")]
    post_type: Option<PostType>,
    #[serde(default)]
    featured: bool,
}

/// Post body plus the tools it links to.
#[derive(Debug, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub tools: Vec<Tool>,
}

const FEATURED_LIMIT: usize = 6;
const FEATURED_POSTS_LIMIT: usize = 3;

pub(crate) async fn categories_handler<C>(State(catalog): State<Arc<C>>) -> Response
where
    C: CatalogRepository + 'static,
{
    match catalog.categories() {
        Ok(categories) => (StatusCode::OK, axum::Json(categories)).into_response(),
        Err(err) => unavailable(err),
    }
}

pub(crate) async fn category_handler<C>(
    State(catalog): State<Arc<C>>,
    Path(slug): Path<String>,
) -> Response
where
    C: CatalogRepository + 'static,
{
    match catalog.category_by_slug(&CategorySlug(slug.clone())) {
        Ok(Some(category)) => (StatusCode::OK, axum::Json(category)).into_response(),
        Ok(None) => not_found("category", &slug),
        Err(err) => unavailable(err),
    }
}

pub(crate) async fn tools_handler<C>(
    State(catalog): State<Arc<C>>,
    Query(query): Query<ToolsQuery>,
) -> Response
where
    C: CatalogRepository + 'static,
{
    let result = match (query.category, query.featured) {
        (Some(category), true) => catalog
            .tools_by_category(&CategorySlug(category))
            .map(|tools| {
                tools
                    .into_iter()
                    .filter(|tool| tool.featured)
                    .take(FEATURED_LIMIT)
                    .collect::<Vec<_>>()
            }),
        (None, true) => catalog.featured_tools(FEATURED_LIMIT),
        (Some(category), false) => catalog.tools_by_category(&CategorySlug(category)),
        (None, false) => catalog.tools(),
    };

    match result {
        Ok(tools) => (StatusCode::OK, axum::Json(tools)).into_response(),
        Err(err) => unavailable(err),
    }
}

pub(crate) async fn tool_handler<C>(
    State(catalog): State<Arc<C>>,
    Path(slug): Path<String>,
) -> Response
where
    C: CatalogRepository + 'static,
{
    match catalog.tool_by_slug(&ToolSlug(slug.clone())) {
        Ok(Some(tool)) => (StatusCode::OK, axum::Json(tool)).into_response(),
        Ok(None) => not_found("tool", &slug),
        Err(err) => unavailable(err),
    }
}

pub(crate) async fn posts_handler<C>(
    State(catalog): State<Arc<C>>,
    Query(query): Query<PostsQuery>,
) -> Response
where
    C: CatalogRepository + 'static,
{
    let result = match (query.post_type, query.featured) {
        (Some(post_type), _) => catalog.posts_by_type(post_type),
        (None, true) => catalog.featured_posts(FEATURED_POSTS_LIMIT),
        (None, false) => catalog.posts(),
    };

    match result {
        Ok(posts) => (StatusCode::OK, axum::Json(posts)).into_response(),
        Err(err) => unavailable(err),
    }
}

pub(crate) async fn post_handler<C>(
    State(catalog): State<Arc<C>>,
    Path(slug): Path<String>,
) -> Response
where
    C: CatalogRepository + 'static,
{
    let post = match catalog.post_by_slug(&PostSlug(slug.clone())) {
        Ok(Some(post)) => post,
        Ok(None) => return not_found("post", &slug),
        Err(err) => return unavailable(err),
    };

    match catalog.tools_for_post(&post) {
        Ok(tools) => (StatusCode::OK, axum::Json(PostDetail { post, tools })).into_response(),
        Err(err) => unavailable(err),
    }
}

fn not_found(kind: &str, slug: &str) -> Response {
    let payload = json!({
        "error": format!("{kind} '{slug}' not found"),
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn unavailable(err: RepositoryError) -> Response {
    let payload = json!({
        "error": err.to_string(),
    });
    (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
}
