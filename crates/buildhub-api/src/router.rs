//! Route definitions for the BuildHub HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Requests carry metadata only, never file contents.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Build the Axum router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(document_routes())
        .merge(folder_routes())
        .merge(tag_routes())
        .merge(finance_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Document CRUD, versions, tags, download
fn document_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/documents",
            get(handlers::document::list_documents).post(handlers::document::create_document),
        )
        .route(
            "/documents/{id}",
            get(handlers::document::get_document)
                .put(handlers::document::update_document)
                .delete(handlers::document::delete_document),
        )
        .route(
            "/documents/{id}/versions",
            get(handlers::version::list_versions).post(handlers::version::upload_version),
        )
        .route("/documents/{id}/tags", post(handlers::document::add_tags))
        .route(
            "/documents/{id}/tags/{tag_id}",
            delete(handlers::document::remove_tag),
        )
        .route(
            "/documents/{id}/download",
            get(handlers::document::download_document),
        )
}

/// Folder CRUD and tree
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
        .route("/folders/tree", get(handlers::folder::get_tree))
        .route(
            "/folders/{id}",
            get(handlers::folder::get_folder)
                .put(handlers::folder::update_folder)
                .delete(handlers::folder::delete_folder),
        )
}

/// Tag catalogue
fn tag_routes() -> Router<AppState> {
    Router::new().route(
        "/tags",
        get(handlers::tag::list_tags).post(handlers::tag::create_tag),
    )
}

/// Financial calculations
fn finance_routes() -> Router<AppState> {
    Router::new().route("/finance/totals", post(handlers::finance::totals))
}

/// Health check (no auth)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
