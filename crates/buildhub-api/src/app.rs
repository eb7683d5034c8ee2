//! Application builder: wires router, middleware, and state into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use buildhub_core::config::AppConfig;
use buildhub_core::error::AppError;
use buildhub_database::DatabasePool;
use buildhub_database::repositories::{
    PgDocumentRepository, PgFolderRepository, PgTagRepository,
};

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = state.config.server.clone();

    build_router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_seconds,
        )))
        .layer(build_compression_layer())
        .layer(build_cors_layer(&server.cors))
        .layer(TraceLayer::new_for_http())
}

/// Runs the BuildHub server against PostgreSQL until Ctrl+C.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    tracing::info!("Starting BuildHub server...");

    let pool = db.pool().clone();
    let document_repo = Arc::new(PgDocumentRepository::new(pool.clone()));
    let folder_repo = Arc::new(PgFolderRepository::new(pool.clone()));
    let tag_repo = Arc::new(PgTagRepository::new(pool));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state =
        AppState::new(config, document_repo, folder_repo, tag_repo).with_database(db.clone());
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("BuildHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    db.close().await;
    tracing::info!("BuildHub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
