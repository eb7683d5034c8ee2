//! # buildhub-api
//!
//! HTTP API layer for BuildHub built on Axum.
//!
//! Provides the REST endpoints for documents, versions, folders, tags, and
//! finance totals, plus middleware (CORS, logging, timeouts), extractors,
//! DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
