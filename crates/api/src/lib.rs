//! HTTP API layer with Axum routes and validating extractors.
//!
//! This crate provides:
//! - REST API routes for students, professors and comments
//! - Request extractors that validate bodies before handlers run
//! - The JSON error envelope

pub mod error;
pub mod extractors;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::ApiError;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use escola_core::storage::BlobStore;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Relational store connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Document store database holding comments.
    pub documents: mongodb::Database,
    /// Blob store for profile images.
    pub storage: Arc<BlobStore>,
}

/// Creates the main application router.
///
/// Request bodies larger than `body_limit_bytes` are rejected before any
/// handler runs.
pub fn create_router(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .nest("/api", routes::api_routes())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
