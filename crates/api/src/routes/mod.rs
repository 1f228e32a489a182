//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod comments;
pub mod health;
pub mod professors;
pub mod students;

/// Creates the router mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(students::routes())
        .merge(professors::routes())
        .merge(comments::routes())
}
