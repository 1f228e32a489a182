//! Errors shared by every repository implementation.

use thiserror::Error;

/// Failure reported by a persistence boundary.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The identifier cannot address a record in this store.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The store rejected or failed the operation.
    #[error("database error: {0}")]
    Database(String),
}

impl RepositoryError {
    /// Create a database error.
    #[must_use]
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}
