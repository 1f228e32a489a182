//! Comment errors.

use thiserror::Error;

use crate::repository::RepositoryError;

/// Comment operation errors.
#[derive(Debug, Error)]
pub enum CommentError {
    /// No comment with this identifier.
    #[error("comment not found: {0}")]
    NotFound(String),

    /// The store holds no comments at all.
    #[error("no comments found")]
    NoneStored,

    /// No comments reference this student.
    #[error("no comments found for student {0}")]
    NoneForStudent(i32),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
