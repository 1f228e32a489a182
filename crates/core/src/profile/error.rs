//! Profile lifecycle errors.

use thiserror::Error;

use crate::repository::RepositoryError;
use crate::storage::StorageError;

/// Profile operation errors.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// No record with this identifier.
    #[error("record not found: {0}")]
    NotFound(i32),

    /// The request carried no usable image and none can be kept.
    #[error("an image file is required")]
    ImageRequired,

    /// The stored image reference no longer resolves to an object.
    #[error("stored image is no longer available: {0}")]
    ImageUnavailable(String),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
