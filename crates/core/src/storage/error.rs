//! Errors raised while storing profile images.

use thiserror::Error;

/// Why a blob store call failed.
///
/// The first two variants reject the upload itself and are the caller's
/// fault; the rest come from the store or its settings.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Image is bigger than the configured cap.
    #[error("image has {size} bytes, the limit is {max} bytes")]
    FileTooLarge {
        /// Bytes received.
        size: u64,
        /// Configured cap.
        max: u64,
    },

    /// Content type outside the image allow-list.
    #[error("content type '{mime_type}' is not accepted for images")]
    InvalidMimeType {
        /// Declared or guessed content type.
        mime_type: String,
    },

    /// No object under that name.
    #[error("no stored object: {0}")]
    NotFound(String),

    /// Provider settings are unusable.
    #[error("blob store misconfigured: {0}")]
    Configuration(String),

    /// Backend call failed.
    #[error("blob store call failed: {0}")]
    Operation(String),
}

impl StorageError {
    /// Image over the size cap.
    #[must_use]
    pub fn file_too_large(size: u64, max: u64) -> Self {
        Self::FileTooLarge { size, max }
    }

    /// Content type not on the allow-list.
    #[must_use]
    pub fn invalid_mime_type(mime_type: impl Into<String>) -> Self {
        Self::InvalidMimeType {
            mime_type: mime_type.into(),
        }
    }

    /// Unusable provider settings.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Whether the uploaded file itself was refused (maps to 400).
    #[must_use]
    pub const fn is_rejected_upload(&self) -> bool {
        matches!(self, Self::FileTooLarge { .. } | Self::InvalidMimeType { .. })
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        let detail = err.to_string();
        match err.kind() {
            opendal::ErrorKind::NotFound => Self::NotFound(detail),
            opendal::ErrorKind::ConfigInvalid => Self::Configuration(detail),
            _ => Self::Operation(detail),
        }
    }
}
