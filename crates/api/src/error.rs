//! JSON error envelope for every route.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use escola_core::RepositoryError;
use escola_core::auth::CredentialError;
use escola_core::comment::CommentError;
use escola_core::profile::ProfileError;
use escola_core::validation::ValidationError;
use escola_shared::AppError;

/// Sent when a create or update has no usable image.
pub const IMAGE_MISSING: &str = "Imagem não enviada";

/// Error returned by handlers, rendered as `{"error": CODE, "message": ...}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Malformed request.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// Translate a profile failure; `label` names the resource in not-found
    /// messages.
    #[must_use]
    pub fn profile(err: ProfileError, label: &str) -> Self {
        match err {
            ProfileError::NotFound(_) => {
                Self(AppError::NotFound(format!("{label} não encontrado")))
            }
            ProfileError::ImageRequired | ProfileError::ImageUnavailable(_) => {
                Self::bad_request(IMAGE_MISSING)
            }
            ProfileError::Storage(e) if e.is_rejected_upload() => Self::bad_request(e.to_string()),
            ProfileError::Storage(e) => Self(AppError::Storage(e.to_string())),
            ProfileError::Repository(e) => e.into(),
        }
    }

    /// HTTP status of this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let body = Json(json!({
            "error": self.0.error_code(),
            "message": self.0.public_message(),
        }));
        (self.status(), body).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.message)
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidId(id) => {
                Self::bad_request(format!("Identificador inválido: {id}"))
            }
            RepositoryError::Database(msg) => Self(AppError::Database(msg)),
        }
    }
}

impl From<CommentError> for ApiError {
    fn from(err: CommentError) -> Self {
        match err {
            CommentError::NotFound(_) => {
                Self(AppError::NotFound("Comentário não encontrado".to_string()))
            }
            CommentError::NoneStored => {
                Self(AppError::NotFound("Comentários não encontrados".to_string()))
            }
            CommentError::NoneForStudent(_) => Self(AppError::NotFound(
                "Comentários não encontrados para o aluno especificado".to_string(),
            )),
            CommentError::Repository(e) => e.into(),
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

/// Parse a numeric path identifier.
///
/// # Errors
///
/// Returns a 400 error when `raw` is not a 32-bit integer.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| RepositoryError::InvalidId(raw.to_string()).into())
}
