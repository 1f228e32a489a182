//! JSON body for comments.

use axum::{
    Json,
    extract::{FromRequest, Request},
};

use crate::error::ApiError;
use escola_core::comment::CommentFields;
use escola_core::validation::{self, Fields};

/// Validated comment body: `comentario` and `id_aluno`.
#[derive(Debug)]
pub struct CommentBody(pub CommentFields);

impl<S> FromRequest<S> for CommentBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(fields) = Json::<Fields>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        Ok(Self(validation::comment_fields(&fields)?))
    }
}
