//! Comment routes under `/comments`.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde::Serialize;

use crate::{
    AppState,
    error::{ApiError, parse_id},
    extractors::CommentBody,
};
use escola_core::comment::{Comment, CommentService};
use escola_db::CommentRepository;

/// Creates the comment routes.
///
/// `GET /comments/{id}` looks comments up by student, while `PUT` and
/// `DELETE` on the same path address a single comment by its own id.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/comments", get(list_comments).post(create_comment))
        .route(
            "/comments/{id}",
            put(update_comment)
                .delete(delete_comment)
                .get(list_student_comments),
        )
}

/// Comment as returned to clients.
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    /// Document identifier (hex ObjectId).
    #[serde(rename = "_id")]
    pub id: String,
    /// Student the comment is about.
    pub id_aluno: i32,
    /// Comment text.
    pub comentario: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            id_aluno: comment.student_id,
            comentario: comment.text,
        }
    }
}

fn service(state: &AppState) -> CommentService<CommentRepository> {
    CommentService::new(CommentRepository::new(&state.documents))
}

fn respond(comments: Vec<Comment>) -> Json<Vec<CommentResponse>> {
    Json(comments.into_iter().map(CommentResponse::from).collect())
}

/// POST `/comments`
async fn create_comment(
    State(state): State<AppState>,
    CommentBody(fields): CommentBody,
) -> Result<impl IntoResponse, ApiError> {
    let comment = service(&state).create(fields).await?;
    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

/// GET `/comments`
async fn list_comments(
    State(state): State<AppState>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    Ok(respond(service(&state).list().await?))
}

/// GET `/comments/{id_aluno}`
async fn list_student_comments(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    let student_id = parse_id(&student_id)?;
    Ok(respond(service(&state).list_for_student(student_id).await?))
}

/// PUT `/comments/{id}`
async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CommentBody(fields): CommentBody,
) -> Result<Json<CommentResponse>, ApiError> {
    let comment = service(&state).update(&id, fields).await?;
    Ok(Json(comment.into()))
}

/// DELETE `/comments/{id}`
async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service(&state).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
