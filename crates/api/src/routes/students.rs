//! Student routes under `/aluno`.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;

use crate::{
    AppState,
    error::{ApiError, parse_id},
    extractors::StudentForm,
};
use escola_core::profile::{ProfileService, Student};
use escola_db::StudentRepository;

const LABEL: &str = "Aluno";

/// Creates the student routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/aluno", get(list_students).post(create_student))
        .route(
            "/aluno/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
}

/// Student as returned to clients.
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    /// Identifier.
    #[serde(rename = "ID")]
    pub id: i32,
    /// Full name.
    #[serde(rename = "NOME")]
    pub name: String,
    /// Contact email.
    #[serde(rename = "EMAIL")]
    pub email: String,
    /// Age in years.
    #[serde(rename = "IDADE")]
    pub age: i32,
    /// Profile image URL.
    #[serde(rename = "LINK_IMAGE")]
    pub image_link: Option<String>,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            email: student.email,
            age: student.age,
            image_link: student.image_link,
        }
    }
}

fn service(state: &AppState) -> ProfileService<StudentRepository> {
    ProfileService::new(
        state.storage.clone(),
        StudentRepository::new((*state.db).clone()),
    )
}

fn profile_error(err: escola_core::profile::ProfileError) -> ApiError {
    ApiError::profile(err, LABEL)
}

/// POST `/aluno`
async fn create_student(
    State(state): State<AppState>,
    form: StudentForm,
) -> Result<impl IntoResponse, ApiError> {
    let student = service(&state)
        .create(form.fields, form.image)
        .await
        .map_err(profile_error)?;

    Ok((StatusCode::CREATED, Json(StudentResponse::from(student))))
}

/// GET `/aluno`
async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let students = service(&state).list().await.map_err(profile_error)?;
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// GET `/aluno/{id}`
async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudentResponse>, ApiError> {
    let id = parse_id(&id)?;
    let student = service(&state).get(id).await.map_err(profile_error)?;
    Ok(Json(student.into()))
}

/// PUT `/aluno/{id}`
async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: StudentForm,
) -> Result<Json<StudentResponse>, ApiError> {
    let id = parse_id(&id)?;
    let student = service(&state)
        .update(id, form.fields, form.image)
        .await
        .map_err(profile_error)?;
    Ok(Json(student.into()))
}

/// DELETE `/aluno/{id}`
async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    service(&state).delete(id).await.map_err(profile_error)?;
    Ok(StatusCode::NO_CONTENT)
}
