//! Professor routes under `/professor`.
//!
//! Passwords arrive in plaintext, are hashed before the record is written and
//! never appear in a response.

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
    extractors::ProfessorForm,
};
use escola_core::auth::hash_password;
use escola_core::profile::{Professor, ProfessorFields, ProfileError, ProfileService};
use escola_core::validation::ProfessorInput;
use escola_db::ProfessorRepository;

const LABEL: &str = "Professor";

/// Creates the professor routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/professor", get(list_professors).post(create_professor))
        .route(
            "/professor/{id}",
            get(get_professor)
                .put(update_professor)
                .delete(delete_professor),
        )
}

/// Professor as returned to clients.
#[derive(Debug, Serialize)]
pub struct ProfessorResponse {
    /// Identifier.
    #[serde(rename = "ID")]
    pub id: i32,
    /// Full name.
    #[serde(rename = "NOME")]
    pub name: String,
    /// Position held.
    #[serde(rename = "CARGO")]
    pub role: String,
    /// Contact email.
    #[serde(rename = "EMAIL")]
    pub email: String,
    /// Profile image URL.
    #[serde(rename = "LINK_IMAGE")]
    pub image_link: Option<String>,
}

impl From<Professor> for ProfessorResponse {
    fn from(professor: Professor) -> Self {
        Self {
            id: professor.id,
            name: professor.name,
            role: professor.role,
            email: professor.email,
            image_link: professor.image_link,
        }
    }
}

fn service(state: &AppState) -> ProfileService<ProfessorRepository> {
    ProfileService::new(
        state.storage.clone(),
        ProfessorRepository::new((*state.db).clone()),
    )
}

fn profile_error(err: ProfileError) -> ApiError {
    ApiError::profile(err, LABEL)
}

fn fields(input: ProfessorInput) -> Result<ProfessorFields, ApiError> {
    Ok(ProfessorFields {
        password_hash: hash_password(&input.password)?,
        name: input.name,
        role: input.role,
        email: input.email,
    })
}

/// POST `/professor`
async fn create_professor(
    State(state): State<AppState>,
    form: ProfessorForm,
) -> Result<impl IntoResponse, ApiError> {
    let professor = service(&state)
        .create(fields(form.input)?, form.image)
        .await
        .map_err(profile_error)?;

    Ok((StatusCode::CREATED, Json(ProfessorResponse::from(professor))))
}

/// GET `/professor`
async fn list_professors(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfessorResponse>>, ApiError> {
    let professors = service(&state).list().await.map_err(profile_error)?;
    Ok(Json(
        professors.into_iter().map(ProfessorResponse::from).collect(),
    ))
}

/// GET `/professor/{id}`
async fn get_professor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProfessorResponse>, ApiError> {
    let id = parse_id(&id)?;
    let professor = service(&state).get(id).await.map_err(profile_error)?;
    Ok(Json(professor.into()))
}

/// PUT `/professor/{id}`
async fn update_professor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: ProfessorForm,
) -> Result<Json<ProfessorResponse>, ApiError> {
    let id = parse_id(&id)?;
    let professor = service(&state)
        .update(id, fields(form.input)?, form.image)
        .await
        .map_err(profile_error)?;
    Ok(Json(professor.into()))
}

/// DELETE `/professor/{id}`
async fn delete_professor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    service(&state).delete(id).await.map_err(profile_error)?;
    Ok(StatusCode::NO_CONTENT)
}
