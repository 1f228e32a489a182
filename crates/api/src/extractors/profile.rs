//! Multipart forms for students and professors.

use axum::extract::{FromRequest, Multipart, Request};
use serde_json::Value;

use crate::error::ApiError;
use escola_core::profile::{ImageUpload, StudentFields};
use escola_core::validation::{self, Fields, ProfessorInput};

/// Multipart parts that may carry the profile image.
const IMAGE_FIELDS: [&str; 2] = ["LINK_IMAGE", "file"];

/// Raw multipart form: text parts plus the first non-empty image part.
#[derive(Debug, Default)]
pub struct ProfileForm {
    /// Text parts by name.
    pub fields: Fields,
    /// Uploaded image, if any.
    pub image: Option<ImageUpload>,
}

impl<S> FromRequest<S> for ProfileForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match field.file_name().map(str::to_owned) {
                Some(file_name) if IMAGE_FIELDS.contains(&name.as_str()) => {
                    let content_type = field.content_type().unwrap_or_default().to_owned();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::bad_request(e.body_text()))?;
                    if form.image.as_ref().is_none_or(ImageUpload::is_empty) {
                        form.image = Some(ImageUpload {
                            file_name,
                            content_type,
                            data,
                        });
                    }
                }
                Some(_) => {}
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(e.body_text()))?;
                    form.fields.insert(name, Value::String(text));
                }
            }
        }

        Ok(form)
    }
}

/// Validated student form.
#[derive(Debug)]
pub struct StudentForm {
    /// `NOME`, `EMAIL`, `IDADE`.
    pub fields: StudentFields,
    /// Uploaded image, if any.
    pub image: Option<ImageUpload>,
}

impl<S> FromRequest<S> for StudentForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let form = ProfileForm::from_request(req, state).await?;
        Ok(Self {
            fields: validation::student_fields(&form.fields)?,
            image: form.image,
        })
    }
}

/// Validated professor form. The password is still plaintext.
#[derive(Debug)]
pub struct ProfessorForm {
    /// `NOME`, `CARGO`, `EMAIL`, `PASSWORD`.
    pub input: ProfessorInput,
    /// Uploaded image, if any.
    pub image: Option<ImageUpload>,
}

impl<S> FromRequest<S> for ProfessorForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let form = ProfileForm::from_request(req, state).await?;
        Ok(Self {
            input: validation::professor_fields(&form.fields)?,
            image: form.image,
        })
    }
}
