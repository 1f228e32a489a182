//! Request field validation.
//!
//! Each entity has a fixed chain of field rules checked in order over a JSON
//! object. The first failing rule stops the chain; errors are never
//! aggregated. Multipart forms are validated by first collecting their text
//! parts into the same map.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::comment::CommentFields;
use crate::profile::StudentFields;

/// A required field was missing or had the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Name of the offending field as it appears on the wire.
    pub field: &'static str,
    /// Client-facing message.
    pub message: String,
}

impl ValidationError {
    fn text(field: &'static str) -> Self {
        Self {
            field,
            message: format!("O campo '{field}' é obrigatório e deve ser uma string."),
        }
    }

    fn number(field: &'static str) -> Self {
        Self {
            field,
            message: format!("O campo '{field}' é obrigatório e deve ser um number."),
        }
    }

    fn required(field: &'static str) -> Self {
        Self {
            field,
            message: format!("O campo '{field}' é obrigatório."),
        }
    }
}

/// Request body as seen by the rules.
pub type Fields = Map<String, Value>;

/// Required non-blank string. Returns the value trimmed.
///
/// # Errors
///
/// Returns an error naming `field` if it is absent, not a string or blank.
pub fn required_text(fields: &Fields, field: &'static str) -> Result<String, ValidationError> {
    match fields.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(ValidationError::text(field)),
    }
}

/// Required non-zero 32-bit integer, given either as a JSON number or a
/// numeric string. Integral floats such as `3.0` count; zero counts as absent.
#[allow(clippy::cast_possible_truncation)]
fn integer(fields: &Fields, field: &'static str) -> Option<i32> {
    let value = match fields.get(field)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if value.fract() != 0.0 || value == 0.0 {
        return None;
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value as i32)
}

/// Required integer field.
///
/// # Errors
///
/// Returns an error naming `field` if it is absent or not an integer.
pub fn required_integer(fields: &Fields, field: &'static str) -> Result<i32, ValidationError> {
    integer(fields, field).ok_or_else(|| ValidationError::number(field))
}

/// Student form: `NOME`, `EMAIL`, `IDADE`.
///
/// # Errors
///
/// Returns the first failing field.
pub fn student_fields(fields: &Fields) -> Result<StudentFields, ValidationError> {
    Ok(StudentFields {
        name: required_text(fields, "NOME")?,
        email: required_text(fields, "EMAIL")?,
        age: required_integer(fields, "IDADE")?,
    })
}

/// Professor form as submitted, password still in plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessorInput {
    /// Display name.
    pub name: String,
    /// Position held at the school.
    pub role: String,
    /// Contact email.
    pub email: String,
    /// Plaintext password; hash before persisting.
    pub password: String,
}

/// Professor form: `NOME`, `CARGO`, `EMAIL`, `PASSWORD`.
///
/// # Errors
///
/// Returns the first failing field.
pub fn professor_fields(fields: &Fields) -> Result<ProfessorInput, ValidationError> {
    let name = required_text(fields, "NOME")?;
    let role = required_text(fields, "CARGO")?;
    let email = required_text(fields, "EMAIL")?;
    // Passwords are taken verbatim, surrounding whitespace included.
    let password = match fields.get("PASSWORD") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => return Err(ValidationError::text("PASSWORD")),
    };
    Ok(ProfessorInput {
        name,
        role,
        email,
        password,
    })
}

/// Comment body: `comentario`, `id_aluno`.
///
/// # Errors
///
/// Returns the first failing field.
pub fn comment_fields(fields: &Fields) -> Result<CommentFields, ValidationError> {
    let text = required_text(fields, "comentario")?;
    let student_id = integer(fields, "id_aluno").ok_or(ValidationError::required("id_aluno"))?;
    Ok(CommentFields { student_id, text })
}
