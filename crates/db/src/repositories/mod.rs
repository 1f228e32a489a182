//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod professor;
pub mod student;

pub use professor::ProfessorRepository;
pub use student::StudentRepository;

use escola_core::RepositoryError;
use sea_orm::DbErr;

/// Map a `SeaORM` failure onto the repository error.
pub(crate) fn db_error(err: DbErr) -> RepositoryError {
    RepositoryError::database(err.to_string())
}
