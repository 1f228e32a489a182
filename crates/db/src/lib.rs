//! Persistence layer for Escola.
//!
//! This crate provides:
//! - `SeaORM` entities and repositories for students and professors
//! - The MongoDB-backed comment repository
//! - Database migrations

pub mod documents;
pub mod entities;
pub mod migration;
pub mod repositories;

pub use documents::CommentRepository;
pub use repositories::{ProfessorRepository, StudentRepository};

use escola_shared::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a pooled connection to the relational store.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.connection_url());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(false);
    Database::connect(options).await
}
