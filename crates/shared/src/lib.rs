//! Shared errors and configuration for Escola.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error taxonomy
//! - Configuration management for the HTTP server, both stores and blob storage

pub mod config;
pub mod error;

pub use config::{
    AppConfig, DatabaseConfig, DocumentStoreConfig, ServerConfig, StorageKind, StorageSettings,
};
pub use error::AppError;
