//! Core business logic for Escola.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached only through the repository traits defined here.
//!
//! # Modules
//!
//! - `storage` - Blob store adapter for profile images
//! - `profile` - Image-attachment lifecycle for students and professors
//! - `comment` - Comment rules over the document store
//! - `validation` - Required-field checks for request bodies
//! - `auth` - Credential hashing

pub mod auth;
pub mod comment;
pub mod profile;
pub mod repository;
pub mod storage;
pub mod validation;

pub use repository::RepositoryError;
