//! Credential handling.
//!
//! Professor passwords are never persisted in plaintext; only Argon2id PHC
//! strings reach the relational store.

mod password;

pub use password::{CredentialError, hash_password};
