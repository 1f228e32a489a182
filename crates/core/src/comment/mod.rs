//! Comments left about students.
//!
//! Comments live in the document store and reference a student by identifier
//! only; the reference is not checked against the relational store.

mod error;
mod service;
mod types;

pub use error::CommentError;
pub use service::{CommentRepository, CommentService};
pub use types::{Comment, CommentFields};
