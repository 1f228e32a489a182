//! Image-attachment lifecycle for student and professor records.
//!
//! Every record owns at most one profile image in the blob store:
//! - create uploads the image, then persists the record
//! - update keeps the stored image or replaces it, deleting the old object
//!   only after the record points at the new one
//! - delete removes the image, then the record

mod error;
mod service;
mod types;

pub use error::ProfileError;
pub use service::{ProfileRepository, ProfileService};
pub use types::{
    ImageUpload, Professor, ProfessorFields, ProfileRecord, Student, StudentFields,
};
