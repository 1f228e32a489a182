//! Request extractors that validate bodies before a handler runs.
//!
//! Each extractor collects the body into a field map, then applies the
//! entity's rule chain from `escola_core::validation`. The first failing rule
//! rejects the request with a 400 naming the field.

mod comment;
mod profile;

pub use comment::CommentBody;
pub use profile::{ProfessorForm, ProfileForm, StudentForm};
