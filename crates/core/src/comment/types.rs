//! Comment data structures.

/// Stored comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Store-generated opaque identifier.
    pub id: String,
    /// Student the comment is about.
    pub student_id: i32,
    /// Comment text.
    pub text: String,
}

/// Client-editable comment fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentFields {
    /// Student the comment is about.
    pub student_id: i32,
    /// Comment text.
    pub text: String,
}
