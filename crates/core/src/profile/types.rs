//! Student and professor records.

use bytes::Bytes;

/// Image file received with a create or update request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// File name as sent by the client.
    pub file_name: String,
    /// Declared MIME type; may be empty.
    pub content_type: String,
    /// File contents.
    pub data: Bytes,
}

impl ImageUpload {
    /// True for zero-byte files, which count as no file at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A persisted record that may reference a profile image.
pub trait ProfileRecord {
    /// Store-assigned identifier.
    fn id(&self) -> i32;
    /// URL of the profile image, if one was ever stored.
    fn image_link(&self) -> Option<&str>;
}

/// Student record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Store-assigned identifier.
    pub id: i32,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Age in years.
    pub age: i32,
    /// Profile image URL.
    pub image_link: Option<String>,
}

/// Client-editable student fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Age in years.
    pub age: i32,
}

impl ProfileRecord for Student {
    fn id(&self) -> i32 {
        self.id
    }

    fn image_link(&self) -> Option<&str> {
        self.image_link.as_deref()
    }
}

/// Professor record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Professor {
    /// Store-assigned identifier.
    pub id: i32,
    /// Full name.
    pub name: String,
    /// Position held.
    pub role: String,
    /// Contact email.
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Profile image URL.
    pub image_link: Option<String>,
}

/// Client-editable professor fields, with the password already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessorFields {
    /// Full name.
    pub name: String,
    /// Position held.
    pub role: String,
    /// Contact email.
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
}

impl ProfileRecord for Professor {
    fn id(&self) -> i32 {
        self.id
    }

    fn image_link(&self) -> Option<&str> {
        self.image_link.as_deref()
    }
}
