//! Comment service implementation.

use std::future::Future;

use tracing::info;

use super::error::CommentError;
use super::types::{Comment, CommentFields};
use crate::repository::RepositoryError;

/// Repository trait for comment persistence.
///
/// Identifiers are the store's opaque id rendered as a string; implementations
/// reject strings that cannot be one with `RepositoryError::InvalidId`.
pub trait CommentRepository: Send + Sync {
    /// All comments in store order.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Comment>, RepositoryError>> + Send;

    /// Comments about one student.
    fn find_by_student(
        &self,
        student_id: i32,
    ) -> impl Future<Output = Result<Vec<Comment>, RepositoryError>> + Send;

    /// Find a comment by identifier.
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Comment>, RepositoryError>> + Send;

    /// Insert when `id` is `None`, otherwise replace comment `id`.
    fn save(
        &self,
        id: Option<&str>,
        fields: CommentFields,
    ) -> impl Future<Output = Result<Comment, RepositoryError>> + Send;

    /// Remove a comment. Returns false if nothing was removed.
    fn remove(&self, id: &str) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}

/// Comment rules on top of a repository.
pub struct CommentService<R: CommentRepository> {
    repo: R,
}

impl<R: CommentRepository> CommentService<R> {
    /// Create a new comment service.
    #[must_use]
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Store a new comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn create(&self, fields: CommentFields) -> Result<Comment, CommentError> {
        let comment = self.repo.save(None, fields).await?;
        info!(comment_id = %comment.id, student_id = comment.student_id, "Comment created");
        Ok(comment)
    }

    /// Every stored comment.
    ///
    /// # Errors
    ///
    /// Returns `CommentError::NoneStored` when there are no comments.
    pub async fn list(&self) -> Result<Vec<Comment>, CommentError> {
        let comments = self.repo.find_all().await?;
        if comments.is_empty() {
            return Err(CommentError::NoneStored);
        }
        Ok(comments)
    }

    /// Comments about one student.
    ///
    /// # Errors
    ///
    /// Returns `CommentError::NoneForStudent` when the student has no comments.
    pub async fn list_for_student(&self, student_id: i32) -> Result<Vec<Comment>, CommentError> {
        let comments = self.repo.find_by_student(student_id).await?;
        if comments.is_empty() {
            return Err(CommentError::NoneForStudent(student_id));
        }
        Ok(comments)
    }

    /// Overwrite both fields of an existing comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the comment does not exist or the repository fails.
    pub async fn update(&self, id: &str, fields: CommentFields) -> Result<Comment, CommentError> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(CommentError::NotFound(id.to_string()));
        }
        let comment = self.repo.save(Some(id), fields).await?;
        info!(comment_id = %id, "Comment updated");
        Ok(comment)
    }

    /// Delete a comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the comment does not exist or the repository fails.
    pub async fn delete(&self, id: &str) -> Result<(), CommentError> {
        if self.repo.find_by_id(id).await?.is_none() || !self.repo.remove(id).await? {
            return Err(CommentError::NotFound(id.to_string()));
        }
        info!(comment_id = %id, "Comment deleted");
        Ok(())
    }
}
