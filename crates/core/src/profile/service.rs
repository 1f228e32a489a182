//! Profile lifecycle service.

use std::future::Future;
use std::sync::Arc;

use tracing::{info, warn};

use super::error::ProfileError;
use super::types::{ImageUpload, ProfileRecord};
use crate::repository::RepositoryError;
use crate::storage::BlobStore;

/// Repository trait for records that carry a profile image.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait ProfileRepository: Send + Sync {
    /// Persisted record type.
    type Record: ProfileRecord + Send + Sync;
    /// Client-editable fields written on create and update.
    type Fields: Send;

    /// All records in store order.
    fn find_all(
        &self,
    ) -> impl Future<Output = Result<Vec<Self::Record>, RepositoryError>> + Send;

    /// Find a record by identifier.
    fn find_by_id(
        &self,
        id: i32,
    ) -> impl Future<Output = Result<Option<Self::Record>, RepositoryError>> + Send;

    /// Insert when `id` is `None`, otherwise overwrite every field of record `id`.
    fn save(
        &self,
        id: Option<i32>,
        fields: Self::Fields,
        image_link: String,
    ) -> impl Future<Output = Result<Self::Record, RepositoryError>> + Send;

    /// Remove a record. Returns false if nothing was removed.
    fn remove(&self, id: i32) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}

impl<T: ProfileRepository> ProfileRepository for Arc<T> {
    type Record = T::Record;
    type Fields = T::Fields;

    fn find_all(
        &self,
    ) -> impl Future<Output = Result<Vec<Self::Record>, RepositoryError>> + Send {
        (**self).find_all()
    }

    fn find_by_id(
        &self,
        id: i32,
    ) -> impl Future<Output = Result<Option<Self::Record>, RepositoryError>> + Send {
        (**self).find_by_id(id)
    }

    fn save(
        &self,
        id: Option<i32>,
        fields: Self::Fields,
        image_link: String,
    ) -> impl Future<Output = Result<Self::Record, RepositoryError>> + Send {
        (**self).save(id, fields, image_link)
    }

    fn remove(&self, id: i32) -> impl Future<Output = Result<bool, RepositoryError>> + Send {
        (**self).remove(id)
    }
}

/// Orchestrates blob storage and persistence for one record type.
pub struct ProfileService<R: ProfileRepository> {
    storage: Arc<BlobStore>,
    repo: R,
}

impl<R: ProfileRepository> ProfileService<R> {
    /// Create a new profile service.
    #[must_use]
    pub fn new(storage: Arc<BlobStore>, repo: R) -> Self {
        Self { storage, repo }
    }

    /// Upload the image, then persist a new record pointing at it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No non-empty image was supplied (nothing is uploaded or stored)
    /// - The image is rejected or the upload fails
    /// - Persistence fails; the uploaded image is discarded first
    pub async fn create(
        &self,
        fields: R::Fields,
        image: Option<ImageUpload>,
    ) -> Result<R::Record, ProfileError> {
        let image = usable(image).ok_or(ProfileError::ImageRequired)?;
        let link = self.upload(image).await?;

        match self.repo.save(None, fields, link.clone()).await {
            Ok(record) => {
                info!(record_id = record.id(), image = %link, "Profile created");
                Ok(record)
            }
            Err(e) => {
                self.discard(&link).await;
                Err(e.into())
            }
        }
    }

    /// All records.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn list(&self) -> Result<Vec<R::Record>, ProfileError> {
        Ok(self.repo.find_all().await?)
    }

    /// One record by identifier.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` if no record has this identifier.
    pub async fn get(&self, id: i32) -> Result<R::Record, ProfileError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ProfileError::NotFound(id))
    }

    /// Overwrite a record's fields and optionally replace its image.
    ///
    /// Without a new image the stored reference is kept, provided it still
    /// resolves to an object. With a new image, the previous object is deleted
    /// only after the record has been saved pointing at the new one.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The record does not exist (nothing is uploaded)
    /// - No image is supplied and the stored one is missing
    /// - Upload, persistence, or deletion of the previous image fails
    pub async fn update(
        &self,
        id: i32,
        fields: R::Fields,
        image: Option<ImageUpload>,
    ) -> Result<R::Record, ProfileError> {
        let existing = self.get(id).await?;
        let previous = existing.image_link().map(str::to_owned);

        let Some(image) = usable(image) else {
            let link = previous.ok_or(ProfileError::ImageRequired)?;
            if !self.storage.exists(&link).await {
                return Err(ProfileError::ImageUnavailable(link));
            }
            return Ok(self.repo.save(Some(id), fields, link).await?);
        };

        let link = self.upload(image).await?;
        let record = match self.repo.save(Some(id), fields, link.clone()).await {
            Ok(record) => record,
            Err(e) => {
                self.discard(&link).await;
                return Err(e.into());
            }
        };

        if let Some(previous) = previous.filter(|p| *p != link) {
            self.storage.delete(&previous).await?;
        }

        info!(record_id = id, image = %link, "Profile image replaced");
        Ok(record)
    }

    /// Delete a record and its image.
    ///
    /// The image goes first; if that fails the record is left in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not exist or either deletion fails.
    pub async fn delete(&self, id: i32) -> Result<(), ProfileError> {
        let existing = self.get(id).await?;

        if let Some(link) = existing.image_link() {
            self.storage.delete(link).await?;
        }

        if !self.repo.remove(id).await? {
            return Err(ProfileError::NotFound(id));
        }

        info!(record_id = id, "Profile deleted");
        Ok(())
    }

    async fn upload(&self, image: ImageUpload) -> Result<String, ProfileError> {
        Ok(self
            .storage
            .upload(&image.file_name, &image.content_type, image.data)
            .await?)
    }

    /// Best-effort removal of an image no record refers to.
    async fn discard(&self, link: &str) {
        if let Err(e) = self.storage.delete(link).await {
            warn!(image = %link, error = %e, "Failed to discard unreferenced image");
        }
    }
}

fn usable(image: Option<ImageUpload>) -> Option<ImageUpload> {
    image.filter(|i| !i.is_empty())
}
