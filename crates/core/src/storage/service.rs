//! Blob store implementation using Apache OpenDAL.

use bytes::Bytes;
use opendal::{ErrorKind, Operator, services};
use tracing::debug;

use super::config::{AzureCredential, StorageConfig, StorageProvider};
use super::error::StorageError;
use super::naming::{ObjectNamer, object_name_from_url};

/// Blob store for profile images.
///
/// Objects are addressed by URL everywhere outside this type; the object name
/// is derived from the URL on every read or delete.
#[derive(Debug)]
pub struct BlobStore {
    operator: Operator,
    config: StorageConfig,
    base_url: String,
    namer: ObjectNamer,
}

impl BlobStore {
    /// Create a new blob store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        let base_url = config.provider.public_base_url();
        Ok(Self {
            operator,
            config,
            base_url,
            namer: ObjectNamer::new(),
        })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::AzureBlob {
                account,
                credential,
                container,
                endpoint,
            } => {
                let builder = services::Azblob::default()
                    .account_name(account)
                    .container(container)
                    .endpoint(endpoint);
                let builder = match credential {
                    AzureCredential::SasToken(token) => builder.sas_token(token),
                    AzureCredential::AccountKey(key) => builder.account_key(key),
                };
                Operator::new(builder)?.finish()
            }
            StorageProvider::LocalFs { root, .. } => {
                let root = root
                    .to_str()
                    .ok_or_else(|| StorageError::configuration("invalid path"))?;
                Operator::new(services::Fs::default().root(root))?.finish()
            }
            StorageProvider::Memory { .. } => Operator::new(services::Memory::default())?.finish(),
        };
        Ok(operator)
    }

    /// Validate an upload against config constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if file size or MIME type is invalid.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(
                size,
                self.config.max_file_size,
            ));
        }

        if !self.config.is_mime_type_allowed(content_type) {
            return Err(StorageError::invalid_mime_type(content_type));
        }

        Ok(())
    }

    /// Store an image and return its public URL.
    ///
    /// An empty or `application/octet-stream` content type is replaced by a
    /// guess from the file name before validation.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the write fails.
    pub async fn upload(
        &self,
        original_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<String, StorageError> {
        let content_type = effective_content_type(original_name, content_type);
        self.validate_upload(&content_type, data.len() as u64)?;

        let name = self.namer.object_name(original_name);
        self.operator
            .write_with(&name, data)
            .content_type(&content_type)
            .await?;

        Ok(self.config.provider.object_link(&name))
    }

    /// Check whether the object behind a URL exists.
    ///
    /// URLs that do not map to an object name report `false`, as do lookup
    /// failures.
    pub async fn exists(&self, url: &str) -> bool {
        let Some(name) = self.object_name(url) else {
            return false;
        };

        match self.operator.stat(&name).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                debug!(object = %name, error = %e, "Existence check failed");
                false
            }
        }
    }

    /// Delete the object behind a URL.
    ///
    /// URLs that do not map to an object name are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the deletion.
    pub async fn delete(&self, url: &str) -> Result<(), StorageError> {
        let Some(name) = self.object_name(url) else {
            debug!(url = %url, "Skipping delete for unrecognised image URL");
            return Ok(());
        };
        self.operator.delete(&name).await.map_err(StorageError::from)
    }

    /// Object name for a URL handed out by this store.
    #[must_use]
    pub fn object_name(&self, url: &str) -> Option<String> {
        object_name_from_url(&self.base_url, url)
    }

    /// Base URL all object URLs start with.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }
}

fn effective_content_type(original_name: &str, declared: &str) -> String {
    let declared = declared.trim();
    if declared.is_empty() || declared.eq_ignore_ascii_case("application/octet-stream") {
        mime_guess::from_path(original_name)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string()
    } else {
        declared.to_ascii_lowercase()
    }
}
