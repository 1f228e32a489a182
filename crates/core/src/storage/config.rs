//! Storage configuration types.

use std::path::PathBuf;

use escola_shared::{StorageKind, StorageSettings};

use super::error::StorageError;
use super::naming::object_url;

/// Credential used to sign Azure Blob requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AzureCredential {
    /// Shared access signature, without the leading `?`.
    SasToken(String),
    /// Shared account key.
    AccountKey(String),
}

/// Storage provider configuration.
#[derive(Debug, Clone)]
pub enum StorageProvider {
    /// Azure Blob Storage
    AzureBlob {
        /// Azure storage account name.
        account: String,
        /// Request signing credential.
        credential: AzureCredential,
        /// Azure container name.
        container: String,
        /// Account endpoint, e.g. `https://{account}.blob.core.windows.net`.
        endpoint: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
        /// Base URL the directory is published under.
        public_base_url: String,
    },
    /// In-process memory store
    Memory {
        /// Base URL handed out for stored objects.
        public_base_url: String,
    },
}

impl StorageProvider {
    /// Create Azure Blob Storage provider using the default account endpoint.
    #[must_use]
    pub fn azure_blob(
        account: impl Into<String>,
        credential: AzureCredential,
        container: impl Into<String>,
    ) -> Self {
        let account = account.into();
        let endpoint = format!("https://{account}.blob.core.windows.net");
        Self::AzureBlob {
            account,
            credential,
            container: container.into(),
            endpoint,
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self::LocalFs {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Create in-memory provider.
    #[must_use]
    pub fn memory(public_base_url: impl Into<String>) -> Self {
        Self::Memory {
            public_base_url: public_base_url.into(),
        }
    }

    /// Get the provider name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AzureBlob { .. } => "azure_blob",
            Self::LocalFs { .. } => "local",
            Self::Memory { .. } => "memory",
        }
    }

    /// Base URL that object names are appended to, without a trailing slash.
    #[must_use]
    pub fn public_base_url(&self) -> String {
        match self {
            Self::AzureBlob {
                container,
                endpoint,
                ..
            } => format!("{}/{container}", endpoint.trim_end_matches('/')),
            Self::LocalFs {
                public_base_url, ..
            }
            | Self::Memory { public_base_url } => {
                public_base_url.trim_end_matches('/').to_string()
            }
        }
    }

    /// URL handed to clients for an object.
    ///
    /// Azure links signed with a SAS token carry it as the query string so a
    /// private container stays readable; the query is ignored when the link
    /// is mapped back to an object name.
    #[must_use]
    pub fn object_link(&self, object_name: &str) -> String {
        let url = object_url(&self.public_base_url(), object_name);
        match self {
            Self::AzureBlob {
                credential: AzureCredential::SasToken(token),
                ..
            } => format!("{url}?{token}"),
            _ => url,
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Maximum file size in bytes.
    pub max_file_size: u64,
    /// Allowed MIME types for upload.
    pub allowed_mime_types: Vec<String>,
}

impl StorageConfig {
    /// Default max file size: 10MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            allowed_mime_types: Self::default_mime_types(),
        }
    }

    /// Build the config from application settings.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Configuration` when the container name is blank or
    /// a value required by the selected provider is missing.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let container = settings.container.trim();
        if container.is_empty() {
            return Err(StorageError::configuration("container name is not defined"));
        }

        let provider = match settings.provider {
            StorageKind::AzureBlob => {
                let account = non_blank(settings.account_name.as_deref())
                    .ok_or_else(|| StorageError::configuration("account name is not defined"))?;
                let credential = if let Some(token) = non_blank(settings.sas_token.as_deref()) {
                    AzureCredential::SasToken(token.trim_start_matches('?').to_string())
                } else if let Some(key) = non_blank(settings.account_key.as_deref()) {
                    AzureCredential::AccountKey(key.to_string())
                } else {
                    return Err(StorageError::configuration(
                        "either a SAS token or an account key is required",
                    ));
                };
                match non_blank(settings.endpoint.as_deref()) {
                    Some(endpoint) => StorageProvider::AzureBlob {
                        account: account.to_string(),
                        credential,
                        container: container.to_string(),
                        endpoint: endpoint.trim_end_matches('/').to_string(),
                    },
                    None => StorageProvider::azure_blob(account, credential, container),
                }
            }
            StorageKind::LocalFs => {
                let root = non_blank(settings.root.as_deref())
                    .ok_or_else(|| StorageError::configuration("root is required for local_fs"))?;
                let base = non_blank(settings.public_base_url.as_deref()).ok_or_else(|| {
                    StorageError::configuration("public_base_url is required for local_fs")
                })?;
                StorageProvider::local_fs(root, base)
            }
            StorageKind::Memory => {
                let base = non_blank(settings.public_base_url.as_deref())
                    .map_or_else(|| format!("memory://{container}"), str::to_string);
                StorageProvider::memory(base)
            }
        };

        Ok(Self::new(provider).with_max_file_size(settings.max_file_size))
    }

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Default allowed MIME types for profile images.
    #[must_use]
    pub fn default_mime_types() -> Vec<String> {
        ["image/png", "image/jpeg", "image/gif", "image/webp"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Check if a MIME type is allowed.
    #[must_use]
    pub fn is_mime_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_mime_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(mime_type))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::object_name_from_url;

    fn settings(provider: StorageKind) -> StorageSettings {
        StorageSettings {
            provider,
            account_name: Some("escolaimages".to_string()),
            sas_token: Some("?sv=2024-01-01&sig=abc".to_string()),
            account_key: None,
            container: "profiles".to_string(),
            endpoint: None,
            root: Some("./storage".to_string()),
            public_base_url: Some("http://localhost:4000/files/".to_string()),
            max_file_size: 2048,
        }
    }

    #[test]
    fn test_azure_from_settings() {
        let config = StorageConfig::from_settings(&settings(StorageKind::AzureBlob))
            .expect("valid settings");

        assert_eq!(config.provider.name(), "azure_blob");
        assert_eq!(config.max_file_size, 2048);
        assert_eq!(
            config.provider.public_base_url(),
            "https://escolaimages.blob.core.windows.net/profiles"
        );
        match config.provider {
            StorageProvider::AzureBlob { credential, .. } => assert_eq!(
                credential,
                AzureCredential::SasToken("sv=2024-01-01&sig=abc".to_string())
            ),
            other => panic!("unexpected provider {other:?}"),
        }
    }

    #[test]
    fn test_azure_sas_link_is_readable_and_parseable() {
        let config = StorageConfig::from_settings(&settings(StorageKind::AzureBlob))
            .expect("valid settings");
        let base = config.provider.public_base_url();

        let link = config.provider.object_link("1_foto 1.png");
        assert_eq!(
            link,
            format!("{base}/1_foto%201.png?sv=2024-01-01&sig=abc")
        );
        assert_eq!(
            object_name_from_url(&base, &link).as_deref(),
            Some("1_foto 1.png")
        );
    }

    #[test]
    fn test_unsigned_links_have_no_query() {
        let mut s = settings(StorageKind::AzureBlob);
        s.sas_token = None;
        s.account_key = Some("a2V5".to_string());
        let config = StorageConfig::from_settings(&s).expect("valid settings");
        assert!(!config.provider.object_link("1_img.png").contains('?'));

        let memory = StorageProvider::memory("memory://profiles");
        assert_eq!(memory.object_link("1_img.png"), "memory://profiles/1_img.png");
    }

    #[test]
    fn test_azure_endpoint_override() {
        let mut s = settings(StorageKind::AzureBlob);
        s.endpoint = Some("http://127.0.0.1:10000/devstoreaccount1/".to_string());

        let config = StorageConfig::from_settings(&s).expect("valid settings");
        assert_eq!(
            config.provider.public_base_url(),
            "http://127.0.0.1:10000/devstoreaccount1/profiles"
        );
    }

    #[test]
    fn test_blank_container_rejected() {
        let mut s = settings(StorageKind::Memory);
        s.container = "  ".to_string();

        let err = StorageConfig::from_settings(&s).unwrap_err();
        assert!(matches!(err, StorageError::Configuration(_)));
    }

    #[test]
    fn test_azure_requires_credential() {
        let mut s = settings(StorageKind::AzureBlob);
        s.sas_token = None;
        assert!(StorageConfig::from_settings(&s).is_err());

        s.account_key = Some("a2V5".to_string());
        assert!(StorageConfig::from_settings(&s).is_ok());
    }

    #[test]
    fn test_local_fs_trims_base_url() {
        let config =
            StorageConfig::from_settings(&settings(StorageKind::LocalFs)).expect("valid settings");
        assert_eq!(config.provider.name(), "local");
        assert_eq!(
            config.provider.public_base_url(),
            "http://localhost:4000/files"
        );
    }

    #[test]
    fn test_memory_default_base_url() {
        let mut s = settings(StorageKind::Memory);
        s.public_base_url = None;

        let config = StorageConfig::from_settings(&s).expect("valid settings");
        assert_eq!(config.provider.public_base_url(), "memory://profiles");
    }

    #[test]
    fn test_mime_type_validation() {
        let config = StorageConfig::new(StorageProvider::memory("memory://test"));
        assert!(config.is_mime_type_allowed("image/png"));
        assert!(config.is_mime_type_allowed("IMAGE/JPEG"));
        assert!(!config.is_mime_type_allowed("application/pdf"));
        assert!(!config.is_mime_type_allowed("text/html"));
    }
}
