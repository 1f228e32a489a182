//! Profile image storage.
//!
//! `BlobStore` wraps an OpenDAL operator. Azure Blob Storage serves
//! production, a local directory serves development and the in-process
//! memory service backs tests. Records keep the public URL of an image;
//! `naming` converts between that URL and the object name.
//!
//! ```text
//!   upload(file name, content type, bytes) --> {base}/{millis}_{name}[?sas]
//!   exists(url)  --> stat(object)   (false on any failure)
//!   delete(url)  --> delete(object) (no-op for foreign URLs)
//! ```

mod config;
mod error;
mod naming;
mod service;

pub use config::{AzureCredential, StorageConfig, StorageProvider};
pub use error::StorageError;
pub use naming::{ObjectNamer, object_name_from_url, object_url, sanitize_filename};
pub use service::BlobStore;
