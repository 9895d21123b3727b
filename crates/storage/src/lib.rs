//! Object storage for generated creature artwork.
//!
//! [`ObjectStorage`] is the seam the generation pipeline writes through.
//! Three backends are provided:
//!
//! - [`local::LocalStorage`] -- a directory on disk served by the API
//!   under a public URL prefix.
//! - [`s3::S3Storage`] -- an S3 bucket with a public URL prefix.
//! - [`memory::MemoryStorage`] -- process memory, for development and tests.
//!
//! Keys are flat file names (`elonmusk.png`). Writing an existing key
//! overwrites it.

use async_trait::async_trait;

pub mod local;
pub mod memory;
pub mod s3;

/// Errors from a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The key is empty or contains path separators.
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("S3 error: {0}")]
    S3(String),
}

/// Minimal object storage contract.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Public location of `key` if it exists.
    async fn exists(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `bytes` under `key`, replacing any previous object, and
    /// return its public location.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str)
        -> Result<String, StorageError>;

    /// Read back the object stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
}

/// Reject keys that could escape a flat namespace.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = key.is_empty()
        || key.contains('/')
        || key.contains('\\')
        || key.starts_with('.')
        || key.contains("..");
    if invalid {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Join a public URL prefix and a key with exactly one slash.
pub fn public_location(prefix: &str, key: &str) -> String {
    format!("{}/{key}", prefix.trim_end_matches('/'))
}
