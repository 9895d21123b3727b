//! Local filesystem backend.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{public_location, validate_key, ObjectStorage, StorageError};

/// Stores objects as files in a single directory.
///
/// Locations are `{public_prefix}/{key}`; the API server is expected to
/// serve `root` under that prefix.
pub struct LocalStorage {
    root: PathBuf,
    public_prefix: String,
}

impl LocalStorage {
    /// Create the backend, creating `root` if it does not exist.
    pub async fn new(
        root: impl Into<PathBuf>,
        public_prefix: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            public_prefix: public_prefix.into(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn exists(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        if tokio::fs::try_exists(&path).await? {
            Ok(Some(public_location(&self.public_prefix, key)))
        } else {
            Ok(None)
        }
    }

    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let path = self.path_for(key)?;

        // Write to a sibling temp file and rename so readers never observe
        // a partially written object.
        let tmp = self.root.join(format!(".{key}.tmp"));
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;

        tracing::debug!(key, content_type, size = bytes.len(), "Stored object on disk");
        Ok(public_location(&self.public_prefix, key))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
