//! In-process backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{public_location, validate_key, ObjectStorage, StorageError};

/// A stored object and its content type.
#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// Keeps objects in a map. Nothing survives a restart.
pub struct MemoryStorage {
    public_prefix: String,
    objects: RwLock<HashMap<String, StoredObject>>,
    puts: AtomicUsize,
}

impl MemoryStorage {
    pub fn new(public_prefix: impl Into<String>) -> Self {
        Self {
            public_prefix: public_prefix.into(),
            objects: RwLock::new(HashMap::new()),
            puts: AtomicUsize::new(0),
        }
    }

    /// Number of successful `put` calls since construction.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Content type recorded for `key`.
    pub async fn content_type(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|o| o.content_type.clone())
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn exists(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let objects = self.objects.read().await;
        Ok(objects
            .contains_key(key)
            .then(|| public_location(&self.public_prefix, key)))
    }

    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        validate_key(key)?;
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(public_location(&self.public_prefix, key))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;
        Ok(self.objects.read().await.get(key).map(|o| o.bytes.clone()))
    }
}
