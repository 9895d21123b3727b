//! Construction of the configured artwork storage backend.

use std::sync::Arc;

use v0mon_storage::local::LocalStorage;
use v0mon_storage::memory::MemoryStorage;
use v0mon_storage::s3::S3Storage;
use v0mon_storage::{ObjectStorage, StorageError};

use crate::config::{ServerConfig, StorageConfig};

/// Build the storage backend selected by `STORAGE_BACKEND`.
///
/// Local storage hands out locations under [`ServerConfig::media_base_url`],
/// which the router serves from the same directory.
pub async fn build_storage(config: &ServerConfig) -> Result<Arc<dyn ObjectStorage>, StorageError> {
    let storage: Arc<dyn ObjectStorage> = match &config.storage {
        StorageConfig::Local { dir } => {
            let local = LocalStorage::new(dir.clone(), config.media_base_url()).await?;
            tracing::info!(dir = %local.root().display(), "Using local artwork storage");
            Arc::new(local)
        }
        StorageConfig::S3 { bucket, public_url } => {
            tracing::info!(bucket = %bucket, public_url = %public_url, "Using S3 artwork storage");
            Arc::new(S3Storage::from_env(bucket.clone(), public_url.clone()).await)
        }
        StorageConfig::Memory => {
            tracing::warn!("Using in-memory artwork storage; artwork is lost on restart");
            Arc::new(MemoryStorage::new(config.media_base_url()))
        }
    };
    Ok(storage)
}
