//! S3 backend.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use crate::{public_location, validate_key, ObjectStorage, StorageError};

/// Stores objects in a single S3 bucket.
///
/// Locations are `{public_url}/{key}`, where `public_url` is whatever
/// fronts the bucket publicly (bucket website endpoint, CDN, etc.).
pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_url: String,
}

impl S3Storage {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_url: String) -> Self {
        Self {
            client,
            bucket,
            public_url,
        }
    }

    /// Build a client from the standard AWS environment (credentials,
    /// region, optional endpoint override).
    pub async fn from_env(bucket: String, public_url: String) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_s3::Client::new(&config), bucket, public_url)
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn exists(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(Some(public_location(&self.public_url, key))),
            Err(err) => {
                let err = err.into_service_error();
                if err.is_not_found() {
                    Ok(None)
                } else {
                    Err(StorageError::S3(err.to_string()))
                }
            }
        }
    }

    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        validate_key(key)?;
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::S3(e.into_service_error().to_string()))?;

        tracing::debug!(bucket = %self.bucket, key, size, "Stored object in S3");
        Ok(public_location(&self.public_url, key))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                let err = err.into_service_error();
                if err.is_no_such_key() {
                    return Ok(None);
                }
                return Err(StorageError::S3(err.to_string()));
            }
        };

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;
        Ok(Some(bytes.into_bytes().to_vec()))
    }
}
