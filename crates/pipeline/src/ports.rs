//! Collaborator seams used by the orchestrator.

use async_trait::async_trait;
use v0mon_db::models::creature::{CreateCreature, Creature};
use v0mon_genai::{ContentPart, GenAiError};

pub use v0mon_storage::{ObjectStorage, StorageError};

/// Errors from a [`CreatureStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A record for the handle already exists.
    #[error("Creature for handle '{0}' already exists")]
    Duplicate(String),

    #[error("Store error: {0}")]
    Backend(String),
}

/// Persistent handle -> creature mapping with a uniqueness guarantee.
#[async_trait]
pub trait CreatureStore: Send + Sync {
    async fn find_by_handle(&self, handle: &str) -> Result<Option<Creature>, StoreError>;

    /// Insert a new record. Must fail with [`StoreError::Duplicate`] if
    /// the handle is already taken.
    async fn insert(&self, input: &CreateCreature) -> Result<Creature, StoreError>;
}

/// External image generator.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Run one generation for `prompt`.
    ///
    /// `Ok(None)` means the generator produced no candidate at all.
    async fn generate(&self, prompt: &str) -> Result<Option<Vec<ContentPart>>, GenAiError>;
}
