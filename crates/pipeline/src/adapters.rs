//! Production implementations of the [`ports`](crate::ports) traits.

use async_trait::async_trait;
use v0mon_db::models::creature::{CreateCreature, Creature};
use v0mon_db::repositories::CreatureRepo;
use v0mon_db::DbPool;
use v0mon_genai::{ContentPart, GenAiApi, GenAiError};

use crate::ports::{CreatureStore, ImageGenerator, StoreError};

/// [`CreatureStore`] backed by the `creatures` table.
#[derive(Clone)]
pub struct PgCreatureStore {
    pool: DbPool,
}

impl PgCreatureStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreatureStore for PgCreatureStore {
    async fn find_by_handle(&self, handle: &str) -> Result<Option<Creature>, StoreError> {
        CreatureRepo::find_by_handle(&self.pool, handle)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn insert(&self, input: &CreateCreature) -> Result<Creature, StoreError> {
        CreatureRepo::create(&self.pool, input).await.map_err(|e| {
            if v0mon_db::is_unique_violation(&e) {
                StoreError::Duplicate(input.handle.clone())
            } else {
                StoreError::Backend(e.to_string())
            }
        })
    }
}

#[async_trait]
impl ImageGenerator for GenAiApi {
    async fn generate(&self, prompt: &str) -> Result<Option<Vec<ContentPart>>, GenAiError> {
        self.generate_content(prompt).await
    }
}
