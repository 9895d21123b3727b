//! Repository for the `creatures` table.

use sqlx::PgPool;

use crate::models::creature::{CreateCreature, Creature};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, handle, image_location, primary_type, secondary_type, \
     creature_name, created_at, updated_at";

/// Read and insert operations for creatures. Rows are never updated or
/// deleted by the application.
pub struct CreatureRepo;

impl CreatureRepo {
    /// Insert a new creature, returning the created row.
    ///
    /// Fails with a unique violation on `uq_creatures_handle` if a row for
    /// the handle already exists.
    pub async fn create(pool: &PgPool, input: &CreateCreature) -> Result<Creature, sqlx::Error> {
        let query = format!(
            "INSERT INTO creatures (handle, image_location, primary_type, secondary_type, creature_name)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Creature>(&query)
            .bind(&input.handle)
            .bind(&input.image_location)
            .bind(&input.primary_type)
            .bind(&input.secondary_type)
            .bind(&input.creature_name)
            .fetch_one(pool)
            .await
    }

    /// Find a creature by its normalized handle.
    pub async fn find_by_handle(
        pool: &PgPool,
        handle: &str,
    ) -> Result<Option<Creature>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM creatures WHERE handle = $1");
        sqlx::query_as::<_, Creature>(&query)
            .bind(handle)
            .fetch_optional(pool)
            .await
    }

    /// Most recently created creatures, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Creature>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM creatures
             ORDER BY created_at DESC, id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Creature>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Total number of creatures.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM creatures")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
