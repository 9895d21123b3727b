//! Creature entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use v0mon_core::element::{ElementType, TypePair};
use v0mon_core::error::CoreError;
use v0mon_core::types::{DbId, Timestamp};

/// A creature row from the `creatures` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Creature {
    pub id: DbId,
    /// Normalized handle. Unique.
    pub handle: String,
    /// Public location of the stored artwork. Never changes once written.
    pub image_location: String,
    pub primary_type: String,
    pub secondary_type: Option<String>,
    pub creature_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Creature {
    /// Parse the stored type columns back into a [`TypePair`].
    ///
    /// The table's CHECK constraints make a failure here a data corruption
    /// problem rather than a user error.
    pub fn types(&self) -> Result<TypePair, CoreError> {
        let primary: ElementType = self.primary_type.parse()?;
        let secondary = self
            .secondary_type
            .as_deref()
            .map(str::parse::<ElementType>)
            .transpose()?;
        TypePair::new(primary, secondary)
    }
}

/// DTO for inserting a new creature.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCreature {
    pub handle: String,
    pub image_location: String,
    pub primary_type: String,
    pub secondary_type: Option<String>,
    pub creature_name: String,
}

impl CreateCreature {
    /// Build an insert DTO from already-validated domain values.
    pub fn new(
        handle: &v0mon_core::handle::Handle,
        image_location: String,
        types: &TypePair,
        creature_name: String,
    ) -> Self {
        Self {
            handle: handle.as_str().to_string(),
            image_location,
            primary_type: types.primary().as_str().to_string(),
            secondary_type: types.secondary().map(|t| t.as_str().to_string()),
            creature_name,
        }
    }
}
