//! The unified value returned to callers of the pipeline.

use v0mon_core::element::TypePair;
use v0mon_core::error::CoreError;
use v0mon_core::naming::default_description;
use v0mon_db::models::creature::Creature;

/// Outcome of a generate-or-fetch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub handle: String,
    pub image_location: String,
    pub creature_name: String,
    pub types: TypePair,
    pub description: String,
    /// `true` when served from an existing record.
    pub cached: bool,
}

impl GenerationResult {
    /// Build a cache-hit result from a stored record.
    pub fn from_record(record: Creature) -> Result<Self, CoreError> {
        let types = record.types()?;
        let description = default_description(&record.creature_name, &record.handle);
        Ok(Self {
            handle: record.handle,
            image_location: record.image_location,
            creature_name: record.creature_name,
            types,
            description,
            cached: true,
        })
    }
}
