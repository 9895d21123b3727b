//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and a create DTO for inserts. Creature rows are never
//! updated, so there is no update DTO.

pub mod creature;
