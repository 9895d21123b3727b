//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod creature_repo;

pub use creature_repo::CreatureRepo;
