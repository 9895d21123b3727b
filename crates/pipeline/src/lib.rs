//! Generate-or-fetch pipeline for creature artwork.
//!
//! [`orchestrator::CreatureOrchestrator`] owns the cache-check, generation,
//! name resolution and persistence flow. Its collaborators sit behind the
//! traits in [`ports`] so the flow can run against Postgres, S3 and the
//! Gemini API in production and against in-memory fakes in tests.

pub mod adapters;
pub mod config;
pub mod orchestrator;
pub mod ports;
pub mod result;

pub use config::PipelineConfig;
pub use orchestrator::CreatureOrchestrator;
pub use result::GenerationResult;
