use std::sync::Arc;

use v0mon_pipeline::CreatureOrchestrator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: v0mon_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Generate-or-fetch pipeline shared by the API and page handlers.
    pub orchestrator: Arc<CreatureOrchestrator>,
}
