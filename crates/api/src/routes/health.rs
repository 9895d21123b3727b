use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Whether a generation API credential is configured.
    pub generator_configured: bool,
}

/// GET /health -- returns service, database and generator health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = v0mon_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        generator_configured: state.orchestrator.has_generator(),
    })
}

/// Mount health check routes at the root level.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
