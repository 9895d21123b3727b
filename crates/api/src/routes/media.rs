use axum::routing::get;
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Stored artwork, served from the configured storage backend.
pub fn router() -> Router<AppState> {
    Router::new().route("/{key}", get(media::serve))
}
