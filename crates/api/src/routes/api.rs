use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{generate, og};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// POST /generate          generate-or-fetch a creature (x-api-key)
/// GET  /og?username=      creature preview card (PNG)
/// GET  /og-home           home preview card (PNG)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate::generate))
        .route("/og", get(og::og_image))
        .route("/og-home", get(og::og_home))
}
