use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// HTML pages. `/{handle}` is a catch-all, so this router is merged last
/// and static paths take precedence over it.
///
/// ```text
/// GET /                   landing page
/// GET /go?handle=         form target, redirects to /{handle}
/// GET /{handle}           creature page
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::landing))
        .route("/go", get(pages::go))
        .route("/{handle}", get(pages::creature_page))
}
