//! Server-rendered page handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use v0mon_core::handle::Handle;
use v0mon_db::repositories::CreatureRepo;

use crate::error::AppResult;
use crate::render::html;
use crate::state::AppState;

/// Number of recent creatures listed on the landing page.
const RECENT_LIMIT: i64 = 12;

#[derive(Debug, Deserialize)]
pub struct GoQuery {
    pub handle: Option<String>,
}

async fn render_landing(state: &AppState, error: Option<&str>) -> AppResult<String> {
    let recent = CreatureRepo::list_recent(&state.pool, RECENT_LIMIT).await?;
    let total = CreatureRepo::count(&state.pool).await?;
    Ok(html::landing_page(
        &recent,
        total,
        &state.config.public_base_url,
        error,
    ))
}

/// GET /
pub async fn landing(State(state): State<AppState>) -> AppResult<Html<String>> {
    Ok(Html(render_landing(&state, None).await?))
}

/// GET /go?handle=<raw>
///
/// Form target: normalize the handle and redirect to its page, or show the
/// landing page again with the validation message.
pub async fn go(
    State(state): State<AppState>,
    Query(query): Query<GoQuery>,
) -> AppResult<Response> {
    let raw = query.handle.unwrap_or_default();
    match Handle::parse(&raw) {
        Ok(handle) => Ok(Redirect::to(&format!("/{handle}")).into_response()),
        Err(e) => {
            let page = render_landing(&state, Some(&e.to_string())).await?;
            Ok((StatusCode::BAD_REQUEST, Html(page)).into_response())
        }
    }
}

/// GET /{handle}
///
/// Resolve the creature server-side (generating it on first visit) and
/// render its page. Any failure renders the not-found page.
pub async fn creature_page(
    State(state): State<AppState>,
    Path(raw_handle): Path<String>,
) -> Response {
    match state.orchestrator.resolve_with_retry(&raw_handle).await {
        Ok(result) => {
            Html(html::creature_page(&result, &state.config.public_base_url)).into_response()
        }
        Err(e) => {
            tracing::info!(handle = %raw_handle, error = %e, "Rendering not-found page");
            (StatusCode::NOT_FOUND, Html(html::not_found_page(&raw_handle))).into_response()
        }
    }
}
