//! Handlers for the PNG social preview cards.

use axum::extract::{Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::IntoResponse;
use serde::Deserialize;
use v0mon_core::handle::Handle;
use v0mon_pipeline::orchestrator::ARTWORK_EXTENSION;
use v0mon_pipeline::GenerationResult;

use crate::error::{AppError, AppResult};
use crate::render::og::{self, RenderError};
use crate::state::AppState;

/// Handle used when the `username` parameter is missing.
const DEFAULT_USERNAME: &str = "user";

#[derive(Debug, Deserialize)]
pub struct OgQuery {
    pub username: Option<String>,
}

fn png_response(bytes: Vec<u8>) -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "image/png"),
            (CACHE_CONTROL, "public, max-age=86400"),
        ],
        bytes,
    )
}

/// Run a CPU-bound render off the async runtime.
async fn render<F>(f: F) -> AppResult<Vec<u8>>
where
    F: FnOnce() -> Result<Vec<u8>, RenderError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::InternalError(format!("Render task failed: {e}")))?
        .map_err(|e| AppError::InternalError(e.to_string()))
}

/// Fetch the stored artwork for a resolved creature.
async fn load_artwork(state: &AppState, result: &GenerationResult) -> Option<Vec<u8>> {
    let key = Handle::parse(&result.handle)
        .ok()?
        .storage_key(ARTWORK_EXTENSION);
    match state.orchestrator.storage().get(&key).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Failed to read artwork for preview card");
            None
        }
    }
}

/// GET /api/og?username=<handle>
///
/// Resolve the creature (generating it if needed) and compose its preview
/// card. Any failure along the way yields the placeholder card instead.
pub async fn og_image(
    State(state): State<AppState>,
    Query(query): Query<OgQuery>,
) -> AppResult<impl IntoResponse> {
    let username = query
        .username
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USERNAME.to_string());

    let resolved = match state.orchestrator.resolve_with_retry(&username).await {
        Ok(result) => load_artwork(&state, &result)
            .await
            .map(|artwork| (result, artwork)),
        Err(e) => {
            tracing::info!(username = %username, error = %e, "No creature for preview card");
            None
        }
    };

    let caption = username.trim().trim_start_matches('@').to_string();
    let png = match resolved {
        Some((result, artwork)) => {
            let GenerationResult {
                handle,
                creature_name,
                types,
                ..
            } = result;
            let card = render(move || {
                og::render_creature_png(&artwork, &creature_name, &handle, &types)
            })
            .await;
            match card {
                Ok(png) => png,
                Err(e) => {
                    tracing::warn!(username = %username, error = %e, "Falling back to placeholder card");
                    render(move || og::encode_png(&og::placeholder_card(&caption)?)).await?
                }
            }
        }
        None => render(move || og::encode_png(&og::placeholder_card(&caption)?)).await?,
    };

    Ok(png_response(png))
}

/// GET /api/og-home
pub async fn og_home() -> AppResult<impl IntoResponse> {
    let png = render(|| og::encode_png(&og::home_card()?)).await?;
    Ok(png_response(png))
}
