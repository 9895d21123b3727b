//! Serves stored artwork for backends without their own public endpoint.

use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::IntoResponse;
use v0mon_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Content type guessed from the key's extension.
fn content_type_for(key: &str) -> &'static str {
    match key.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "webp" => "image/webp",
        Some(ext) if ext == "png" => "image/png",
        _ => "application/octet-stream",
    }
}

/// GET /media/{key}
pub async fn serve(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Artwork",
            key: key.clone(),
        })
    };

    let bytes = match state.orchestrator.storage().get(&key).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Err(not_found()),
        Err(v0mon_storage::StorageError::InvalidKey(_)) => return Err(not_found()),
        Err(e) => return Err(AppError::InternalError(e.to_string())),
    };

    Ok((
        [
            (CONTENT_TYPE, content_type_for(&key)),
            (CACHE_CONTROL, "public, max-age=86400"),
        ],
        bytes,
    ))
}
