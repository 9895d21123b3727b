//! Shared-secret extractor for internal endpoints.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use v0mon_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Proof that the request carried the configured `INTERNAL_API_KEY`.
///
/// Use this as an extractor parameter in any handler that must only be
/// reachable by trusted callers:
///
/// ```ignore
/// async fn my_handler(_key: RequireApiKey) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
///
/// Rejects with a configuration error when no secret is configured, and
/// with 401 when the header is missing or does not match.
#[derive(Debug, Clone, Copy)]
pub struct RequireApiKey;

impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.config.internal_api_key.as_deref().ok_or_else(|| {
            AppError::Core(CoreError::Configuration(
                "Internal API key not configured. Set INTERNAL_API_KEY".into(),
            ))
        })?;

        let provided = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing x-api-key header".into()))
            })?;

        if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
            tracing::warn!("Rejected request with invalid API key");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid API key".into(),
            )));
        }

        Ok(RequireApiKey)
    }
}

/// Compare two byte strings without short-circuiting on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
