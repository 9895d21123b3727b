//! Handler for the generate-or-fetch JSON endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use v0mon_core::element::ElementType;
use v0mon_core::error::CoreError;
use v0mon_pipeline::GenerationResult;

use crate::error::{AppError, AppResult};
use crate::middleware::api_key::RequireApiKey;
use crate::state::AppState;

/// Request body for `POST /api/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default, alias = "username")]
    pub handle: Option<String>,
}

/// Successful response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub image_location: String,
    pub creature_name: String,
    pub type1: ElementType,
    pub type2: Option<ElementType>,
    pub description: String,
    pub cached: bool,
}

impl From<GenerationResult> for GenerateResponse {
    fn from(result: GenerationResult) -> Self {
        Self {
            success: true,
            type1: result.types.primary(),
            type2: result.types.secondary(),
            image_location: result.image_location,
            creature_name: result.creature_name,
            description: result.description,
            cached: result.cached,
        }
    }
}

/// POST /api/generate
///
/// Return the creature for a handle, generating it on first request.
/// Requires the `x-api-key` shared secret.
pub async fn generate(
    _key: RequireApiKey,
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> AppResult<Json<GenerateResponse>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let raw = input
        .handle
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| CoreError::InvalidHandle("Handle is required".into()))?;

    let result = state.orchestrator.resolve_with_retry(&raw).await?;

    tracing::info!(
        handle = %result.handle,
        creature_name = %result.creature_name,
        cached = result.cached,
        "Served creature",
    );

    Ok(Json(result.into()))
}
