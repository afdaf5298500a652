use axum::{Json, extract::State};
use serde::Deserialize;
use std::path::PathBuf;

use crate::errors::{GalleryError, GalleryResult};
use crate::models::SaveOutcome;
use crate::web::AppState;
use crate::web::extractors::GalleryJson;

#[derive(Debug, Deserialize)]
pub struct SaveImageRequest {
    pub path: Option<String>,
}

/// GET /results/list
pub async fn list_results(State(state): State<AppState>) -> GalleryResult<Json<Vec<String>>> {
    Ok(Json(state.results.list().await?))
}

/// POST /api/save-image
pub async fn save_image(
    State(state): State<AppState>,
    GalleryJson(request): GalleryJson<SaveImageRequest>,
) -> GalleryResult<Json<SaveOutcome>> {
    let path = request
        .path
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| GalleryError::invalid_request("path", "Missing path"))?;

    let outcome = state.results.save(&PathBuf::from(path)).await?;
    Ok(Json(outcome))
}
