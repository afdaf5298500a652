//! Image byte endpoints

use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::errors::GalleryResult;
use crate::web::AppState;
use crate::web::responses::image_response;
use crate::web::utils::decode_path;

/// GET /image/{encoded}
pub async fn full_image(
    State(state): State<AppState>,
    Path(encoded): Path<String>,
) -> GalleryResult<Response> {
    let path = decode_path(&encoded)?;
    let (image, cache_status) = state.gallery.get_full_image(&path).await?;
    Ok(image_response(image, cache_status))
}

/// GET /preview/{encoded}
pub async fn preview_image(
    State(state): State<AppState>,
    Path(encoded): Path<String>,
) -> GalleryResult<Response> {
    let path = decode_path(&encoded)?;
    let (image, cache_status) = state.gallery.get_preview_image(&path).await?;
    Ok(image_response(image, cache_status))
}
