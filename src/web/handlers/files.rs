//! Listing and view endpoints

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::{GalleryError, GalleryResult};
use crate::web::AppState;
use crate::web::extractors::{GalleryForm, GalleryQuery};
use crate::web::utils::{decode_json, image_url};

#[derive(Debug, Deserialize)]
pub struct FilterForm {
    pub folder: String,
    #[serde(default)]
    pub regex: String,
    #[serde(default)]
    pub offset: usize,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterPagedResponse {
    pub files: Vec<String>,
    pub folder: String,
    pub regex: String,
    /// Offset of the next page
    pub offset: usize,
    pub has_more: bool,
    pub total: usize,
}

/// POST /api/filter-paged
pub async fn filter_paged(
    State(state): State<AppState>,
    GalleryForm(form): GalleryForm<FilterForm>,
) -> GalleryResult<Json<FilterPagedResponse>> {
    let limit = form.limit.unwrap_or(state.config.gallery.batch_size);
    if limit == 0 {
        return Err(GalleryError::invalid_request("limit", "must be greater than zero"));
    }

    let listing = state
        .gallery
        .list_files(&PathBuf::from(&form.folder), &form.regex, form.offset, limit)
        .await?;

    Ok(Json(FilterPagedResponse {
        files: listing
            .files
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect(),
        folder: form.folder,
        regex: form.regex,
        offset: listing.next_offset,
        has_more: listing.has_more,
        total: listing.total,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub data: String,
}

/// Payload carried base64-encoded in `?data=`
#[derive(Debug, Serialize, Deserialize)]
pub struct ViewRequest {
    pub folder: String,
    #[serde(default)]
    pub regex: String,
    pub filename: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ViewResponse {
    pub filename: String,
    pub full_path: String,
    pub image_url: String,
    pub file_list: Vec<String>,
    pub index: usize,
    pub encoded_data: String,
}

/// GET /api/view?data=...
pub async fn view(
    State(state): State<AppState>,
    GalleryQuery(query): GalleryQuery<ViewQuery>,
) -> GalleryResult<Json<ViewResponse>> {
    let request: ViewRequest = decode_json("data", &query.data)?;

    let context = state
        .gallery
        .view(&PathBuf::from(&request.folder), &request.regex, &request.filename)
        .await?;

    Ok(Json(ViewResponse {
        image_url: image_url(&context.full_path),
        full_path: context.full_path.to_string_lossy().into_owned(),
        filename: context.filename,
        file_list: context.file_list,
        index: context.index,
        encoded_data: query.data,
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GalleryDefaults {
    pub default_folder: String,
    pub default_pattern: String,
    pub batch_size: usize,
}

/// GET /api/config
pub async fn gallery_defaults(State(state): State<AppState>) -> Json<GalleryDefaults> {
    let gallery = &state.config.gallery;
    Json(GalleryDefaults {
        default_folder: gallery.default_folder.clone(),
        default_pattern: gallery.default_pattern.clone(),
        batch_size: gallery.batch_size,
    })
}
