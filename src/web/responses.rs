//! HTTP response types and error mapping

use axum::{
    Json,
    body::Body,
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::GalleryError;
use crate::models::{CacheStatus, LoadedImage};

pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Body of every failed API call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

pub fn status_for(error: &GalleryError) -> StatusCode {
    match error {
        GalleryError::InvalidPattern { .. } | GalleryError::InvalidRequest { .. } => {
            StatusCode::BAD_REQUEST
        }
        GalleryError::NotFound { .. } | GalleryError::DirectoryNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        GalleryError::UnsupportedFormat { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        GalleryError::Io(_) | GalleryError::Worker { .. } | GalleryError::Configuration { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Convert a GalleryError into a JSON error response
pub fn handle_error(error: GalleryError) -> Response {
    let status = status_for(&error);
    if !error.is_client_error() {
        warn!(status = status.as_u16(), "Request failed: {}", error);
    } else {
        debug!(status = status.as_u16(), "Request rejected: {}", error);
    }

    (status, Json(ErrorResponse::new(error.to_string()))).into_response()
}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        handle_error(self)
    }
}

/// Raw image bytes with their media type and cache provenance
pub fn image_response(image: LoadedImage, cache_status: CacheStatus) -> Response {
    let content_type = HeaderValue::from_str(&image.media_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    let mut response = Body::from(image.bytes).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type);
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("public, max-age=3600"));
    headers.insert(X_CACHE, HeaderValue::from_static(cache_status.as_str()));
    response
}
