//! Extension based media type inference

use std::path::Path;

pub const OCTET_STREAM: &str = "application/octet-stream";
pub const SVG: &str = "image/svg+xml";
pub const JPEG: &str = "image/jpeg";

/// Guess a media type from the file extension, case-insensitively
pub fn from_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => JPEG,
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "svg" => SVG,
        "txt" => "text/plain",
        "json" => "application/json",
        "pdf" => "application/pdf",
        _ => OCTET_STREAM,
    }
}

pub fn is_image(media_type: &str) -> bool {
    media_type.starts_with("image/")
}

/// Media type used when serving an original: anything that is not an image
/// goes out as an opaque byte stream
pub fn servable_media_type(path: &Path) -> &'static str {
    let media_type = from_path(path);
    if is_image(media_type) {
        media_type
    } else {
        OCTET_STREAM
    }
}
