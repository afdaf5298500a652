use std::path::Path;
use tracing::debug;

use crate::errors::{GalleryError, GalleryResult};
use crate::models::LoadedImage;
use crate::utils::media_type;

/// Reads originals from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageLoader;

impl ImageLoader {
    pub fn new() -> Self {
        Self
    }

    /// Blocking read of the whole file
    pub fn load_full(&self, path: &Path) -> GalleryResult<LoadedImage> {
        if !path.is_file() {
            return Err(GalleryError::not_found(path));
        }

        let bytes = std::fs::read(path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "Loaded original from disk");

        Ok(LoadedImage::new(media_type::servable_media_type(path), bytes))
    }
}
