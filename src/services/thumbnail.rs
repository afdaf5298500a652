//! Bounded JPEG previews

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, ImageResult, Rgb, RgbImage};
use std::path::Path;
use tracing::{debug, warn};

use crate::config::PreviewConfig;
use crate::errors::{GalleryError, GalleryResult};
use crate::models::LoadedImage;
use crate::utils::media_type;

/// Produces previews that fit inside a `max_width x max_height` box
#[derive(Debug, Clone, Copy)]
pub struct ThumbnailGenerator {
    max_width: u32,
    max_height: u32,
    quality: u8,
}

impl ThumbnailGenerator {
    pub fn new(max_width: u32, max_height: u32, quality: u8) -> Self {
        Self {
            max_width,
            max_height,
            quality,
        }
    }

    pub fn from_config(config: &PreviewConfig) -> Self {
        Self::new(config.max_width, config.max_height, config.quality)
    }

    /// Blocking preview generation
    ///
    /// SVG is passed through untouched. Raster images are flattened onto
    /// white, shrunk to fit the box and re-encoded as JPEG. When that fails
    /// for a file with an image extension the original bytes are returned.
    pub fn generate_preview(&self, path: &Path) -> GalleryResult<LoadedImage> {
        if !path.is_file() {
            return Err(GalleryError::not_found(path));
        }

        let source_type = media_type::from_path(path);
        if source_type == media_type::SVG {
            let bytes = std::fs::read(path)?;
            return Ok(LoadedImage::new(media_type::SVG, bytes));
        }

        match self.render(path) {
            Ok(jpeg) => {
                debug!(path = %path.display(), bytes = jpeg.len(), "Generated preview");
                Ok(LoadedImage::new(media_type::JPEG, jpeg))
            }
            Err(e) if media_type::is_image(source_type) => {
                warn!(path = %path.display(), "Preview generation failed, serving original: {}", e);
                let bytes = std::fs::read(path)?;
                Ok(LoadedImage::new(source_type, bytes))
            }
            Err(e) => Err(GalleryError::unsupported_format(path, e.to_string())),
        }
    }

    fn render(&self, path: &Path) -> ImageResult<Vec<u8>> {
        let decoded = ImageReader::open(path)?.with_guessed_format()?.decode()?;

        let mut rgb = flatten_onto_white(&decoded);
        if rgb.width() > self.max_width || rgb.height() > self.max_height {
            rgb = DynamicImage::ImageRgb8(rgb)
                .resize(self.max_width, self.max_height, FilterType::Lanczos3)
                .to_rgb8();
        }

        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, self.quality).encode_image(&rgb)?;
        Ok(out)
    }
}

/// Composite any alpha channel over opaque white, otherwise plain 8-bit RGB
fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let mut rgb = RgbImage::new(rgba.width(), rgba.height());
    for (dst, src) in rgb.pixels_mut().zip(rgba.pixels()) {
        let alpha = src[3] as u32;
        let blend = |channel: u8| ((channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        *dst = Rgb([blend(src[0]), blend(src[1]), blend(src[2])]);
    }
    rgb
}
