//! Service layer
//!
//! The blocking building blocks (scanner, loader, thumbnail generator) are
//! plain synchronous types. [`GalleryService`] runs them on the
//! [`OffloadExecutor`] and puts the caches in front of them.

pub mod gallery;
pub mod image_loader;
pub mod offload;
pub mod results;
pub mod scanner;
pub mod thumbnail;

pub use gallery::{GalleryService, GalleryStats};
pub use image_loader::ImageLoader;
pub use offload::OffloadExecutor;
pub use results::ResultsStore;
pub use scanner::DirectoryScanner;
pub use thumbnail::ThumbnailGenerator;
