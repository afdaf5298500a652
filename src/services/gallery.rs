//! Gallery service: the cached operations the web layer calls

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache::{ByteSizedLruCache, CacheStats, ScanCache, ScanCacheStats};
use crate::config::Config;
use crate::errors::{GalleryError, GalleryResult};
use crate::models::{CacheStatus, FileListing, LoadedImage, ViewContext};
use crate::services::{DirectoryScanner, ImageLoader, OffloadExecutor, ThumbnailGenerator};
use crate::utils::{file_name_string, format_memory, resolve_path};

/// Snapshot of all three caches
#[derive(Debug, Clone, Serialize)]
pub struct GalleryStats {
    pub full_images: CacheStats,
    pub previews: CacheStats,
    pub scans: ScanCacheStats,
}

/// Owns the caches and the blocking workers behind them
///
/// Construct one per process and share it behind an `Arc`; tests build
/// their own isolated instances.
pub struct GalleryService {
    full_images: ByteSizedLruCache<PathBuf, LoadedImage>,
    previews: ByteSizedLruCache<PathBuf, LoadedImage>,
    scans: ScanCache,
    scanner: DirectoryScanner,
    loader: ImageLoader,
    thumbnails: ThumbnailGenerator,
    offload: OffloadExecutor,
}

impl GalleryService {
    pub fn from_config(config: &Config) -> Self {
        let budget = config.cache.per_cache_budget();
        let offload = OffloadExecutor::new(config.workers.blocking_workers);

        info!(
            per_cache_budget = %format_memory(budget as u64),
            scan_max_entries = config.cache.scan_max_entries,
            scan_ttl_secs = config.cache.scan_ttl_secs,
            workers = offload.workers(),
            "Initializing gallery caches"
        );

        Self {
            full_images: ByteSizedLruCache::new("full", budget),
            previews: ByteSizedLruCache::new("preview", budget),
            scans: ScanCache::new(config.cache.scan_max_entries, config.cache.scan_ttl()),
            scanner: DirectoryScanner::new(),
            loader: ImageLoader::new(),
            thumbnails: ThumbnailGenerator::from_config(&config.preview),
            offload,
        }
    }

    /// Refuse further blocking work; jobs already running finish normally
    pub fn shutdown(&self) {
        info!("Closing gallery worker pool");
        self.offload.close();
    }

    /// One page of the files under `folder` matching `pattern`
    pub async fn list_files(
        &self,
        folder: &Path,
        pattern: &str,
        offset: usize,
        limit: usize,
    ) -> GalleryResult<FileListing> {
        let files = self.scan(folder, pattern).await?;
        let total = files.len();
        let next_offset = offset.saturating_add(limit);

        Ok(FileListing {
            files: files.iter().skip(offset).take(limit).cloned().collect(),
            total,
            has_more: next_offset < total,
            next_offset,
        })
    }

    /// Locate `filename` within the filtered listing of `folder`
    pub async fn view(&self, folder: &Path, pattern: &str, filename: &str) -> GalleryResult<ViewContext> {
        if filename.is_empty() {
            return Err(GalleryError::invalid_request("filename", "must not be empty"));
        }
        if filename.contains(['/', '\\']) {
            return Err(GalleryError::invalid_request(
                "filename",
                "must not contain a path separator",
            ));
        }

        let files = self.scan(folder, pattern).await?;
        let file_list: Vec<String> = files.iter().map(|p| file_name_string(p)).collect();

        let wanted = filename.to_lowercase();
        let index = file_list
            .iter()
            .position(|name| name.to_lowercase() == wanted)
            .ok_or_else(|| GalleryError::not_found(folder.join(filename)))?;

        Ok(ViewContext {
            filename: file_list[index].clone(),
            full_path: files[index].clone(),
            file_list,
            index,
        })
    }

    /// Original bytes of `path`, from memory when possible
    pub async fn get_full_image(&self, path: &Path) -> GalleryResult<(LoadedImage, CacheStatus)> {
        let key = resolve_path(path).await;

        if let Some(image) = self.full_images.get(&key).await {
            debug!(path = %key.display(), bytes = image.len(), "Full image cache hit");
            return Ok((image, CacheStatus::Hit));
        }

        debug!(path = %key.display(), "Full image cache miss, reading from disk");
        let loader = self.loader;
        let source = key.clone();
        let image = self.offload.run(move || loader.load_full(&source)).await??;

        self.full_images.put(key, image.clone()).await;
        Ok((image, CacheStatus::Miss))
    }

    /// Bounded preview of `path`, from memory when possible
    pub async fn get_preview_image(&self, path: &Path) -> GalleryResult<(LoadedImage, CacheStatus)> {
        let key = resolve_path(path).await;

        if let Some(image) = self.previews.get(&key).await {
            debug!(path = %key.display(), bytes = image.len(), "Preview cache hit");
            return Ok((image, CacheStatus::Hit));
        }

        debug!(path = %key.display(), "Preview cache miss, generating");
        let thumbnails = self.thumbnails;
        let source = key.clone();
        let image = self
            .offload
            .run(move || thumbnails.generate_preview(&source))
            .await??;

        self.previews.put(key, image.clone()).await;
        Ok((image, CacheStatus::Miss))
    }

    pub async fn stats(&self) -> GalleryStats {
        GalleryStats {
            full_images: self.full_images.stats().await,
            previews: self.previews.stats().await,
            scans: self.scans.stats().await,
        }
    }

    async fn scan(&self, folder: &Path, pattern: &str) -> GalleryResult<Arc<[PathBuf]>> {
        let folder = resolve_path(folder).await;
        let scanner = self.scanner;
        let offload = &self.offload;

        self.scans
            .lookup_or_compute(&folder, pattern, || {
                let folder = folder.clone();
                let pattern = pattern.to_string();
                async move { offload.run(move || scanner.scan(&folder, &pattern)).await? }
            })
            .await
    }
}
