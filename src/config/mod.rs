use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod defaults;

use crate::errors::{GalleryError, GalleryResult};
use defaults::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub workers: WorkerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Listing and results-folder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Folder suggested to clients before they pick one
    #[serde(default = "default_folder")]
    pub default_folder: String,
    /// Pattern suggested to clients before they pick one
    #[serde(default = "default_pattern")]
    pub default_pattern: String,
    /// Number of files returned per listing page when the client sends no limit
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Directory that saved originals are copied into
    #[serde(default = "default_results_path")]
    pub results_path: PathBuf,
}

/// In-memory cache bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Overall memory ceiling shared by the full-image and preview caches
    #[serde(default = "default_memory_limit_mb")]
    pub memory_limit_mb: u64,
    /// Maximum number of directory scans kept
    #[serde(default = "default_scan_max_entries")]
    pub scan_max_entries: usize,
    /// Age after which a cached directory scan is discarded
    #[serde(default = "default_scan_ttl_secs")]
    pub scan_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_preview_max_width")]
    pub max_width: u32,
    #[serde(default = "default_preview_max_height")]
    pub max_height: u32,
    /// JPEG quality on a 1-100 scale
    #[serde(default = "default_preview_quality")]
    pub quality: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Upper bound on concurrently running scan/decode jobs
    #[serde(default = "default_blocking_workers")]
    pub blocking_workers: usize,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_folder() -> String {
    DEFAULT_FOLDER.to_string()
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_results_path() -> PathBuf {
    PathBuf::from(DEFAULT_RESULTS_PATH)
}

fn default_memory_limit_mb() -> u64 {
    DEFAULT_MEMORY_LIMIT_MB
}

fn default_scan_max_entries() -> usize {
    DEFAULT_SCAN_MAX_ENTRIES
}

fn default_scan_ttl_secs() -> u64 {
    DEFAULT_SCAN_TTL_SECS
}

fn default_preview_max_width() -> u32 {
    DEFAULT_PREVIEW_MAX_WIDTH
}

fn default_preview_max_height() -> u32 {
    DEFAULT_PREVIEW_MAX_HEIGHT
}

fn default_preview_quality() -> u8 {
    DEFAULT_PREVIEW_QUALITY
}

fn default_blocking_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(MIN_BLOCKING_WORKERS)
        .max(MIN_BLOCKING_WORKERS)
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            default_folder: default_folder(),
            default_pattern: default_pattern(),
            batch_size: default_batch_size(),
            results_path: default_results_path(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memory_limit_mb: default_memory_limit_mb(),
            scan_max_entries: default_scan_max_entries(),
            scan_ttl_secs: default_scan_ttl_secs(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_width: default_preview_max_width(),
            max_height: default_preview_max_height(),
            quality: default_preview_quality(),
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            blocking_workers: default_blocking_workers(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig::default(),
            gallery: GalleryConfig::default(),
            cache: CacheConfig::default(),
            preview: PreviewConfig::default(),
            workers: WorkerConfig::default(),
        }
    }
}

impl CacheConfig {
    pub fn memory_limit_bytes(&self) -> u64 {
        self.memory_limit_mb.saturating_mul(1024 * 1024)
    }

    /// Byte budget for each of the two image caches
    pub fn per_cache_budget(&self) -> usize {
        usize::try_from(self.memory_limit_bytes() / 2).unwrap_or(usize::MAX)
    }

    pub fn scan_ttl(&self) -> Duration {
        Duration::from_secs(self.scan_ttl_secs)
    }
}

impl Config {
    /// Load configuration from `CONFIG_FILE` (or `config.toml`) and the environment
    pub fn load() -> GalleryResult<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from_file(&config_file)
    }

    /// Layer defaults, an optional TOML file and `PHOTO_GALLERY_*` variables
    pub fn load_from_file<P: AsRef<Path>>(config_file: P) -> GalleryResult<Self> {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(config_file.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> GalleryResult<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| GalleryError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GalleryResult<()> {
        if self.gallery.batch_size == 0 {
            return Err(GalleryError::configuration("gallery.batch_size must be > 0"));
        }
        if self.cache.memory_limit_mb == 0 {
            return Err(GalleryError::configuration(
                "cache.memory_limit_mb must be > 0",
            ));
        }
        if self.cache.scan_max_entries == 0 {
            return Err(GalleryError::configuration(
                "cache.scan_max_entries must be > 0",
            ));
        }
        if self.preview.max_width == 0 || self.preview.max_height == 0 {
            return Err(GalleryError::configuration(
                "preview.max_width and preview.max_height must be > 0",
            ));
        }
        if !(1..=100).contains(&self.preview.quality) {
            return Err(GalleryError::configuration(format!(
                "preview.quality must be within 1..=100, got {}",
                self.preview.quality
            )));
        }
        if self.workers.blocking_workers < MIN_BLOCKING_WORKERS {
            return Err(GalleryError::configuration(format!(
                "workers.blocking_workers must be at least {}, got {}",
                MIN_BLOCKING_WORKERS, self.workers.blocking_workers
            )));
        }
        Ok(())
    }
}
