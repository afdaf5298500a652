/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8095;

// Gallery defaults
pub const DEFAULT_FOLDER: &str = ".";
pub const DEFAULT_PATTERN: &str = r".*\.(png|jpg|jpeg)$";
pub const DEFAULT_BATCH_SIZE: usize = 150;
pub const DEFAULT_RESULTS_PATH: &str = "./results";

// Cache defaults
pub const DEFAULT_MEMORY_LIMIT_MB: u64 = 1024;
pub const DEFAULT_SCAN_MAX_ENTRIES: usize = 32;
pub const DEFAULT_SCAN_TTL_SECS: u64 = 300;

// Preview defaults
pub const DEFAULT_PREVIEW_MAX_WIDTH: u32 = 512;
pub const DEFAULT_PREVIEW_MAX_HEIGHT: u32 = 512;
pub const DEFAULT_PREVIEW_QUALITY: u8 = 85;

// Worker pool defaults
pub const MIN_BLOCKING_WORKERS: usize = 2;

// Environment
pub const ENV_PREFIX: &str = "PHOTO_GALLERY_";
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
