//! In-memory caches
//!
//! Two kinds of cache live here:
//! - [`ByteSizedLruCache`]: bounded by the total byte size of its payloads,
//!   used once for full-resolution images and once for previews
//! - [`ScanCache`]: bounded by entry count and entry age, memoizing
//!   directory scans so paging through a large tree does not re-walk it
//!
//! Every instance owns a single lock. Instances never share a lock and no
//! lock is held while files are read or images are encoded.

pub mod byte_lru;
pub mod scan_cache;

pub use byte_lru::{ByteSizedLruCache, CacheStats, Weighted};
pub use scan_cache::{ScanCache, ScanCacheStats, ScanKey};
