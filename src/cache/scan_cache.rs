//! Memoized directory scans with a TTL and an entry ceiling

use lru::LruCache;
use serde::Serialize;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::errors::GalleryResult;

/// Normalized folder paired with the exact pattern source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanKey {
    pub folder: PathBuf,
    pub pattern: String,
}

impl ScanKey {
    pub fn new(folder: &Path, pattern: &str) -> Self {
        Self {
            folder: folder.to_path_buf(),
            pattern: pattern.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanCacheStats {
    pub entries: usize,
    pub max_entries: usize,
    pub ttl_secs: u64,
    pub hits: u64,
    pub misses: u64,
}

struct ScanEntry {
    files: Arc<[PathBuf]>,
    inserted_at: Instant,
}

struct ScanState {
    entries: LruCache<ScanKey, ScanEntry>,
    hits: u64,
    misses: u64,
}

impl ScanState {
    fn purge_expired(&mut self, ttl: Duration) {
        let now = Instant::now();
        let expired: Vec<ScanKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| now.duration_since(entry.inserted_at) > ttl)
            .map(|(key, _)| key.clone())
            .collect();

        for key in expired {
            self.entries.pop(&key);
            debug!(folder = %key.folder.display(), pattern = %key.pattern, "Scan cache entry expired");
        }
    }
}

/// Cache of directory scan results keyed by `(folder, pattern)`
///
/// Expired entries are dropped lazily at the start of every lookup. The entry
/// ceiling is enforced on insert by evicting the least recently used scan.
pub struct ScanCache {
    max_entries: usize,
    ttl: Duration,
    state: Mutex<ScanState>,
}

impl ScanCache {
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            max_entries,
            ttl,
            state: Mutex::new(ScanState {
                entries: LruCache::unbounded(),
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// Return the cached scan for `(folder, pattern)` or run `compute` to produce it
    ///
    /// `compute` runs without the lock held, so two concurrent misses for the
    /// same key both scan and the later insert wins. An error from `compute`
    /// leaves the cache untouched.
    pub async fn lookup_or_compute<F, Fut>(
        &self,
        folder: &Path,
        pattern: &str,
        compute: F,
    ) -> GalleryResult<Arc<[PathBuf]>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = GalleryResult<Vec<PathBuf>>>,
    {
        let key = ScanKey::new(folder, pattern);

        {
            let mut state = self.state.lock().await;
            state.purge_expired(self.ttl);

            if let Some(files) = state.entries.get(&key).map(|entry| entry.files.clone()) {
                state.hits += 1;
                debug!(folder = %folder.display(), pattern, files = files.len(), "Scan cache hit");
                return Ok(files);
            }
            state.misses += 1;
        }

        debug!(folder = %folder.display(), pattern, "Scan cache miss");
        let files: Arc<[PathBuf]> = compute().await?.into();

        let mut state = self.state.lock().await;
        state.entries.put(
            key,
            ScanEntry {
                files: files.clone(),
                inserted_at: Instant::now(),
            },
        );
        while state.entries.len() > self.max_entries {
            if let Some((evicted, _)) = state.entries.pop_lru() {
                debug!(folder = %evicted.folder.display(), pattern = %evicted.pattern, "Evicted scan cache entry");
            }
        }

        Ok(files)
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.entries.is_empty()
    }

    pub async fn stats(&self) -> ScanCacheStats {
        let state = self.state.lock().await;
        ScanCacheStats {
            entries: state.entries.len(),
            max_entries: self.max_entries,
            ttl_secs: self.ttl.as_secs(),
            hits: state.hits,
            misses: state.misses,
        }
    }
}
