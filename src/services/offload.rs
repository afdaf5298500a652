//! Bounded pool for blocking work

use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::config::defaults::MIN_BLOCKING_WORKERS;
use crate::errors::{GalleryError, GalleryResult};

/// Runs blocking closures on tokio's blocking threads, at most `workers` at a time
///
/// Once a closure has been handed to a thread it runs to completion, even if
/// the caller stops waiting for it.
#[derive(Clone)]
pub struct OffloadExecutor {
    permits: Arc<Semaphore>,
    workers: usize,
}

impl OffloadExecutor {
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(MIN_BLOCKING_WORKERS);
        Self {
            permits: Arc::new(Semaphore::new(workers)),
            workers,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `task` once a worker slot is free and wait for its result
    pub async fn run<F, T>(&self, task: F) -> GalleryResult<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| GalleryError::worker("offload pool is closed"))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            task()
        })
        .await
        .map_err(|e| GalleryError::worker(format!("blocking task failed: {}", e)))
    }

    /// Stop handing out worker slots; queued and future calls fail
    pub fn close(&self) {
        self.permits.close();
    }
}
