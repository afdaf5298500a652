//! Byte-budgeted LRU cache

use chrono::{DateTime, Utc};
use lru::LruCache;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;
use tokio::sync::Mutex;
use tracing::debug;

use crate::utils::human_format::format_memory;

/// Values that know how many bytes they contribute to a cache budget
pub trait Weighted {
    fn weight(&self) -> usize;
}

/// Statistics about a byte-sized cache
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub total_bytes: usize,
    pub budget_bytes: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    /// Insertion time of the least recently used entry
    pub oldest_inserted_at: Option<DateTime<Utc>>,
}

struct Entry<V> {
    value: V,
    size: usize,
    inserted_at: DateTime<Utc>,
}

struct CacheState<K: Hash + Eq, V> {
    entries: LruCache<K, Entry<V>>,
    total_bytes: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// LRU cache bounded by the summed payload size of its entries
///
/// Recency is access order: a hit moves the entry to the most recently used
/// position. Inserting past the budget evicts from the least recently used
/// end until the total fits again, which may evict the entry just inserted
/// if it alone is larger than the budget.
pub struct ByteSizedLruCache<K: Hash + Eq, V> {
    name: &'static str,
    budget_bytes: usize,
    state: Mutex<CacheState<K, V>>,
}

impl<K, V> ByteSizedLruCache<K, V>
where
    K: Hash + Eq + Debug,
    V: Weighted + Clone,
{
    /// Create a new cache; `name` only appears in log lines
    pub fn new(name: &'static str, budget_bytes: usize) -> Self {
        Self {
            name,
            budget_bytes,
            state: Mutex::new(CacheState {
                entries: LruCache::unbounded(),
                total_bytes: 0,
                hits: 0,
                misses: 0,
                evictions: 0,
            }),
        }
    }

    /// Look up a value, promoting it to most recently used on a hit
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        match state.entries.get(key) {
            Some(entry) => {
                state.hits += 1;
                Some(entry.value.clone())
            }
            None => {
                state.misses += 1;
                None
            }
        }
    }

    /// Insert or replace a value, then evict until the budget holds
    pub async fn put(&self, key: K, value: V) {
        let size = value.weight();
        let entry = Entry {
            value,
            size,
            inserted_at: Utc::now(),
        };

        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        if let Some(replaced) = state.entries.put(key, entry) {
            state.total_bytes -= replaced.size;
        }
        state.total_bytes += size;

        while state.total_bytes > self.budget_bytes {
            let Some((evicted_key, evicted)) = state.entries.pop_lru() else {
                break;
            };
            state.total_bytes -= evicted.size;
            state.evictions += 1;
            debug!(
                cache = self.name,
                key = ?evicted_key,
                freed = %format_memory(evicted.size as u64),
                remaining = %format_memory(state.total_bytes as u64),
                "Evicted least recently used entry"
            );
        }
    }

    /// Check for a key without touching recency or counters
    pub async fn contains(&self, key: &K) -> bool {
        self.state.lock().await.entries.contains(key)
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.entries.is_empty()
    }

    pub async fn total_bytes(&self) -> usize {
        self.state.lock().await.total_bytes
    }

    /// Get current cache statistics
    pub async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        CacheStats {
            entries: state.entries.len(),
            total_bytes: state.total_bytes,
            budget_bytes: self.budget_bytes,
            hits: state.hits,
            misses: state.misses,
            evictions: state.evictions,
            oldest_inserted_at: state.entries.peek_lru().map(|(_, e)| e.inserted_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Blob(Vec<u8>);

    impl Weighted for Blob {
        fn weight(&self) -> usize {
            self.0.len()
        }
    }

    fn blob(size: usize) -> Blob {
        Blob(vec![0u8; size])
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let cache = ByteSizedLruCache::new("test", 1024);
        cache.put("a", blob(10)).await;

        assert_eq!(cache.get(&"a").await, Some(blob(10)));
        assert_eq!(cache.get(&"missing").await, None);

        let stats = cache.stats().await;
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.total_bytes, 10);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!(stats.oldest_inserted_at.is_some());
    }

    #[tokio::test]
    async fn test_recently_read_entry_survives_eviction() {
        // Room for exactly two 10-byte entries
        let cache = ByteSizedLruCache::new("test", 20);
        cache.put("A", blob(10)).await;
        cache.put("B", blob(10)).await;
        assert!(cache.get(&"A").await.is_some());

        cache.put("C", blob(10)).await;

        assert!(cache.contains(&"A").await);
        assert!(!cache.contains(&"B").await);
        assert!(cache.contains(&"C").await);
        assert_eq!(cache.stats().await.evictions, 1);
    }

    #[tokio::test]
    async fn test_without_reads_oldest_insert_is_evicted() {
        let cache = ByteSizedLruCache::new("test", 20);
        cache.put("A", blob(10)).await;
        cache.put("B", blob(10)).await;
        cache.put("C", blob(10)).await;

        assert!(!cache.contains(&"A").await);
        assert!(cache.contains(&"B").await);
        assert!(cache.contains(&"C").await);
    }

    #[tokio::test]
    async fn test_replace_adjusts_accounting() {
        let cache = ByteSizedLruCache::new("test", 100);
        cache.put("a", blob(40)).await;
        cache.put("a", blob(15)).await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.total_bytes().await, 15);
    }

    #[tokio::test]
    async fn test_replace_promotes_entry() {
        let cache = ByteSizedLruCache::new("test", 20);
        cache.put("A", blob(10)).await;
        cache.put("B", blob(10)).await;
        cache.put("A", blob(10)).await;
        cache.put("C", blob(10)).await;

        assert!(cache.contains(&"A").await);
        assert!(!cache.contains(&"B").await);
    }

    #[tokio::test]
    async fn test_oversized_entry_is_evicted_immediately() {
        let cache = ByteSizedLruCache::new("test", 16);
        cache.put("small", blob(8)).await;
        cache.put("huge", blob(64)).await;

        // Everything goes, including the entry that caused the overflow
        assert!(cache.is_empty().await);
        assert_eq!(cache.total_bytes().await, 0);
    }

    #[tokio::test]
    async fn test_one_eviction_frees_enough_for_large_entry() {
        let cache = ByteSizedLruCache::new("test", 30);
        cache.put("a", blob(10)).await;
        cache.put("b", blob(10)).await;
        cache.put("c", blob(10)).await;
        cache.put("d", blob(25)).await;

        // a, b and c must all go to fit 25 bytes into 30
        assert_eq!(cache.len().await, 1);
        assert!(cache.contains(&"d").await);
        assert_eq!(cache.stats().await.evictions, 3);
    }

    #[tokio::test]
    async fn test_contains_does_not_promote() {
        let cache = ByteSizedLruCache::new("test", 20);
        cache.put("A", blob(10)).await;
        cache.put("B", blob(10)).await;
        assert!(cache.contains(&"A").await);
        cache.put("C", blob(10)).await;

        assert!(!cache.contains(&"A").await);
    }

    #[tokio::test]
    async fn test_concurrent_puts_respect_budget() {
        let cache = std::sync::Arc::new(ByteSizedLruCache::new("test", 1000));
        let mut handles = Vec::new();
        for task in 0..8u32 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..50u32 {
                    cache.put(task * 1000 + i, blob(((i % 7) as usize + 1) * 20)).await;
                    let _ = cache.get(&(task * 1000 + i / 2)).await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(cache.total_bytes().await <= 1000);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Put(u8, usize),
            Get(u8),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0u8..16, 0usize..300).prop_map(|(k, size)| Op::Put(k, size)),
                (0u8..16).prop_map(Op::Get),
            ]
        }

        proptest! {
            #[test]
            fn test_total_never_exceeds_budget(
                budget in 0usize..1000,
                ops in proptest::collection::vec(op(), 1..64)
            ) {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .unwrap();

                runtime.block_on(async {
                    let cache = ByteSizedLruCache::new("prop", budget);
                    for op in ops {
                        match op {
                            Op::Put(key, size) => {
                                cache.put(key, blob(size)).await;
                                let total = cache.total_bytes().await;
                                prop_assert!(total <= budget, "total {} > budget {}", total, budget);
                            }
                            Op::Get(key) => {
                                let _ = cache.get(&key).await;
                            }
                        }
                    }
                    Ok(())
                })?;
            }
        }
    }
}
