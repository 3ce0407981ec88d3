use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lru::LruCache;

/// Hit and miss counters of a `ChartCache`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Bounded, thread-safe memo of aggregation results.
///
/// Values are computed outside the lock, so two callers racing on the same
/// missing key may both compute it; the last insert wins and both results
/// are equal since the computations are pure.
pub struct ChartCache<K, V> {
    name: &'static str,
    entries: Mutex<LruCache<K, Arc<V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K: Hash + Eq + Clone, V> ChartCache<K, V> {
    #[must_use]
    pub fn new(name: &'static str, capacity: NonZeroUsize) -> Self {
        Self {
            name,
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_compute(&self, key: &K, compute: impl FnOnce() -> V) -> Arc<V> {
        if let Some(hit) = self.lock().get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(cache = self.name, "cache hit");
            return Arc::clone(hit);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(cache = self.name, "cache miss");
        let value = Arc::new(compute());
        if let Some((_, _evicted)) = self.lock().push(key.clone(), Arc::clone(&value)) {
            tracing::trace!(cache = self.name, "entry evicted or replaced");
        }
        value
    }

    /// Whether `key` is cached, without touching its recency.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.lock().contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> NonZeroUsize {
        self.lock().cap()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    // A panic inside `compute` never happens under the lock, so a poisoned
    // map is still consistent.
    fn lock(&self) -> MutexGuard<'_, LruCache<K, Arc<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V> std::fmt::Debug for ChartCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartCache")
            .field("name", &self.name)
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
