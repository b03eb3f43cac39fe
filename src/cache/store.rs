use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::byteview::ByteView;
use super::lru::LruCache;

/// Point-in-time view of a [`Cache`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub bytes: i64,
    pub items: usize,
    pub gets: u64,
    pub hits: u64,
    pub evictions: u64,
}

/// Thread-safe wrapper around [`LruCache`] holding [`ByteView`] values.
///
/// Every operation takes the mutex only for the duration of the index update.
pub struct Cache {
    lru: Mutex<LruCache<ByteView>>,
    gets: AtomicU64,
    hits: AtomicU64,
    evictions: Arc<AtomicU64>,
}

impl Cache {
    pub fn new(cache_bytes: i64) -> Self {
        let evictions = Arc::new(AtomicU64::new(0));
        let counter = evictions.clone();
        let lru = LruCache::with_eviction_callback(cache_bytes, move |key: String, _value: ByteView| {
            counter.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("Evicted key {}", key);
        });

        Self {
            lru: Mutex::new(lru),
            gets: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            evictions,
        }
    }

    pub fn add(&self, key: &str, value: ByteView) {
        self.lru.lock().add(key, value);
    }

    pub fn get(&self, key: &str) -> Option<ByteView> {
        self.gets.fetch_add(1, Ordering::Relaxed);
        let value = self.lru.lock().get(key).cloned();
        if value.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        value
    }

    pub fn len(&self) -> usize {
        self.lru.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lru.lock().is_empty()
    }

    pub fn bytes(&self) -> i64 {
        self.lru.lock().bytes()
    }

    pub fn stats(&self) -> CacheStats {
        let (bytes, items) = {
            let lru = self.lru.lock();
            (lru.bytes(), lru.len())
        };
        CacheStats {
            bytes,
            items,
            gets: self.gets.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}
