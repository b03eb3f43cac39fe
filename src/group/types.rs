use anyhow::Result;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::cache::CacheStats;

/// Source-load callback: computes the bytes of a key when neither the local
/// cache nor the owning peer has it.
pub type Getter =
    Arc<dyn Fn(String) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send>> + Send + Sync>;

/// Wraps an async closure into a [`Getter`].
pub fn getter_fn<F, Fut>(load: F) -> Getter
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<u8>>> + Send + 'static,
{
    Arc::new(move |key: String| {
        Box::pin(load(key)) as Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send>>
    })
}

/// Counters of one group. All updates are relaxed; read them through
/// [`GroupStats::snapshot`].
#[derive(Debug, Default)]
pub struct GroupStats {
    /// Every `get`, including cache hits.
    pub(crate) gets: AtomicU64,
    pub(crate) cache_hits: AtomicU64,
    /// Values served by a remote peer.
    pub(crate) peer_loads: AtomicU64,
    pub(crate) peer_errors: AtomicU64,
    /// Cache misses, before deduplication.
    pub(crate) loads: AtomicU64,
    /// Loads that actually ran after deduplication.
    pub(crate) loads_deduped: AtomicU64,
    pub(crate) local_loads: AtomicU64,
    pub(crate) local_load_errs: AtomicU64,
    /// Requests received from other peers.
    pub(crate) server_requests: AtomicU64,
}

pub(crate) fn incr(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl GroupStats {
    pub fn snapshot(&self) -> GroupStatsSnapshot {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        GroupStatsSnapshot {
            gets: load(&self.gets),
            cache_hits: load(&self.cache_hits),
            peer_loads: load(&self.peer_loads),
            peer_errors: load(&self.peer_errors),
            loads: load(&self.loads),
            loads_deduped: load(&self.loads_deduped),
            local_loads: load(&self.local_loads),
            local_load_errs: load(&self.local_load_errs),
            server_requests: load(&self.server_requests),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupStatsSnapshot {
    pub gets: u64,
    pub cache_hits: u64,
    pub peer_loads: u64,
    pub peer_errors: u64,
    pub loads: u64,
    pub loads_deduped: u64,
    pub local_loads: u64,
    pub local_load_errs: u64,
    pub server_requests: u64,
}

/// Everything the stats endpoint reports about one group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub name: String,
    pub stats: GroupStatsSnapshot,
    pub cache: CacheStats,
}
