use std::fmt;
use std::future::Future;
use std::sync::{Arc, OnceLock};

use anyhow::Result;

use super::types::{Getter, GroupReport, GroupStats, getter_fn, incr};
use crate::cache::{ByteView, Cache};
use crate::error::CacheError;
use crate::peers::{PeerFetcher, PeerPicker};
use crate::singleflight::SingleFlight;

/// A named cache namespace with its own capacity and source-load callback.
///
/// `get` walks: local cache -> owning peer -> source load. Concurrent misses
/// on one key share a single load. Only locally loaded values are cached;
/// values fetched from a peer stay with the peer that owns them.
pub struct Group {
    name: String,
    getter: Getter,
    main_cache: Cache,
    peers: OnceLock<Arc<dyn PeerPicker>>,
    loader: SingleFlight<Result<ByteView, CacheError>>,
    stats: GroupStats,
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("peers_registered", &self.peers.get().is_some())
            .finish()
    }
}

impl Group {
    /// Builds a standalone group. Use [`super::GroupRegistry::create`] for a
    /// group peers can reach by name.
    pub fn new<F, Fut>(name: impl Into<String>, cache_bytes: i64, getter: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<u8>>> + Send + 'static,
    {
        Self::with_getter(name, cache_bytes, getter_fn(getter))
    }

    pub fn with_getter(name: impl Into<String>, cache_bytes: i64, getter: Getter) -> Self {
        Self {
            name: name.into(),
            getter,
            main_cache: Cache::new(cache_bytes),
            peers: OnceLock::new(),
            loader: SingleFlight::new(),
            stats: GroupStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the picker used to find the owning peer of a key. Can only be
    /// done once per group.
    pub fn register_peers(&self, peers: Arc<dyn PeerPicker>) -> Result<(), CacheError> {
        self.peers
            .set(peers)
            .map_err(|_| CacheError::PeersAlreadyRegistered(self.name.clone()))
    }

    pub async fn get(&self, key: &str) -> Result<ByteView, CacheError> {
        incr(&self.stats.gets);
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }

        if let Some(value) = self.main_cache.get(key) {
            incr(&self.stats.cache_hits);
            tracing::debug!("[{}] Cache hit for {}", self.name, key);
            return Ok(value);
        }

        self.load(key).await
    }

    async fn load(&self, key: &str) -> Result<ByteView, CacheError> {
        incr(&self.stats.loads);

        self.loader
            .execute(key, || async {
                // A flight that finished just before this one may have filled the cache.
                if let Some(value) = self.main_cache.get(key) {
                    incr(&self.stats.cache_hits);
                    return Ok(value);
                }
                incr(&self.stats.loads_deduped);

                if let Some(picker) = self.peers.get()
                    && let Some(peer) = picker.pick_peer(key)
                {
                    match self.get_from_peer(peer.as_ref(), key).await {
                        Ok(value) => {
                            incr(&self.stats.peer_loads);
                            return Ok(value);
                        }
                        Err(e) => {
                            incr(&self.stats.peer_errors);
                            tracing::warn!(
                                "[{}] Failed to get {} from peer {}, loading locally: {}",
                                self.name,
                                key,
                                peer.peer(),
                                e
                            );
                        }
                    }
                }

                self.get_locally(key).await
            })
            .await
    }

    async fn get_from_peer(
        &self,
        peer: &dyn PeerFetcher,
        key: &str,
    ) -> Result<ByteView, CacheError> {
        let bytes = peer.fetch(&self.name, key).await?;
        Ok(ByteView::from(bytes))
    }

    async fn get_locally(&self, key: &str) -> Result<ByteView, CacheError> {
        let bytes = match (self.getter)(key.to_string()).await {
            Ok(bytes) => bytes,
            Err(e) => {
                incr(&self.stats.local_load_errs);
                return Err(CacheError::from(e));
            }
        };
        incr(&self.stats.local_loads);

        let value = ByteView::from(bytes);
        self.populate_cache(key, value.clone());
        Ok(value)
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }

    pub fn stats(&self) -> &GroupStats {
        &self.stats
    }

    pub(crate) fn record_server_request(&self) {
        incr(&self.stats.server_requests);
    }

    pub fn cache(&self) -> &Cache {
        &self.main_cache
    }

    pub fn report(&self) -> GroupReport {
        GroupReport {
            name: self.name.clone(),
            stats: self.stats.snapshot(),
            cache: self.main_cache.stats(),
        }
    }
}
