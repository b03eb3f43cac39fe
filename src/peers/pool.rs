use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::client::HttpFetcher;
use super::protocol::{DEFAULT_BASE_PATH, DEFAULT_REPLICAS, normalize_base_path};
use super::types::{PeerFetcher, PeerPicker};
use crate::consistenthash::{HashFn, HashRing, default_hash};

/// Tunables of an [`HttpPool`].
#[derive(Debug, Clone)]
pub struct HttpPoolOptions {
    /// Path prefix peers serve under. Normalised to `/.../`.
    pub base_path: String,
    /// Virtual nodes per peer.
    pub replicas: usize,
    /// Ring hash.
    pub hash_fn: HashFn,
    /// Per-request timeout for peer fetches. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
}

impl Default for HttpPoolOptions {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            replicas: DEFAULT_REPLICAS,
            hash_fn: default_hash,
            request_timeout: None,
        }
    }
}

struct PeerState {
    ring: HashRing,
    fetchers: HashMap<String, Arc<HttpFetcher>>,
}

/// The node's view of its peers.
///
/// Routes keys to peers over a consistent-hash ring and keeps one
/// [`HttpFetcher`] per peer. The same pool is mounted as the node's peer
/// server (see [`super::handlers::router`]).
pub struct HttpPool {
    /// This node's own address, e.g. `http://10.0.0.1:8001`.
    self_addr: String,
    base_path: String,
    options: HttpPoolOptions,
    http_client: reqwest::Client,
    state: Mutex<PeerState>,
}

impl HttpPool {
    pub fn new(self_addr: impl Into<String>) -> Arc<Self> {
        Self::with_options(self_addr, HttpPoolOptions::default())
    }

    pub fn with_options(self_addr: impl Into<String>, options: HttpPoolOptions) -> Arc<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().unwrap_or_else(|e| {
            tracing::error!(
                "Failed to build peer HTTP client ({}), using defaults without request timeout",
                e
            );
            reqwest::Client::new()
        });

        Arc::new(Self {
            self_addr: self_addr.into().trim_end_matches('/').to_string(),
            base_path: normalize_base_path(&options.base_path),
            state: Mutex::new(PeerState {
                ring: HashRing::with_hash(options.replicas, options.hash_fn),
                fetchers: HashMap::new(),
            }),
            options,
            http_client,
        })
    }

    /// Replaces the peer set. The ring and the fetchers are rebuilt from
    /// scratch; the local node should be part of `peers`.
    pub fn set_peers<I, S>(&self, peers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let peers: Vec<String> = peers
            .into_iter()
            .map(|peer| peer.as_ref().trim_end_matches('/').to_string())
            .collect();

        if !peers.iter().any(|peer| *peer == self.self_addr) {
            tracing::warn!(
                "[Server {}] Not listed in peer set {:?}; keys it owns will be fetched over HTTP from itself",
                self.self_addr,
                peers
            );
        }

        let mut ring = HashRing::with_hash(self.options.replicas, self.options.hash_fn);
        ring.add(&peers);

        let fetchers = peers
            .iter()
            .map(|peer| {
                let fetcher = HttpFetcher::new(
                    format!("{}{}", peer, self.base_path),
                    self.http_client.clone(),
                );
                (peer.clone(), Arc::new(fetcher))
            })
            .collect();

        *self.state.lock() = PeerState { ring, fetchers };

        tracing::info!(
            "[Server {}] Peer set rebuilt with {} peer(s)",
            self.self_addr,
            peers.len()
        );
    }

    pub fn self_addr(&self) -> &str {
        &self.self_addr
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Whether the current peer set contains this node's own address.
    pub fn contains_self(&self) -> bool {
        self.state.lock().fetchers.contains_key(&self.self_addr)
    }

    pub fn peer_count(&self) -> usize {
        self.state.lock().fetchers.len()
    }

    /// Peer that owns `key` on the ring, including the local node.
    pub fn owner_of(&self, key: &str) -> Option<String> {
        self.state.lock().ring.get(key).map(str::to_string)
    }
}

impl PeerPicker for HttpPool {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerFetcher>> {
        let state = self.state.lock();
        let peer = state.ring.get(key)?;
        if peer == self.self_addr {
            return None;
        }

        tracing::debug!("[Server {}] Pick peer {}", self.self_addr, peer);
        let fetcher = state.fetchers.get(peer)?.clone();
        Some(fetcher as Arc<dyn PeerFetcher>)
    }
}
