use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

use crate::error::CacheError;

/// Chooses the peer that owns a key.
///
/// Returns `None` when no peer is configured or when the owner is the local
/// node, in which case the caller loads the key itself.
pub trait PeerPicker: Send + Sync {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerFetcher>>;
}

/// Fetches a key of a group from one remote peer.
#[async_trait]
pub trait PeerFetcher: Send + Sync {
    async fn fetch(&self, group: &str, key: &str) -> Result<Bytes, CacheError>;

    /// Address of the peer, for logging.
    fn peer(&self) -> &str;
}
