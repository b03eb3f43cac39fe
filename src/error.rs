//! Error Taxonomy
//!
//! Every failure path in the cache returns a [`CacheError`]. The type is `Clone`
//! so that one single-flight outcome can be handed to every caller that joined it.

use std::sync::Arc;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// The caller asked for an empty key.
    #[error("key is required")]
    EmptyKey,

    /// No group is registered under this name.
    #[error("no such group: {0}")]
    NoSuchGroup(String),

    /// A group with this name already exists in the registry.
    #[error("group already exists: {0}")]
    GroupExists(String),

    /// `register_peers` was called twice on the same group.
    #[error("peer picker already registered for group {0}")]
    PeersAlreadyRegistered(String),

    /// The peer base address could not be turned into a request URL.
    #[error("invalid peer address {peer}: {reason}")]
    InvalidPeerAddress { peer: String, reason: String },

    /// The request to the peer never produced a response.
    #[error("request to peer {peer} failed: {reason}")]
    PeerTransport { peer: String, reason: String },

    /// The peer answered with a non-success status.
    #[error("peer {peer} returned: {status}")]
    PeerStatus { peer: String, status: String },

    /// The source-load callback failed. The original error is shared as-is.
    #[error("source load failed: {0:#}")]
    Load(Arc<anyhow::Error>),
}

impl CacheError {
    /// True for the not-found class (unknown group).
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NoSuchGroup(_))
    }

    /// True when the failure came from talking to a peer.
    pub fn is_peer_error(&self) -> bool {
        matches!(
            self,
            CacheError::InvalidPeerAddress { .. }
                | CacheError::PeerTransport { .. }
                | CacheError::PeerStatus { .. }
        )
    }

    /// Returns the source-load error when this is a load failure.
    pub fn load_error(&self) -> Option<&anyhow::Error> {
        match self {
            CacheError::Load(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for CacheError {
    fn from(err: anyhow::Error) -> Self {
        CacheError::Load(Arc::new(err))
    }
}
