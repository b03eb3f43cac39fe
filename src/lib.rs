//! Distributed Look-aside Cache Library
//!
//! Each process holds a bounded local cache and cooperates with its peers over
//! HTTP so that a key is computed once, by the node that owns it, instead of
//! by every worker that asks for it.
//!
//! ## Architecture Modules
//! - **`cache`**: `ByteView` values and the byte-bounded LRU cache that stores them.
//! - **`consistenthash`**: The hash ring that maps keys to their owning peer.
//! - **`singleflight`**: Collapses concurrent loads of one key into a single execution.
//! - **`peers`**: Peer picking and fetching traits, the HTTP pool, client and server.
//! - **`group`**: `Group`, the get-or-load state machine, and the `GroupRegistry`.
//! - **`error`**: `CacheError`, the error type shared by all of the above.
//! - **`config`**: Command-line configuration of the node binary.

pub mod cache;
pub mod config;
pub mod consistenthash;
pub mod error;
pub mod group;
pub mod peers;
pub mod singleflight;

pub use cache::ByteView;
pub use error::CacheError;
pub use group::{Group, GroupRegistry};
pub use peers::{HttpPool, PeerFetcher, PeerPicker};
