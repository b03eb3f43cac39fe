//! Peer Module
//!
//! Lets nodes serve their groups to each other and fetch keys owned by
//! another node.
//!
//! ## Core Concepts
//! - **Picking**: `PeerPicker` decides which peer owns a key. `HttpPool` does
//!   it over a consistent-hash ring and never picks the local node.
//! - **Fetching**: `PeerFetcher` pulls a key from one peer. `HttpFetcher` is the
//!   HTTP implementation.
//! - **Serving**: `handlers::router` exposes the registry's groups under the
//!   pool's base path.
//!
//! The traits are the seam tests use to swap the network for in-process fakes.

pub mod client;
pub mod handlers;
pub mod pool;
pub mod protocol;
pub mod types;

pub use client::HttpFetcher;
pub use handlers::router;
pub use pool::{HttpPool, HttpPoolOptions};
pub use types::{PeerFetcher, PeerPicker};
