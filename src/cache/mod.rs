//! Local Cache Module
//!
//! The in-process storage tier of a node.
//!
//! ## Components
//! - **`byteview`**: `ByteView`, the immutable byte payload every cached value is wrapped in.
//! - **`lru`**: `LruCache`, a byte-bounded least-recently-used store. Not synchronised.
//! - **`store`**: `Cache`, the mutex-guarded `LruCache<ByteView>` used by groups, plus hit/eviction counters.

pub mod byteview;
pub mod lru;
pub mod store;

pub use byteview::ByteView;
pub use lru::{LruCache, Value};
pub use store::{Cache, CacheStats};
