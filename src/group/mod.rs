//! Cache Group Module
//!
//! The entry point of the cache. A `Group` ties the other pieces together:
//!
//! 1. **Local cache**: a hit returns immediately.
//! 2. **Single-flight**: concurrent misses on one key share one load.
//! 3. **Peer routing**: if another peer owns the key, it is fetched from there.
//! 4. **Source load**: otherwise (or if the peer fails) the group's `Getter`
//!    computes the value, which is then cached locally.
//!
//! ## Submodules
//! - **`group`**: The `Group` state machine.
//! - **`registry`**: `GroupRegistry`, the name -> group map peers resolve requests against.
//! - **`types`**: The `Getter` callback type and group statistics.

pub mod group;
pub mod registry;
pub mod types;

pub use group::Group;
pub use registry::GroupRegistry;
pub use types::{Getter, GroupReport, GroupStats, GroupStatsSnapshot, getter_fn};
