//! Consistent Hashing Module
//!
//! Maps keys to peer addresses so that every node in the cluster agrees on
//! which peer owns a key, and so that adding a peer only moves a fraction of
//! the key space.
//!
//! Real peers are spread over the ring as many virtual nodes to keep the load
//! even when the cluster is small.

pub mod ring;

pub use ring::{HashFn, HashRing, default_hash};

#[cfg(test)]
mod tests;
