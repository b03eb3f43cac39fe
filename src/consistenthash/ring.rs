use std::collections::HashMap;

/// Hash function used to place peers and keys on the ring.
pub type HashFn = fn(&[u8]) -> u32;

/// Default ring hash (CRC-32C checksum).
pub fn default_hash(data: &[u8]) -> u32 {
    crc32c::crc32c(data)
}

/// Consistent-hash ring with virtual nodes.
///
/// Each real peer is placed `replicas` times, at `hash("{i}{peer}")` for
/// `i in 0..replicas`. A key belongs to the first virtual node clockwise from
/// `hash(key)`, wrapping around past the highest position.
///
/// The ring only grows; replacing the peer set means building a new ring.
#[derive(Clone)]
pub struct HashRing {
    hash: HashFn,
    replicas: usize,
    /// Sorted virtual node positions.
    keys: Vec<u32>,
    /// Virtual node position -> real peer.
    owners: HashMap<u32, String>,
}

impl HashRing {
    pub fn new(replicas: usize) -> Self {
        Self::with_hash(replicas, default_hash)
    }

    pub fn with_hash(replicas: usize, hash: HashFn) -> Self {
        Self {
            hash,
            replicas,
            keys: Vec::new(),
            owners: HashMap::new(),
        }
    }

    /// Places every peer on the ring.
    pub fn add<I, S>(&mut self, peers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for peer in peers {
            let peer = peer.as_ref();
            for i in 0..self.replicas {
                let position = (self.hash)(format!("{}{}", i, peer).as_bytes());
                self.keys.push(position);
                // Colliding positions keep the last writer.
                self.owners.insert(position, peer.to_string());
            }
        }
        self.keys.sort_unstable();
    }

    /// Returns the peer owning `key`, or `None` for an empty ring.
    pub fn get(&self, key: &str) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }

        let hash = (self.hash)(key.as_bytes());
        let idx = self.keys.partition_point(|&position| position < hash);
        let position = self.keys[idx % self.keys.len()];

        self.owners.get(&position).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of virtual nodes on the ring.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }
}

impl std::fmt::Debug for HashRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashRing")
            .field("replicas", &self.replicas)
            .field("virtual_nodes", &self.keys.len())
            .finish()
    }
}
