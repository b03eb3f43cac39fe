//! Consistent Hashing Tests
//!
//! Uses a numeric hash (the key parsed as a number) where exact ring positions
//! matter, and the default checksum for distribution properties.

#[cfg(test)]
mod tests {
    use crate::consistenthash::HashRing;
    use rand::Rng;
    use std::collections::HashMap;

    fn numeric_hash(data: &[u8]) -> u32 {
        std::str::from_utf8(data).unwrap().parse().unwrap()
    }

    // ============================================================
    // PLACEMENT TESTS
    // ============================================================

    #[test]
    fn test_ring_lookup_with_numeric_hash() {
        // Virtual nodes: 2, 4, 6, 12, 14, 16, 22, 24, 26
        let mut ring = HashRing::with_hash(3, numeric_hash);
        ring.add(["6", "4", "2"]);

        let cases = [("2", "2"), ("11", "2"), ("23", "4"), ("27", "2")];
        for (key, owner) in cases {
            assert_eq!(ring.get(key), Some(owner), "Asking for {}, should yield {}", key, owner);
        }

        // Adds 8, 18, 28
        ring.add(["8"]);

        let cases = [("2", "2"), ("11", "2"), ("23", "4"), ("27", "8")];
        for (key, owner) in cases {
            assert_eq!(ring.get(key), Some(owner), "Asking for {}, should yield {}", key, owner);
        }
    }

    #[test]
    fn test_ring_wraps_around_to_lowest_position() {
        let mut ring = HashRing::with_hash(1, numeric_hash);
        ring.add(["10", "20", "30"]);

        // 31 is above every position, so the owner of position 10 wins.
        assert_eq!(ring.get("31"), Some("10"));
        assert_eq!(ring.get("4000000000"), Some("10"));
    }

    #[test]
    fn test_ring_exact_position_belongs_to_that_peer() {
        let mut ring = HashRing::with_hash(1, numeric_hash);
        ring.add(["10", "20"]);

        assert_eq!(ring.get("20"), Some("20"));
        assert_eq!(ring.get("19"), Some("20"));
        assert_eq!(ring.get("0"), Some("10"));
    }

    #[test]
    fn test_empty_ring_returns_none() {
        let ring = HashRing::new(50);
        assert!(ring.is_empty());
        assert_eq!(ring.get("Tom"), None);
    }

    #[test]
    fn test_ring_has_replicas_per_peer() {
        let mut ring = HashRing::new(50);
        ring.add(["http://a:8001", "http://b:8002", "http://c:8003"]);

        assert_eq!(ring.replicas(), 50);
        assert_eq!(ring.len(), 150);
    }

    // ============================================================
    // STABILITY TESTS
    // ============================================================

    #[test]
    fn test_ring_lookup_is_deterministic() {
        let peers = ["http://a:8001", "http://b:8002", "http://c:8003"];

        let mut first = HashRing::new(50);
        first.add(peers);
        let mut second = HashRing::new(50);
        second.add(peers);

        for i in 0..1000 {
            let key = format!("key-{}", i);
            assert_eq!(first.get(&key), second.get(&key));
            assert_eq!(first.get(&key), first.get(&key));
        }
    }

    #[test]
    fn test_ring_every_peer_receives_keys() {
        let peers = ["http://a:8001", "http://b:8002", "http://c:8003"];
        let mut ring = HashRing::new(50);
        ring.add(peers);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for i in 0..10_000 {
            let key = format!("book_{}", i);
            *counts.entry(ring.get(&key).unwrap()).or_insert(0) += 1;
        }

        assert_eq!(counts.len(), peers.len(), "Every peer should own part of the key space");
        for (peer, count) in counts {
            assert!(count > 1000, "Peer {} only received {} keys", peer, count);
        }
    }

    #[test]
    fn test_adding_peer_moves_bounded_fraction_of_keys() {
        let mut rng = rand::thread_rng();
        let keys: Vec<String> = (0..5000)
            .map(|_| format!("user:{}", rng.gen_range(0..u64::MAX)))
            .collect();

        let mut before = HashRing::new(50);
        before.add(["http://a:8001", "http://b:8002", "http://c:8003"]);
        let mut after = before.clone();
        after.add(["http://d:8004"]);

        let moved = keys
            .iter()
            .filter(|key| before.get(key) != after.get(key))
            .count();

        // Ideal is 1/4 of the keys; allow generous slack for virtual node placement.
        assert!(moved > 0, "A new peer should take over some keys");
        assert!(
            moved < keys.len() / 2,
            "Too many keys moved: {} of {}",
            moved,
            keys.len()
        );

        // Keys that moved can only have moved to the new peer.
        for key in &keys {
            if before.get(key) != after.get(key) {
                assert_eq!(after.get(key), Some("http://d:8004"));
            }
        }
    }
}
