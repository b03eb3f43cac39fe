//! Byte-bounded LRU Cache
//!
//! Entries live in a slot vector and are linked by index into a recency list
//! (`head` is the most recently used entry, `tail` the least). The `index` map
//! points each key at its slot, so lookups, promotions and evictions are O(1).
//!
//! ```text
//!   index: "Tom" -> 2, "Sam" -> 0, "Jack" -> 1
//!
//!   head ─► [2 Tom] ◄──► [0 Sam] ◄──► [1 Jack] ◄── tail (evicted first)
//! ```
//!
//! This type is not synchronised; [`super::store::Cache`] wraps it in a mutex.

use std::collections::HashMap;

/// Anything stored in the cache must report how many bytes it occupies.
pub trait Value {
    fn len(&self) -> usize;
}

impl Value for String {
    fn len(&self) -> usize {
        String::len(self)
    }
}

impl Value for Vec<u8> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// Called with every entry removed because the cache went over capacity.
pub type EvictionCallback<V> = Box<dyn FnMut(String, V) + Send>;

struct Entry<V> {
    key: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

pub struct LruCache<V: Value> {
    /// Byte budget. Zero disables eviction.
    max_bytes: i64,
    /// Sum of `key.len() + value.len()` over resident entries.
    nbytes: i64,
    index: HashMap<String, usize>,
    slots: Vec<Option<Entry<V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    on_evicted: Option<EvictionCallback<V>>,
}

fn entry_size(key: &str, value_len: usize) -> i64 {
    key.len() as i64 + value_len as i64
}

impl<V: Value> LruCache<V> {
    pub fn new(max_bytes: i64) -> Self {
        Self {
            max_bytes,
            nbytes: 0,
            index: HashMap::new(),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            on_evicted: None,
        }
    }

    /// Creates a cache that reports every eviction to `on_evicted`.
    ///
    /// The callback runs while the cache is borrowed mutably, so it cannot
    /// reach back into the same cache.
    pub fn with_eviction_callback<F>(max_bytes: i64, on_evicted: F) -> Self
    where
        F: FnMut(String, V) + Send + 'static,
    {
        let mut cache = Self::new(max_bytes);
        cache.on_evicted = Some(Box::new(on_evicted));
        cache
    }

    /// Looks up `key` and marks it as most recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.move_to_front(slot);
        self.slots[slot].as_ref().map(|entry| &entry.value)
    }

    /// Inserts or replaces `key`, then evicts from the tail until the cache
    /// fits its budget again.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();

        if let Some(&slot) = self.index.get(&key) {
            self.move_to_front(slot);
            if let Some(entry) = self.slots[slot].as_mut() {
                self.nbytes += value.len() as i64 - entry.value.len() as i64;
                entry.value = value;
            }
        } else {
            self.nbytes += entry_size(&key, value.len());
            let slot = self.alloc(Entry {
                key: key.clone(),
                value,
                prev: None,
                next: None,
            });
            self.attach_front(slot);
            self.index.insert(key, slot);
        }

        while self.max_bytes != 0 && self.nbytes > self.max_bytes {
            if self.remove_oldest().is_none() {
                break;
            }
        }
    }

    /// Drops `key` without invoking the eviction callback.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let slot = self.index.remove(key)?;
        let entry = self.release(slot)?;
        self.nbytes -= entry_size(&entry.key, entry.value.len());
        Some(entry.value)
    }

    /// Evicts the least recently used entry, reporting it to the eviction
    /// callback. Returns the evicted key.
    pub fn remove_oldest(&mut self) -> Option<String> {
        let slot = self.tail?;
        let entry = self.release(slot)?;
        self.index.remove(&entry.key);
        self.nbytes -= entry_size(&entry.key, entry.value.len());

        let key = entry.key.clone();
        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(entry.key, entry.value);
        }
        Some(key)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Bytes currently accounted to resident entries.
    pub fn bytes(&self) -> i64 {
        self.nbytes
    }

    pub fn capacity(&self) -> i64 {
        self.max_bytes
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            match self.slots[slot].as_ref() {
                Some(entry) => {
                    keys.push(entry.key.clone());
                    cursor = entry.next;
                }
                None => break,
            }
        }
        keys
    }

    fn alloc(&mut self, entry: Entry<V>) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, slot: usize) -> Option<Entry<V>> {
        self.detach(slot);
        let entry = self.slots.get_mut(slot)?.take()?;
        self.free.push(slot);
        Some(entry)
    }

    fn move_to_front(&mut self, slot: usize) {
        if self.head == Some(slot) {
            return;
        }
        self.detach(slot);
        self.attach_front(slot);
    }

    fn detach(&mut self, slot: usize) {
        let (prev, next) = match self.slots[slot].as_mut() {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev {
            Some(prev) => {
                if let Some(entry) = self.slots[prev].as_mut() {
                    entry.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next) => {
                if let Some(entry) = self.slots[next].as_mut() {
                    entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn attach_front(&mut self, slot: usize) {
        let old_head = self.head;
        if let Some(entry) = self.slots[slot].as_mut() {
            entry.prev = None;
            entry.next = old_head;
        }
        if let Some(old) = old_head
            && let Some(entry) = self.slots[old].as_mut()
        {
            entry.prev = Some(slot);
        }
        self.head = Some(slot);
        if self.tail.is_none() {
            self.tail = Some(slot);
        }
    }
}
