//! LRU Cache Module
//!
//! Bounded Least Recently Used cache: a hash index of arena slots paired with
//! the recency list that owns the entries.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::cache::list::RecencyList;
use crate::cache::CacheStats;
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// Fixed-capacity cache with O(1) `get`/`set` and least-recently-used eviction.
///
/// The index maps every resident key to the arena slot of its entry, and the
/// recency list holds exactly those entries, front = most recently used.
/// Both are mutated together inside each operation.
///
/// `get` promotes the entry it finds, so it takes `&mut self`. Use
/// [`SharedLruCache`](crate::cache::SharedLruCache) to share a cache across tasks.
///
/// A present key can map to "no value" by using `V = Option<T>`: `get` then
/// returns `None` for an absent key and `Some(&None)` for a present null.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Key to arena slot
    index: HashMap<K, usize>,
    /// Entries in recency order
    list: RecencyList<K, V>,
    /// Maximum number of resident entries, fixed at construction
    capacity: usize,
    /// Activity counters
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructors ==
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A capacity of 0 is legal and yields a cache that never retains anything.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] if `capacity < 0`.
    pub fn new(capacity: i64) -> Result<Self> {
        if capacity < 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        // Larger than the address space on this target: unreachable in practice.
        let capacity = usize::try_from(capacity).unwrap_or(usize::MAX);
        Ok(Self::with_capacity(capacity))
    }

    /// Creates a cache from an unsigned capacity. Never fails.
    pub fn with_capacity(capacity: usize) -> Self {
        debug!(capacity, "creating LRU cache");
        Self {
            index: HashMap::new(),
            list: RecencyList::new(),
            capacity,
            stats: CacheStats {
                capacity,
                ..CacheStats::default()
            },
        }
    }

    // == Get ==
    /// Returns the value for `key` and promotes it to most recently used.
    ///
    /// A miss returns `None` and leaves the cache untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key) {
            Some(&slot) => {
                self.stats.record_hit();
                self.list.promote(slot);
                self.list.entry(slot).map(|entry| &entry.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key` as the most recently used entry.
    ///
    /// - capacity 0: no-op
    /// - key present: value replaced in place, entry promoted, size unchanged
    /// - key absent, room left: new entry at the front, size + 1
    /// - key absent, cache full: least recently used entry evicted first, size unchanged
    ///
    /// Eviction is silent.
    pub fn set(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        if let Some(&slot) = self.index.get(&key) {
            if let Some(entry) = self.list.entry_mut(slot) {
                entry.value = value;
            }
            self.list.promote(slot);
            self.stats.record_update();
            return;
        }

        // Everything that can allocate or panic happens before the first link changes.
        let indexed_key = key.clone();
        self.index.reserve(1);
        self.list.reserve();

        if self.list.len() >= self.capacity {
            if let Some(slot) = self.list.evict_lru() {
                if let Some(evicted) = self.list.entry(slot) {
                    self.index.remove(&evicted.key);
                }
                self.stats.record_eviction();
                trace!(slot, len = self.list.len(), "evicted least recently used entry");

                self.list.refill(slot, key, value);
                self.index.insert(indexed_key, slot);
                self.stats.record_insert();
                return;
            }
        }

        let slot = self.list.push_front(key, value);
        self.index.insert(indexed_key, slot);
        self.stats.record_insert();
    }

    // == Remove ==
    /// Removes `key` and returns its value. Unlinks and de-indexes in one step.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;
        let entry = self.list.remove(slot)?;
        self.index.remove(key);
        self.stats.record_removal();
        Some(entry.value)
    }

    // == Peek ==
    /// Returns the value for `key` without touching recency order.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;
        self.list.entry(slot).map(|entry| &entry.value)
    }

    // == Contains ==
    /// Checks membership without touching recency order.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    // == Peek LRU ==
    /// Returns the entry that the next capacity-exceeding insert would evict.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let slot = self.list.back()?;
        self.list.entry(slot).map(|entry| (&entry.key, &entry.value))
    }

    // == Peek MRU ==
    /// Returns the most recently touched entry.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        let slot = self.list.front()?;
        self.list.entry(slot).map(|entry| (&entry.key, &entry.value))
    }

    // == Iteration ==
    /// Resident keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().map(|entry| &entry.key)
    }

    /// Resident entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.list.iter().map(|entry| (&entry.key, &entry.value))
    }

    // == Clear ==
    /// Drops every entry. Capacity and counters are kept.
    pub fn clear(&mut self) {
        debug!(dropped = self.list.len(), "clearing LRU cache");
        self.index.clear();
        self.list.clear();
    }

    // == Diagnostics ==
    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the activity counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.len();
        stats
    }
}

#[cfg(test)]
impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone + std::fmt::Debug,
{
    /// Panics unless index and list agree and the list is a well formed chain.
    pub(crate) fn assert_invariants(&self) {
        let forward = self.list.slots_forward();
        assert_eq!(forward, self.list.slots_backward(), "prev/next links disagree");
        assert_eq!(forward.len(), self.list.len(), "list length drifted");
        assert_eq!(forward.len(), self.index.len(), "index and list sizes differ");
        assert!(self.len() <= self.capacity, "capacity exceeded");

        for slot in forward {
            let entry = self.list.entry(slot).expect("linked slot without entry");
            assert_eq!(
                self.index.get(&entry.key),
                Some(&slot),
                "index does not point at the entry for {:?}",
                entry.key
            );
        }
    }
}
