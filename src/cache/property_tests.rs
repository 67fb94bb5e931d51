//! Property-Based Tests for Cache Module
//!
//! Runs random operation sequences against `LruCache` and a straightforward
//! `VecDeque` model (front = most recently used) and checks they agree.

use proptest::prelude::*;
use std::collections::VecDeque;

use crate::cache::LruCache;

// == Reference Model ==
/// O(n) LRU used as an oracle.
#[derive(Debug, Default)]
struct ModelLru {
    order: VecDeque<(u8, Option<u16>)>,
    capacity: usize,
}

impl ModelLru {
    fn new(capacity: usize) -> Self {
        Self {
            order: VecDeque::new(),
            capacity,
        }
    }

    fn take(&mut self, key: u8) -> Option<(u8, Option<u16>)> {
        let pos = self.order.iter().position(|(k, _)| *k == key)?;
        self.order.remove(pos)
    }

    fn get(&mut self, key: u8) -> Option<Option<u16>> {
        let entry = self.take(key)?;
        self.order.push_front(entry);
        Some(entry.1)
    }

    fn set(&mut self, key: u8, value: Option<u16>) {
        if self.capacity == 0 {
            return;
        }
        if self.take(key).is_none() && self.order.len() == self.capacity {
            self.order.pop_back();
        }
        self.order.push_front((key, value));
    }

    fn remove(&mut self, key: u8) -> Option<Option<u16>> {
        self.take(key).map(|(_, value)| value)
    }

    fn keys(&self) -> Vec<u8> {
        self.order.iter().map(|(k, _)| *k).collect()
    }
}

// == Strategies ==
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: u8, value: Option<u16> },
    Get { key: u8 },
    Remove { key: u8 },
}

/// Keys come from a small domain so hits, updates and evictions all happen often.
fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    let key = 0u8..12;
    prop_oneof![
        4 => (key.clone(), prop::option::weighted(0.9, any::<u16>()))
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        4 => key.clone().prop_map(|key| CacheOp::Get { key }),
        1 => key.prop_map(|key| CacheOp::Remove { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // For any operation sequence, results and recency order match the model,
    // index and list stay in bijection, and size never exceeds capacity.
    #[test]
    fn prop_matches_reference_model(
        capacity in 0usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..120)
    ) {
        let mut cache = LruCache::with_capacity(capacity);
        let mut model = ModelLru::new(capacity);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(key, value);
                    model.set(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key).copied(), model.get(key));
                }
                CacheOp::Remove { key } => {
                    prop_assert_eq!(cache.remove(&key), model.remove(key));
                }
            }

            cache.assert_invariants();
            prop_assert!(cache.len() <= capacity);
            prop_assert_eq!(cache.keys().copied().collect::<Vec<_>>(), model.keys());
        }
    }

    // With capacity 0 nothing is ever retained.
    #[test]
    fn prop_zero_capacity_never_retains(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut cache = LruCache::with_capacity(0);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => cache.set(key, value),
                CacheOp::Get { key } => {
                    prop_assert_eq!(cache.get(&key), None);
                }
                CacheOp::Remove { key } => {
                    prop_assert_eq!(cache.remove(&key), None);
                }
            }
            prop_assert!(cache.is_empty());
        }
    }

    // A key read just before an eviction-triggering insert survives it
    // whenever some other resident key is older.
    #[test]
    fn prop_get_protects_from_next_eviction(
        capacity in 2usize..8,
        touched in 0usize..8,
    ) {
        let touched = (touched % capacity) as u8;
        let mut cache = LruCache::with_capacity(capacity);
        for key in 0..capacity as u8 {
            cache.set(key, ());
        }

        prop_assert!(cache.get(&touched).is_some());
        cache.set(u8::MAX, ());

        prop_assert!(cache.contains(&touched));
        let expected_evicted: u8 = if touched == 0 { 1 } else { 0 };
        prop_assert!(!cache.contains(&expected_evicted));
        prop_assert_eq!(cache.len(), capacity);
        cache.assert_invariants();
    }

    // Repeating the same set leaves size alone and the key at the front.
    #[test]
    fn prop_overwrite_is_idempotent(
        keys in prop::collection::vec(0u8..20, 1..10),
        key in 0u8..20,
        value in any::<u16>(),
        repeats in 1usize..4,
    ) {
        let mut cache = LruCache::with_capacity(10);
        for k in keys {
            cache.set(k, 0u16);
        }
        cache.set(key, value);
        let len = cache.len();

        for _ in 0..repeats {
            cache.set(key, value);
            prop_assert_eq!(cache.len(), len);
            prop_assert_eq!(cache.peek_mru(), Some((&key, &value)));
        }
        cache.assert_invariants();
    }

    // The tail-most entry is always the least recently touched one.
    #[test]
    fn prop_lru_is_least_recently_touched(
        touches in prop::collection::vec((0u8..10, any::<bool>()), 1..80)
    ) {
        let capacity = 4;
        let mut cache = LruCache::with_capacity(capacity);
        let mut last_touch: Vec<(u8, usize)> = Vec::new();

        for (step, (key, is_write)) in touches.into_iter().enumerate() {
            let touched = if is_write {
                cache.set(key, step);
                true
            } else {
                cache.get(&key).is_some()
            };
            if touched {
                last_touch.retain(|(k, _)| *k != key);
                last_touch.push((key, step));
            }
            last_touch.retain(|(k, _)| cache.contains(k));

            let oldest = last_touch.iter().min_by_key(|(_, at)| *at).map(|(k, _)| k);
            prop_assert_eq!(cache.peek_lru().map(|(k, _)| k), oldest);
        }
    }
}
