//! Shared Cache Module
//!
//! Thread-safe handle around [`LruCache`] for use across tokio tasks.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::cache::{CacheStats, LruCache};
use crate::error::Result;

// == Shared LRU Cache ==
/// Cloneable handle to one [`LruCache`] behind a single async mutex.
///
/// The same lock guards index and recency list, so "lookup + promotion" in
/// `get` and "eviction + insertion" in `set` each run as one critical section.
/// A mutex rather than a read/write lock because `get` mutates recency order.
#[derive(Debug)]
pub struct SharedLruCache<K, V> {
    inner: Arc<Mutex<LruCache<K, V>>>,
}

impl<K, V> Clone for SharedLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedLruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructors ==
    /// Creates a shared cache, rejecting a negative capacity.
    pub fn new(capacity: i64) -> Result<Self> {
        LruCache::new(capacity).map(Self::from_cache)
    }

    /// Wraps an existing cache.
    pub fn from_cache(cache: LruCache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    // == Get ==
    /// Returns a clone of the value for `key`, promoting it.
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().await.get(key).cloned()
    }

    // == Set ==
    pub async fn set(&self, key: K, value: V) {
        self.inner.lock().await.set(key, value);
    }

    // == Remove ==
    pub async fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().await.remove(key)
    }

    // == Contains ==
    pub async fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().await.contains(key)
    }

    // == Keys ==
    /// Snapshot of resident keys from most to least recently used.
    pub async fn keys(&self) -> Vec<K> {
        self.inner.lock().await.keys().cloned().collect()
    }

    // == Clear ==
    pub async fn clear(&self) {
        self.inner.lock().await.clear();
    }

    // == Diagnostics ==
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    pub async fn capacity(&self) -> usize {
        self.inner.lock().await.capacity()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    // == Lock ==
    /// Locks the cache for a multi-step operation that must not interleave with others.
    pub async fn lock(&self) -> MutexGuard<'_, LruCache<K, V>> {
        self.inner.lock().await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    #[test]
    fn test_shared_new_rejects_negative_capacity() {
        let result = SharedLruCache::<u32, u32>::new(-10);
        assert!(matches!(result, Err(CacheError::InvalidCapacity(-10))));
    }

    #[test]
    fn test_shared_get_set_blocking() {
        let cache = SharedLruCache::new(2).unwrap();
        tokio_test::block_on(async {
            cache.set(1, "a".to_string()).await;
            assert_eq!(cache.get(&1).await, Some("a".to_string()));
            assert_eq!(cache.get(&2).await, None);
        });
    }

    #[tokio::test]
    async fn test_shared_clones_share_state() {
        let cache = SharedLruCache::new(2).unwrap();
        let other = cache.clone();

        cache.set(1, 10).await;
        other.set(2, 20).await;
        assert_eq!(cache.get(&1).await, Some(10));

        other.set(3, 30).await;
        assert_eq!(cache.keys().await, vec![3, 1]);
        assert_eq!(other.len().await, 2);
        assert!(!other.contains(&2).await);
    }

    #[tokio::test]
    async fn test_shared_remove_and_clear() {
        let cache = SharedLruCache::new(3).unwrap();
        cache.set("a", 1).await;
        cache.set("b", 2).await;

        assert_eq!(cache.remove("a").await, Some(1));
        assert_eq!(cache.len().await, 1);

        cache.clear().await;
        assert!(cache.is_empty().await);
        assert_eq!(cache.capacity().await, 3);
    }

    #[tokio::test]
    async fn test_shared_concurrent_writers_respect_capacity() {
        let cache = SharedLruCache::new(8).unwrap();

        let mut handles = Vec::new();
        for worker in 0..4u32 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..100u32 {
                    let key = worker * 1000 + i;
                    cache.set(key, i).await;
                    cache.get(&key).await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let guard = cache.lock().await;
        assert_eq!(guard.len(), 8);
        guard.assert_invariants();

        let stats = guard.stats();
        assert_eq!(stats.inserts, 400);
        assert_eq!(stats.evictions, 392);
    }
}
