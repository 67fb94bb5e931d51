//! Stats Reporter Task
//!
//! Background task that periodically logs a cache statistics snapshot.

use std::hash::Hash;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedLruCache;

/// Spawns a background task that logs cache statistics every `interval_secs` seconds.
///
/// Snapshots are logged at info level when operations happened since the
/// previous tick, at debug level otherwise. The task only reads stats and
/// never changes recency order.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache = SharedLruCache::<String, String>::new(1000)?;
/// let reporter = spawn_stats_reporter(cache.clone(), 30);
/// // Later, during shutdown:
/// reporter.abort();
/// ```
pub fn spawn_stats_reporter<K, V>(cache: SharedLruCache<K, V>, interval_secs: u64) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Send + 'static,
{
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting stats reporter with interval of {} seconds",
            interval.as_secs()
        );

        let mut last_operations = 0;
        loop {
            tokio::time::sleep(interval).await;

            let stats = cache.stats().await;
            let operations = stats.operations();

            if operations != last_operations {
                info!(
                    entries = stats.total_entries,
                    capacity = stats.capacity,
                    hits = stats.hits,
                    misses = stats.misses,
                    evictions = stats.evictions,
                    hit_rate = stats.hit_rate(),
                    "cache stats"
                );
            } else {
                debug!(entries = stats.total_entries, "cache idle since last report");
            }
            last_operations = operations;
        }
    })
}
