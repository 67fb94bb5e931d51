//! Recency Cache - A bounded, constant-time LRU cache
//!
//! Provides a fixed-capacity cache with O(1) get/set and least-recently-used
//! eviction, a lock-wrapped shared handle, and a line-oriented command driver.

pub mod cache;
pub mod config;
pub mod driver;
pub mod error;
pub mod models;
pub mod tasks;

pub use cache::{CacheStats, LruCache, SharedLruCache};
pub use config::Config;
pub use driver::DriverState;
pub use error::{CacheError, Result};
pub use tasks::spawn_stats_reporter;
