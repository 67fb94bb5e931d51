//! Cache Module
//!
//! Bounded LRU cache: hash index + arena-backed recency list with sentinels.

mod entry;
mod list;
mod lru;
mod shared;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use lru::LruCache;
pub use shared::SharedLruCache;
pub use stats::CacheStats;
