//! Error types for the recency cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised by the cache.
///
/// A negative capacity at construction is the only input the cache refuses.
/// Misses are reported as `None`, never as errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity was below zero
    #[error("Invalid capacity: {0} (capacity must be >= 0)")]
    InvalidCapacity(i64),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
