//! Configuration Module
//!
//! Handles loading and managing driver configuration from environment variables.

use std::env;

/// Driver configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold.
    /// Kept signed so a negative value reaches the cache constructor and is rejected there.
    pub capacity: i64,
    /// Stats reporter interval in seconds, 0 disables the reporter
    pub stats_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `STATS_INTERVAL` - Stats reporting frequency in seconds (default: 30)
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(1000),
            stats_interval: env::var("STATS_INTERVAL")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(30),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1000,
            stats_interval: 30,
        }
    }
}
