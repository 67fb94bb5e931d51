//! Reply DTOs for the line-oriented driver
//!
//! Every command produces exactly one of these, serialized as one JSON line.

use serde::Serialize;

use crate::cache::CacheStats;

/// Reply for `GET`
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value, `null` when the key is present without a value
    pub value: Option<String>,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Reply for `SET` and `SETNULL`
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Outcome message
    pub message: String,
    /// The key that was set
    pub key: String,
    /// Whether the key is resident afterwards (false only at capacity 0)
    pub stored: bool,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>, stored: bool) -> Self {
        let key = key.into();
        let message = if stored {
            format!("Key '{}' set successfully", key)
        } else {
            format!("Key '{}' not stored: cache capacity is 0", key)
        };
        Self {
            message,
            key,
            stored,
        }
    }
}

/// Reply for `DEL`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Reply for `LEN`
#[derive(Debug, Clone, Serialize)]
pub struct LenResponse {
    pub len: usize,
    pub capacity: usize,
}

/// Reply for `KEYS`, most recently used first
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    pub keys: Vec<String>,
}

/// Reply for `CLEAR`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn new(dropped: usize) -> Self {
        Self {
            message: format!("Cleared {} entries", dropped),
        }
    }
}

/// Reply for `STATS`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Raw counters
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self { stats, hit_rate }
    }
}

/// Error reply for misses and malformed lines
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
