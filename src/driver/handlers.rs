//! Driver Handlers
//!
//! One handler per command, each producing exactly one [`Reply`].

use serde::Serialize;
use tracing::debug;

use crate::cache::{LruCache, SharedLruCache};
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    ClearResponse, Command, DeleteResponse, ErrorResponse, GetResponse, KeysResponse,
    LenResponse, SetResponse, StatsResponse,
};

/// Cache type driven by the binary: string keys, nullable string values.
pub type DriverCache = SharedLruCache<String, Option<String>>;

/// State shared by every handler.
#[derive(Clone, Debug)]
pub struct DriverState {
    /// Thread-safe cache handle
    pub cache: DriverCache,
}

impl DriverState {
    /// Creates a new DriverState around an existing cache.
    pub fn new(cache: LruCache<String, Option<String>>) -> Self {
        Self {
            cache: SharedLruCache::from_cache(cache),
        }
    }

    /// Creates a new DriverState from configuration.
    ///
    /// Fails if the configured capacity is negative.
    pub fn from_config(config: &Config) -> Result<Self> {
        LruCache::new(config.capacity).map(Self::new)
    }
}

// == Reply ==
/// Any reply the driver can write.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Get(GetResponse),
    Set(SetResponse),
    Delete(DeleteResponse),
    Len(LenResponse),
    Keys(KeysResponse),
    Stats(StatsResponse),
    Clear(ClearResponse),
    Error(ErrorResponse),
}

impl Reply {
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

/// Parses and executes one input line.
pub async fn dispatch(state: &DriverState, line: &str) -> Reply {
    match line.parse::<Command>() {
        Ok(command) => execute(state, command).await,
        Err(err) => {
            debug!(%err, "rejected command line");
            Reply::Error(ErrorResponse::new(err.to_string()))
        }
    }
}

/// Executes one parsed command.
pub async fn execute(state: &DriverState, command: Command) -> Reply {
    match command {
        Command::Set { key, value } => set_handler(state, key, Some(value)).await,
        Command::SetNull { key } => set_handler(state, key, None).await,
        Command::Get { key } => get_handler(state, key).await,
        Command::Del { key } => delete_handler(state, key).await,
        Command::Len => len_handler(state).await,
        Command::Keys => keys_handler(state).await,
        Command::Stats => stats_handler(state).await,
        Command::Clear => clear_handler(state).await,
    }
}

/// Handler for `SET` / `SETNULL`
///
/// The reply reports whether the key ended up resident, which is false on a zero-capacity cache.
pub async fn set_handler(state: &DriverState, key: String, value: Option<String>) -> Reply {
    let mut cache = state.cache.lock().await;
    cache.set(key.clone(), value);
    let stored = cache.contains(key.as_str());
    Reply::Set(SetResponse::new(key, stored))
}

/// Handler for `GET`
///
/// A present key with no value answers `"value": null`; an absent key is an error reply.
pub async fn get_handler(state: &DriverState, key: String) -> Reply {
    match state.cache.get(key.as_str()).await {
        Some(value) => Reply::Get(GetResponse::new(key, value)),
        None => Reply::Error(ErrorResponse::new(format!("Key not found: {}", key))),
    }
}

/// Handler for `DEL`
pub async fn delete_handler(state: &DriverState, key: String) -> Reply {
    match state.cache.remove(key.as_str()).await {
        Some(_) => Reply::Delete(DeleteResponse::new(key)),
        None => Reply::Error(ErrorResponse::new(format!("Key not found: {}", key))),
    }
}

/// Handler for `LEN`
pub async fn len_handler(state: &DriverState) -> Reply {
    let cache = state.cache.lock().await;
    Reply::Len(LenResponse {
        len: cache.len(),
        capacity: cache.capacity(),
    })
}

/// Handler for `KEYS`
pub async fn keys_handler(state: &DriverState) -> Reply {
    Reply::Keys(KeysResponse {
        keys: state.cache.keys().await,
    })
}

/// Handler for `STATS`
pub async fn stats_handler(state: &DriverState) -> Reply {
    Reply::Stats(StatsResponse::from(state.cache.stats().await))
}

/// Handler for `CLEAR`
pub async fn clear_handler(state: &DriverState) -> Reply {
    let mut cache = state.cache.lock().await;
    let dropped = cache.len();
    cache.clear();
    Reply::Clear(ClearResponse::new(dropped))
}
