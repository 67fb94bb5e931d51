//! Driver Module
//!
//! Line-oriented command driver over any async reader/writer pair.
//!
//! # Commands
//! - `SET <key> <value>` - Store a value (value runs to end of line)
//! - `SETNULL <key>` - Store a key with no value
//! - `GET <key>` - Retrieve a value, promoting the key
//! - `DEL <key>` - Delete a key
//! - `LEN` - Resident entries and capacity
//! - `KEYS` - Resident keys, most recently used first
//! - `STATS` - Cache statistics
//! - `CLEAR` - Drop every entry

pub mod handlers;
pub mod session;

pub use handlers::{dispatch, execute, DriverCache, DriverState, Reply};
pub use session::{run_session, SessionSummary};
