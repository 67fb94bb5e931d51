//! Command and reply models for the line-oriented driver
//!
//! Commands are parsed from input lines; replies are serialized as one JSON
//! object per line.

pub mod commands;
pub mod responses;

// Re-export commonly used types
pub use commands::{Command, CommandError};
pub use responses::{
    ClearResponse, DeleteResponse, ErrorResponse, GetResponse, KeysResponse, LenResponse,
    SetResponse, StatsResponse,
};
