//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the driver is up.
//!
//! # Tasks
//! - Stats Reporter: Logs cache statistics at configured intervals

mod reporter;

pub use reporter::spawn_stats_reporter;
