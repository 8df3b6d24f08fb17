//! # Cadence Common Library
//!
//! Shared code for the Cadence player crates including:
//! - Error types
//! - Event types (PlayerEvent enum) and the broadcast EventBus
//! - Configuration file resolution
//! - Clock label formatting for progress displays

pub mod config;
pub mod error;
pub mod events;
pub mod human_time;

pub use error::{Error, Result};
pub use human_time::format_clock;
