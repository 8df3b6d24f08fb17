//! # Cadence Playlist Player Library (cadence-player)
//!
//! **Purpose:** Keep one authoritative current track and play/pause state,
//! translate user intents (select, toggle, skip, seek, volume) into requests
//! to a media surface, and keep progress displays in step with playback
//! unless the user is dragging the progress handle.
//!
//! **Architecture:** A synchronous state machine (`playback::PlaylistPlayer`)
//! over trait-based surfaces, hosted by a tokio event loop
//! (`driver::PlayerDriver`). The `host` module provides a simulated media
//! surface and a log-backed view for the headless binary and tests.

pub mod command;
pub mod config;
pub mod driver;
pub mod error;
pub mod host;
pub mod playback;

pub use error::{Error, Result};
pub use playback::PlaylistPlayer;
