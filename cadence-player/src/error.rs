//! Error types for cadence-player
//!
//! Only construction and the host can fail. State-machine operations never
//! return errors: out-of-range indices and unusable durations are dropped
//! and logged, and media failures move the player into its Error state.

use thiserror::Error;

/// Main error type for cadence-player
#[derive(Error, Debug)]
pub enum Error {
    /// A playlist must contain at least one track
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Configuration validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Host command could not be parsed
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Errors from the shared library (config loading)
    #[error(transparent)]
    Common(#[from] cadence_common::Error),
}

/// Convenience Result type using cadence-player Error
pub type Result<T> = std::result::Result<T, Error>;
