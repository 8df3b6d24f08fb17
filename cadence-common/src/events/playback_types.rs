//! Playback-related type definitions

use serde::{Deserialize, Serialize};

/// Playback state classification
///
/// Seeking is tracked separately and overlays `Idle` or `Playing`; it never
/// replaces them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Track loaded, not producing audio
    #[default]
    Idle,
    /// Media surface confirmed playback
    Playing,
    /// Current source could not be played
    Error,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Idle => write!(f, "idle"),
            PlaybackState::Playing => write!(f, "playing"),
            PlaybackState::Error => write!(f, "error"),
        }
    }
}

/// Which control the play/pause button currently offers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Affordance {
    /// Button shows the play glyph (player is not playing)
    #[default]
    Play,
    /// Button shows the pause glyph (player is playing)
    Pause,
}

impl std::fmt::Display for Affordance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Affordance::Play => write!(f, "play"),
            Affordance::Pause => write!(f, "pause"),
        }
    }
}
