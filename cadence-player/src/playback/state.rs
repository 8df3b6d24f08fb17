//! Player state
//!
//! Single-owner mutable state of the playlist player plus the serializable
//! snapshot handed out to hosts.

use cadence_common::events::PlaybackState;
use serde::{Deserialize, Serialize};

/// Mutable player state, owned by `PlaylistPlayer`
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Index of the current track, always valid for the playlist
    pub current_index: usize,

    /// True iff the media surface confirmed it is producing audio
    pub is_playing: bool,

    /// True while the progress handle is being dragged
    pub is_seeking: bool,

    /// A play request is outstanding (neither resolved nor rejected)
    pub play_pending: bool,

    /// Output volume (0.0-1.0)
    pub volume: f64,

    /// Volume on the 0-100 UI scale, as last applied
    pub volume_level: u8,

    /// Total duration of the current track, once reported
    pub duration: Option<f64>,

    /// Last known playback position in seconds
    pub position: f64,

    /// Idle / Playing / Error classification
    pub playback_state: PlaybackState,

    /// Incremented on every track load; stale scheduled work compares against it
    pub load_generation: u64,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            current_index: 0,
            is_playing: false,
            is_seeking: false,
            play_pending: false,
            volume: 1.0,
            volume_level: 100,
            duration: None,
            position: 0.0,
            playback_state: PlaybackState::Idle,
            load_generation: 0,
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the player for status queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub current_index: usize,
    pub title: String,
    pub artist: String,
    pub state: PlaybackState,
    pub is_playing: bool,
    pub is_seeking: bool,
    pub volume_level: u8,
    pub position_secs: f64,
    pub duration_secs: Option<f64>,
    pub playlist_len: usize,
}

impl std::fmt::Display for PlayerSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}/{}] {} - {} ({}) {}/{} vol {}%{}",
            self.current_index + 1,
            self.playlist_len,
            self.title,
            self.artist,
            self.state,
            cadence_common::format_clock(self.position_secs),
            cadence_common::human_time::format_clock_opt(self.duration_secs),
            self.volume_level,
            if self.is_seeking { " seeking" } else { "" },
        )
    }
}
