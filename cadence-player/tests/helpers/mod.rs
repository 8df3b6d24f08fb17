//! Test helper modules for cadence-player integration tests
//!
//! Provides reusable test infrastructure components:
//! - RecordingMedia: media surface that records every request
//! - Player builders over a numbered playlist

#![allow(dead_code)]

pub mod recording_media;

pub use recording_media::{MediaCall, RecordingMedia};

use cadence_common::events::EventBus;
use cadence_player::host::ConsoleView;
use cadence_player::playback::{PlayerSettings, Playlist, PlaylistPlayer, Track};
use std::time::Duration;

/// Tracks "Song 0".."Song n-1" with sources "song0.mp3".."song{n-1}.mp3"
pub fn numbered_playlist(n: usize) -> Playlist {
    Playlist::new(
        (0..n)
            .map(|i| Track::new(format!("Song {i}"), format!("Artist {i}"), format!("song{i}.mp3")))
            .collect(),
    )
    .expect("non-empty playlist")
}

pub fn settings(delay_ms: u64) -> PlayerSettings {
    PlayerSettings {
        initial_volume: 80,
        error_advance_delay: Duration::from_millis(delay_ms),
    }
}

/// Player over RecordingMedia and a 0..100 ConsoleView
pub fn recording_player(n: usize) -> PlaylistPlayer<RecordingMedia, ConsoleView> {
    PlaylistPlayer::new(
        numbered_playlist(n),
        RecordingMedia::default(),
        ConsoleView::new(n),
        settings(1000),
        EventBus::new(256),
    )
}

/// Same as `recording_player`, with the play request already resolved
pub fn playing_player(n: usize) -> PlaylistPlayer<RecordingMedia, ConsoleView> {
    let mut player = recording_player(n);
    player.play();
    player.on_play_resolved();
    player
}
