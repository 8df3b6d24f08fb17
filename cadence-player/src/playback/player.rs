//! Playlist player state machine
//!
//! Owns the playlist and [`PlayerState`], translates user intents into
//! requests to the [`MediaSurface`], and keeps the [`PlayerView`] consistent
//! with the playback position unless the user is dragging the progress
//! handle.
//!
//! # States
//!
//! ```text
//! Idle    --play() + PlayResolved-->  Playing
//! Playing --pause()-->                Idle
//! Playing --Ended-->                  next(): Idle, then Playing once resolved
//! any     --Error / PlayRejected-->   Error
//! Error   --scheduled advance-->      next() (not scheduled on the last track)
//! ```
//!
//! Seeking is orthogonal: `begin_seek_drag` / `end_seek_drag` toggle it over
//! Idle or Playing without changing the classification.
//!
//! Every operation is synchronous. Time only enters through the host, which
//! delivers [`MediaEvent`]s and waits out [`ScheduledAdvance`] delays.

use crate::playback::playlist::{Playlist, Track};
use crate::playback::state::{PlayerSnapshot, PlayerState};
use crate::playback::surface::{MediaEvent, MediaSurface, PlayerView};
use cadence_common::events::{Affordance, EventBus, PlaybackState, PlayerEvent};
use cadence_common::format_clock;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Title shown in place of the track title after a playback error
pub const ERROR_TITLE: &str = "Error loading song";

/// Artist line shown after a playback error
pub const ERROR_ARTIST: &str = "Please try another song";

/// Tunables applied at construction
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSettings {
    /// Starting volume on the 0-100 UI scale
    pub initial_volume: u8,

    /// Wait before skipping past a track that failed to play
    pub error_advance_delay: Duration,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            initial_volume: 100,
            error_advance_delay: Duration::from_millis(1000),
        }
    }
}

/// Automatic advance the host must fire after `delay`
///
/// The token ties the advance to the track load it was scheduled for; a
/// later load makes it stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAdvance {
    pub token: u64,
    pub delay: Duration,
}

/// Playlist player over a media surface and a set of display surfaces
pub struct PlaylistPlayer<M, V> {
    playlist: Playlist,
    state: PlayerState,
    media: M,
    view: V,
    events: EventBus,
    settings: PlayerSettings,
    scheduled: Option<ScheduledAdvance>,
}

impl<M: MediaSurface, V: PlayerView> PlaylistPlayer<M, V> {
    /// Create a player: applies the initial volume and loads the first
    /// track without starting playback.
    pub fn new(
        playlist: Playlist,
        media: M,
        view: V,
        settings: PlayerSettings,
        events: EventBus,
    ) -> Self {
        let mut player = Self {
            playlist,
            state: PlayerState::new(),
            media,
            view,
            events,
            settings,
            scheduled: None,
        };

        player.set_volume(player.settings.initial_volume);
        player.load_track(0);
        info!(
            "Player initialized with {} tracks",
            player.playlist.len()
        );
        player
    }

    // ========================================
    // Track selection
    // ========================================

    /// Make `index` the current track and hand its source to the media
    /// surface. Out-of-range indices are ignored. Does not start playback.
    pub fn load_track(&mut self, index: usize) {
        let Some(track) = self.playlist.get(index).cloned() else {
            debug!(
                "Ignoring load of track {} (playlist has {} tracks)",
                index,
                self.playlist.len()
            );
            return;
        };

        self.state.current_index = index;
        self.state.load_generation += 1;
        self.state.duration = None;
        self.state.position = 0.0;
        self.state.play_pending = false;
        self.state.is_playing = false;

        let source = self
            .view
            .source_override(index)
            .unwrap_or_else(|| track.source.clone());
        self.media.load_source(&source);

        self.view.set_track_info(&track.title, &track.artist);
        for row in 0..self.playlist.len() {
            self.view.set_row_highlight(row, row == index);
        }
        self.view.set_affordance(Affordance::Play);
        self.view.set_progress(0.0);
        self.view.set_elapsed_label(&format_clock(0.0));
        self.view.set_total_label(&format_clock(0.0));

        self.transition(PlaybackState::Idle);

        info!("Loading track {}: {}", index + 1, source);
        self.events.emit_lossy(PlayerEvent::TrackLoaded {
            index,
            title: track.title,
            artist: track.artist,
            source,
            timestamp: chrono::Utc::now(),
        });
    }

    /// Playlist row clicked: load that track and play it
    pub fn select_track(&mut self, index: usize) {
        if !self.playlist.contains_index(index) {
            debug!("Ignoring selection of track {}", index);
            return;
        }
        self.load_track(index);
        self.play();
    }

    /// A row's own play button: pauses if that row is the one playing,
    /// otherwise switches to it and plays.
    pub fn toggle_track(&mut self, index: usize) {
        if index == self.state.current_index && self.state.is_playing {
            self.pause();
        } else {
            self.select_track(index);
        }
    }

    /// Skip forward (wrapping) and start playing
    pub fn next(&mut self) {
        let index = self.playlist.next_index(self.state.current_index);
        self.load_track(index);
        self.play();
    }

    /// Skip backward (wrapping) and start playing
    pub fn previous(&mut self) {
        let index = self.playlist.previous_index(self.state.current_index);
        self.load_track(index);
        self.play();
    }

    // ========================================
    // Play / pause
    // ========================================

    /// Request playback; the outcome arrives as `PlayResolved` or
    /// `PlayRejected`.
    pub fn play(&mut self) {
        self.state.play_pending = true;
        self.media.request_play();
        debug!("Play requested for track {}", self.state.current_index + 1);
    }

    /// Stop playback immediately
    pub fn pause(&mut self) {
        self.state.play_pending = false;
        self.media.pause();
        self.state.is_playing = false;
        self.view.set_affordance(Affordance::Play);

        if self.state.playback_state == PlaybackState::Playing {
            self.transition(PlaybackState::Idle);
        }
    }

    pub fn toggle_play_pause(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// The media surface started producing audio
    pub fn on_play_resolved(&mut self) {
        if !self.state.play_pending {
            debug!("Ignoring play resolution with no request outstanding");
            return;
        }
        self.state.play_pending = false;
        self.state.is_playing = true;
        self.view.set_affordance(Affordance::Pause);
        self.transition(PlaybackState::Playing);
    }

    /// The media surface refused the play request
    pub fn on_play_rejected(&mut self, reason: &str) {
        if !self.state.play_pending {
            debug!("Ignoring stale play rejection: {}", reason);
            return;
        }
        warn!("Error playing song: {}", reason);
        self.on_playback_error(reason);
    }

    // ========================================
    // Media callbacks
    // ========================================

    /// Dispatch a notification from the media surface
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::PlayResolved => self.on_play_resolved(),
            MediaEvent::PlayRejected(reason) => self.on_play_rejected(&reason),
            MediaEvent::MetadataLoaded { duration } => self.on_metadata_loaded(duration),
            MediaEvent::PositionUpdate {
                current_time,
                duration,
            } => self.on_playback_position_update(current_time, duration),
            MediaEvent::Ended => self.on_playback_ended(),
            MediaEvent::Error(reason) => self.on_playback_error(&reason),
        }
    }

    /// Periodic position report; ignored while the user is seeking
    pub fn on_playback_position_update(&mut self, current_time: f64, duration: f64) {
        if self.state.is_seeking {
            return;
        }
        if !is_valid_duration(duration) || !current_time.is_finite() {
            debug!(
                "Skipping progress update ({} / {})",
                current_time, duration
            );
            return;
        }

        // state.duration is only set from metadata
        self.state.position = current_time;

        let fraction = (current_time / duration).clamp(0.0, 1.0);
        self.view.set_progress(fraction);
        self.view.set_elapsed_label(&format_clock(current_time));

        self.events.emit_lossy(PlayerEvent::PlaybackProgress {
            index: self.state.current_index,
            position_secs: current_time,
            duration_secs: duration,
            timestamp: chrono::Utc::now(),
        });
    }

    /// Total duration of the current track became known
    pub fn on_metadata_loaded(&mut self, duration: f64) {
        if !is_valid_duration(duration) {
            debug!("Ignoring metadata with invalid duration {}", duration);
            return;
        }

        let index = self.state.current_index;
        self.state.duration = Some(duration);

        let label = format_clock(duration);
        self.view.set_total_label(&label);
        self.view.set_row_duration(index, &label);

        self.events.emit_lossy(PlayerEvent::DurationKnown {
            index,
            duration_secs: duration,
            timestamp: chrono::Utc::now(),
        });
    }

    /// Current track played to the end: advance (wrapping) and keep playing
    pub fn on_playback_ended(&mut self) {
        info!("Track {} finished", self.state.current_index + 1);
        self.next();
    }

    /// Current source cannot produce audio
    ///
    /// Shows the error message and, unless this is the last track, schedules
    /// one automatic advance after the configured delay.
    pub fn on_playback_error(&mut self, reason: &str) {
        let index = self.state.current_index;
        warn!("Error loading track {}: {}", index + 1, reason);

        self.state.play_pending = false;
        self.state.is_playing = false;
        self.view.set_affordance(Affordance::Play);
        self.view.set_track_info(ERROR_TITLE, ERROR_ARTIST);
        self.transition(PlaybackState::Error);

        self.events.emit_lossy(PlayerEvent::PlaybackError {
            index,
            reason: reason.to_string(),
            timestamp: chrono::Utc::now(),
        });

        if self.playlist.is_last(index) {
            warn!("Last track failed; no automatic recovery");
            return;
        }

        let delay = self.settings.error_advance_delay;
        self.scheduled = Some(ScheduledAdvance {
            token: self.state.load_generation,
            delay,
        });
        self.events.emit_lossy(PlayerEvent::AutoAdvanceScheduled {
            from_index: index,
            delay_ms: delay.as_millis() as u64,
            timestamp: chrono::Utc::now(),
        });
    }

    /// Hand the pending automatic advance (if any) to the host
    pub fn take_scheduled_advance(&mut self) -> Option<ScheduledAdvance> {
        self.scheduled.take()
    }

    /// Host callback once a scheduled advance's delay elapsed.
    ///
    /// Returns true if the player advanced. Stale tokens (a track was loaded
    /// since) and players that already left the Error state are ignored.
    pub fn fire_scheduled_advance(&mut self, token: u64) -> bool {
        if token != self.state.load_generation
            || self.state.playback_state != PlaybackState::Error
        {
            debug!("Dropping superseded automatic advance");
            return false;
        }
        info!("Trying next song...");
        self.next();
        true
    }

    // ========================================
    // Seeking
    // ========================================

    /// Move playback to `fraction` of the total duration.
    ///
    /// Dropped while the duration is unknown. While seeking, this is the only
    /// path that moves the progress display.
    pub fn seek_to(&mut self, fraction: f64) {
        if fraction.is_nan() {
            return;
        }
        let fraction = fraction.clamp(0.0, 1.0);

        let Some(duration) = self.state.duration.filter(|d| is_valid_duration(*d)) else {
            debug!("Dropping seek: duration unknown");
            return;
        };

        let position = fraction * duration;
        self.media.set_position(position);
        self.state.position = position;
        self.view.set_progress(fraction);
        self.view.set_elapsed_label(&format_clock(position));

        self.events.emit_lossy(PlayerEvent::SeekRequested {
            fraction,
            position_secs: position,
            timestamp: chrono::Utc::now(),
        });
    }

    /// Single click on the progress bar
    pub fn seek_at_pointer(&mut self, pointer_x: f64) {
        match self.view.track_bounds().fraction_at(pointer_x) {
            Some(fraction) => self.seek_to(fraction),
            None => debug!("Pointer {} outside a usable progress track", pointer_x),
        }
    }

    /// Pointer pressed on the progress bar
    pub fn begin_seek_drag(&mut self, pointer_x: f64) {
        if !self.state.is_seeking {
            self.state.is_seeking = true;
            self.events.emit_lossy(PlayerEvent::SeekStarted {
                timestamp: chrono::Utc::now(),
            });
        }
        self.seek_at_pointer(pointer_x);
    }

    /// Pointer moved; only acts during a drag
    pub fn continue_seek_drag(&mut self, pointer_x: f64) {
        if self.state.is_seeking {
            self.seek_at_pointer(pointer_x);
        }
    }

    /// Pointer released; position display follows the media surface again
    pub fn end_seek_drag(&mut self) {
        if self.state.is_seeking {
            self.state.is_seeking = false;
            self.events.emit_lossy(PlayerEvent::SeekEnded {
                timestamp: chrono::Utc::now(),
            });
        }
    }

    // ========================================
    // Volume
    // ========================================

    /// Set volume on the 0-100 UI scale (values above 100 are clamped)
    pub fn set_volume(&mut self, level: u8) {
        let level = level.min(100);
        self.state.volume_level = level;
        self.state.volume = f64::from(level) / 100.0;
        self.media.set_volume(self.state.volume);
        self.view.set_volume_label(&format!("{}%", level));

        self.events.emit_lossy(PlayerEvent::VolumeChanged {
            level,
            timestamp: chrono::Utc::now(),
        });
    }

    // ========================================
    // Queries
    // ========================================

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn current_track(&self) -> &Track {
        // current_index is only ever set from a validated index
        &self.playlist[self.state.current_index]
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn is_seeking(&self) -> bool {
        self.state.is_seeking
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.state.playback_state
    }

    /// Output volume in [0.0, 1.0]
    pub fn volume(&self) -> f64 {
        self.state.volume
    }

    pub fn duration(&self) -> Option<f64> {
        self.state.duration
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        let track = self.current_track();
        PlayerSnapshot {
            current_index: self.state.current_index,
            title: track.title.clone(),
            artist: track.artist.clone(),
            state: self.state.playback_state,
            is_playing: self.state.is_playing,
            is_seeking: self.state.is_seeking,
            volume_level: self.state.volume_level,
            position_secs: self.state.position,
            duration_secs: self.state.duration,
            playlist_len: self.playlist.len(),
        }
    }

    // ========================================
    // Internals
    // ========================================

    fn transition(&mut self, new_state: PlaybackState) {
        let old_state = self.state.playback_state;
        if old_state == new_state {
            return;
        }
        self.state.playback_state = new_state;
        info!("Playback state: {} -> {}", old_state, new_state);
        self.events.emit_lossy(PlayerEvent::PlaybackStateChanged {
            old_state,
            new_state,
            timestamp: chrono::Utc::now(),
        });
    }
}

fn is_valid_duration(duration: f64) -> bool {
    duration.is_finite() && duration > 0.0
}
