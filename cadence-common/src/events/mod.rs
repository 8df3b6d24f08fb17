//! Event types for the Cadence event system
//!
//! Provides shared event definitions and the EventBus used by the player and
//! anything observing it (console host, tests).

mod playback_types;

pub use playback_types::{Affordance, PlaybackState};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

type Timestamp = chrono::DateTime<chrono::Utc>;

/// Cadence event types
///
/// Events are broadcast via EventBus and can be serialized to JSON for
/// logging or status output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerEvent {
    /// A track became the current track (playback not necessarily started)
    TrackLoaded {
        /// Playlist index of the loaded track
        index: usize,
        title: String,
        artist: String,
        /// Locator actually handed to the media surface
        source: String,
        timestamp: Timestamp,
    },

    /// Playback state changed (Idle / Playing / Error)
    PlaybackStateChanged {
        old_state: PlaybackState,
        new_state: PlaybackState,
        timestamp: Timestamp,
    },

    /// Total duration of the current track became known
    DurationKnown {
        index: usize,
        duration_secs: f64,
        timestamp: Timestamp,
    },

    /// Progress display followed the media surface
    ///
    /// High frequency; emitted with `emit_lossy`.
    PlaybackProgress {
        index: usize,
        position_secs: f64,
        duration_secs: f64,
        timestamp: Timestamp,
    },

    /// Pointer drag on the progress bar started
    SeekStarted { timestamp: Timestamp },

    /// Pointer drag on the progress bar ended
    SeekEnded { timestamp: Timestamp },

    /// A set-position request was sent to the media surface
    SeekRequested {
        fraction: f64,
        position_secs: f64,
        timestamp: Timestamp,
    },

    /// Volume changed (0-100 UI scale)
    VolumeChanged { level: u8, timestamp: Timestamp },

    /// Current source could not be played
    PlaybackError {
        index: usize,
        reason: String,
        timestamp: Timestamp,
    },

    /// Automatic advance past a failed track was scheduled
    AutoAdvanceScheduled {
        from_index: usize,
        delay_ms: u64,
        timestamp: Timestamp,
    },
}

impl PlayerEvent {
    /// Get event type as string (for logging and filtering)
    pub fn event_type(&self) -> &str {
        match self {
            PlayerEvent::TrackLoaded { .. } => "TrackLoaded",
            PlayerEvent::PlaybackStateChanged { .. } => "PlaybackStateChanged",
            PlayerEvent::DurationKnown { .. } => "DurationKnown",
            PlayerEvent::PlaybackProgress { .. } => "PlaybackProgress",
            PlayerEvent::SeekStarted { .. } => "SeekStarted",
            PlayerEvent::SeekEnded { .. } => "SeekEnded",
            PlayerEvent::SeekRequested { .. } => "SeekRequested",
            PlayerEvent::VolumeChanged { .. } => "VolumeChanged",
            PlayerEvent::PlaybackError { .. } => "PlaybackError",
            PlayerEvent::AutoAdvanceScheduled { .. } => "AutoAdvanceScheduled",
        }
    }
}

/// One-to-many event broadcaster built on `tokio::sync::broadcast`
///
/// Slow subscribers lose the oldest events once `capacity` is exceeded.
///
/// # Examples
///
/// ```
/// use cadence_common::events::{EventBus, PlaybackState, PlayerEvent};
///
/// let event_bus = EventBus::new(16);
/// let mut rx = event_bus.subscribe();
///
/// event_bus.emit(PlayerEvent::PlaybackStateChanged {
///     old_state: PlaybackState::Idle,
///     new_state: PlaybackState::Playing,
///     timestamp: chrono::Utc::now(),
/// }).ok();
///
/// assert!(rx.try_recv().is_ok());
/// ```
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<PlayerEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists,
    /// `Err` if nobody is listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: PlayerEvent,
    ) -> Result<usize, broadcast::error::SendError<PlayerEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring the absence of subscribers
    pub fn emit_lossy(&self, event: PlayerEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_change() -> PlayerEvent {
        PlayerEvent::PlaybackStateChanged {
            old_state: PlaybackState::Idle,
            new_state: PlaybackState::Playing,
            timestamp: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_eventbus_new() {
        let bus = EventBus::new(100);
        assert_eq!(bus.capacity(), 100);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_emit_without_subscribers_fails() {
        let bus = EventBus::new(10);
        assert!(bus.emit(state_change()).is_err());
    }

    #[test]
    fn test_emit_lossy_on_full_channel() {
        let bus = EventBus::new(2);
        let _rx = bus.subscribe();

        for i in 0..10 {
            bus.emit_lossy(PlayerEvent::VolumeChanged {
                level: i,
                timestamp: chrono::Utc::now(),
            });
        }
        assert_eq!(bus.capacity(), 2);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_receive_event() {
        let bus = EventBus::new(10);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.emit(state_change()).unwrap(), 2);

        for rx in [&mut rx1, &mut rx2] {
            match rx.recv().await.unwrap() {
                PlayerEvent::PlaybackStateChanged { new_state, .. } => {
                    assert_eq!(new_state, PlaybackState::Playing);
                }
                other => panic!("Unexpected event: {:?}", other),
            }
        }
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let json = serde_json::to_value(PlayerEvent::SeekStarted {
            timestamp: chrono::Utc::now(),
        })
        .unwrap();
        assert_eq!(json["type"], "SeekStarted");

        let json = serde_json::to_value(state_change()).unwrap();
        assert_eq!(json["new_state"], "playing");
    }

    #[test]
    fn test_event_type_names() {
        assert_eq!(state_change().event_type(), "PlaybackStateChanged");
        let event = PlayerEvent::AutoAdvanceScheduled {
            from_index: 1,
            delay_ms: 1000,
            timestamp: chrono::Utc::now(),
        };
        assert_eq!(event.event_type(), "AutoAdvanceScheduled");
    }

    #[test]
    fn test_playback_state_display() {
        assert_eq!(PlaybackState::Idle.to_string(), "idle");
        assert_eq!(PlaybackState::Playing.to_string(), "playing");
        assert_eq!(PlaybackState::Error.to_string(), "error");
        assert_eq!(Affordance::Pause.to_string(), "pause");
    }
}
