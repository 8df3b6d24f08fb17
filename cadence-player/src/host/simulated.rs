//! Deterministic media surface
//!
//! Stands in for a real decoder/output. Sources listed in the catalog load
//! with their configured duration and play; anything else fails the way a
//! missing file would. Time only moves when [`SimulatedMedia::advance`] is
//! called, either by tests or by the clock task from
//! [`SimulatedMedia::spawn_clock`].

use crate::playback::surface::{MediaEvent, MediaSurface};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Source locator -> duration in seconds
pub type Catalog = HashMap<String, f64>;

#[derive(Debug)]
struct Loaded {
    source: String,
    duration: Option<f64>,
}

#[derive(Debug)]
struct SimState {
    catalog: Catalog,
    events: mpsc::UnboundedSender<MediaEvent>,
    loaded: Option<Loaded>,
    playing: bool,
    position: f64,
    volume: f64,
}

impl SimState {
    fn send(&self, event: MediaEvent) {
        // Receiver gone means the driver shut down; nothing left to notify
        let _ = self.events.send(event);
    }
}

/// Cloneable handle to a simulated media surface
#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    inner: Arc<Mutex<SimState>>,
}

impl SimulatedMedia {
    /// Create a surface that reports through `events`
    pub fn new(catalog: Catalog, events: mpsc::UnboundedSender<MediaEvent>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SimState {
                catalog,
                events,
                loaded: None,
                playing: false,
                position: 0.0,
                volume: 1.0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Move the virtual clock forward, emitting a position update and, at
    /// the end of the source, `Ended`.
    pub fn advance(&self, elapsed: Duration) {
        let mut sim = self.lock();
        if !sim.playing {
            return;
        }
        let Some(duration) = sim.loaded.as_ref().and_then(|l| l.duration) else {
            return;
        };

        sim.position = (sim.position + elapsed.as_secs_f64()).min(duration);
        let position = sim.position;
        trace!("Simulated position {:.2}/{:.2}", position, duration);
        sim.send(MediaEvent::PositionUpdate {
            current_time: position,
            duration,
        });

        if position >= duration {
            sim.playing = false;
            sim.send(MediaEvent::Ended);
        }
    }

    /// Spawn a task advancing the clock every `period`
    pub fn spawn_clock(&self, period: Duration) -> JoinHandle<()> {
        let media = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                media.advance(period);
            }
        })
    }

    pub fn is_playing(&self) -> bool {
        self.lock().playing
    }

    pub fn position(&self) -> f64 {
        self.lock().position
    }

    pub fn volume(&self) -> f64 {
        self.lock().volume
    }

    pub fn loaded_source(&self) -> Option<String> {
        self.lock().loaded.as_ref().map(|l| l.source.clone())
    }
}

impl MediaSurface for SimulatedMedia {
    fn load_source(&mut self, source: &str) {
        let mut sim = self.lock();
        sim.playing = false;
        sim.position = 0.0;

        let duration = sim.catalog.get(source).copied();
        sim.loaded = Some(Loaded {
            source: source.to_string(),
            duration,
        });

        match duration {
            Some(duration) => sim.send(MediaEvent::MetadataLoaded { duration }),
            None => {
                debug!("Simulated surface has no media for {}", source);
                sim.send(MediaEvent::Error(format!("Failed to load: {}", source)));
            }
        }
    }

    fn request_play(&mut self) {
        let mut sim = self.lock();
        let playable = sim.loaded.as_ref().is_some_and(|l| l.duration.is_some());
        if playable {
            sim.playing = true;
            sim.send(MediaEvent::PlayResolved);
        } else {
            sim.send(MediaEvent::PlayRejected(
                "no supported source loaded".to_string(),
            ));
        }
    }

    fn pause(&mut self) {
        self.lock().playing = false;
    }

    fn set_position(&mut self, seconds: f64) {
        let mut sim = self.lock();
        if let Some(duration) = sim.loaded.as_ref().and_then(|l| l.duration) {
            sim.position = seconds.clamp(0.0, duration);
        }
    }

    fn set_volume(&mut self, volume: f64) {
        self.lock().volume = volume.clamp(0.0, 1.0);
    }
}
