//! Log-backed display surface
//!
//! Keeps the latest value pushed to every display element and traces the
//! changes. The progress track is a virtual bar from `left` to `left + width`
//! (0..100 by default, so pointer X reads as a percentage).

use crate::playback::surface::{PlaylistView, ProgressView, TrackBounds, TrackInfoView, VolumeView};
use cadence_common::events::Affordance;
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ConsoleView {
    progress: f64,
    elapsed_label: String,
    total_label: String,
    bounds: TrackBounds,
    title: String,
    artist: String,
    affordance: Affordance,
    highlighted: Vec<bool>,
    row_durations: Vec<Option<String>>,
    source_overrides: HashMap<usize, String>,
    volume_label: String,
}

impl ConsoleView {
    /// View with `rows` playlist rows and a 0..100 progress track
    pub fn new(rows: usize) -> Self {
        Self {
            progress: 0.0,
            elapsed_label: "0:00".to_string(),
            total_label: "0:00".to_string(),
            bounds: TrackBounds::new(0.0, 100.0),
            title: String::new(),
            artist: String::new(),
            affordance: Affordance::Play,
            highlighted: vec![false; rows],
            row_durations: vec![None; rows],
            source_overrides: HashMap::new(),
            volume_label: String::new(),
        }
    }

    pub fn with_bounds(mut self, bounds: TrackBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Attach an alternate source locator to a row
    pub fn with_source_override(mut self, row: usize, source: impl Into<String>) -> Self {
        self.source_overrides.insert(row, source.into());
        self
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn elapsed_label(&self) -> &str {
        &self.elapsed_label
    }

    pub fn total_label(&self) -> &str {
        &self.total_label
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn affordance(&self) -> Affordance {
        self.affordance
    }

    /// First highlighted row; the player keeps at most one
    pub fn highlighted_row(&self) -> Option<usize> {
        self.highlighted.iter().position(|on| *on)
    }

    pub fn row_duration(&self, row: usize) -> Option<&str> {
        self.row_durations.get(row).and_then(|d| d.as_deref())
    }

    pub fn volume_label(&self) -> &str {
        &self.volume_label
    }
}

impl ProgressView for ConsoleView {
    fn set_progress(&mut self, fraction: f64) {
        self.progress = fraction;
    }

    fn set_elapsed_label(&mut self, label: &str) {
        if self.elapsed_label != label {
            debug!("{} / {}", label, self.total_label);
            self.elapsed_label = label.to_string();
        }
    }

    fn set_total_label(&mut self, label: &str) {
        self.total_label = label.to_string();
    }

    fn track_bounds(&self) -> TrackBounds {
        self.bounds
    }
}

impl PlaylistView for ConsoleView {
    fn set_row_highlight(&mut self, index: usize, now_playing: bool) {
        if let Some(slot) = self.highlighted.get_mut(index) {
            *slot = now_playing;
        }
    }

    fn set_row_duration(&mut self, index: usize, label: &str) {
        if let Some(slot) = self.row_durations.get_mut(index) {
            *slot = Some(label.to_string());
        }
    }

    fn source_override(&self, index: usize) -> Option<String> {
        self.source_overrides.get(&index).cloned()
    }
}

impl TrackInfoView for ConsoleView {
    fn set_track_info(&mut self, title: &str, artist: &str) {
        info!("Now showing: {} - {}", title, artist);
        self.title = title.to_string();
        self.artist = artist.to_string();
    }

    fn set_affordance(&mut self, affordance: Affordance) {
        self.affordance = affordance;
    }
}

impl VolumeView for ConsoleView {
    fn set_volume_label(&mut self, label: &str) {
        debug!("Volume {}", label);
        self.volume_label = label.to_string();
    }
}
