//! Contracts with the external surfaces the player drives
//!
//! The player never renders or decodes anything itself. It sends requests to
//! a [`MediaSurface`] and pushes display updates into a [`PlayerView`]. The
//! media surface answers asynchronously with [`MediaEvent`]s, which the host
//! feeds back through `PlaylistPlayer::handle_media_event`.

use cadence_common::events::Affordance;

/// Media playback surface (decoder + output)
pub trait MediaSurface {
    /// Replace the current source; stops any playback of the previous one
    fn load_source(&mut self, source: &str);

    /// Ask for playback to start; answered by `PlayResolved` or `PlayRejected`
    fn request_play(&mut self);

    /// Stop producing audio (takes effect immediately)
    fn pause(&mut self);

    /// Move the playback position, in seconds
    fn set_position(&mut self, seconds: f64);

    /// Output gain in [0.0, 1.0]
    fn set_volume(&mut self, volume: f64);
}

/// Asynchronous notifications from the media surface
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// The last play request succeeded
    PlayResolved,
    /// The last play request was refused (autoplay policy, decode failure...)
    PlayRejected(String),
    /// Total duration of the loaded source is known
    MetadataLoaded { duration: f64 },
    /// Periodic position report during playback
    PositionUpdate { current_time: f64, duration: f64 },
    /// Source played through to its end
    Ended,
    /// Source cannot produce audio
    Error(String),
}

/// Horizontal extent of the progress track, in pointer coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackBounds {
    pub left: f64,
    pub width: f64,
}

impl TrackBounds {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Map a pointer X coordinate to a fraction of the track, clamped to [0, 1].
    ///
    /// Returns `None` for a collapsed (zero or negative width) track or a
    /// non-finite coordinate.
    pub fn fraction_at(&self, pointer_x: f64) -> Option<f64> {
        if self.width <= 0.0 || !self.width.is_finite() || !pointer_x.is_finite() {
            return None;
        }
        Some(((pointer_x - self.left) / self.width).clamp(0.0, 1.0))
    }
}

/// Progress bar, handle and the two time labels
pub trait ProgressView {
    /// Fill and handle position, fraction in [0, 1]
    fn set_progress(&mut self, fraction: f64);
    fn set_elapsed_label(&mut self, label: &str);
    fn set_total_label(&mut self, label: &str);
    /// Current bounds of the progress track for pointer mapping
    fn track_bounds(&self) -> TrackBounds;
}

/// Playlist rows
pub trait PlaylistView {
    fn set_row_highlight(&mut self, index: usize, now_playing: bool);
    fn set_row_duration(&mut self, index: usize, label: &str);

    /// Alternate source locator attached to a row, preferred over the
    /// track's own source when present.
    fn source_override(&self, _index: usize) -> Option<String> {
        None
    }
}

/// Now-playing title/artist and the play/pause button
pub trait TrackInfoView {
    fn set_track_info(&mut self, title: &str, artist: &str);
    fn set_affordance(&mut self, affordance: Affordance);
}

/// Volume readout
pub trait VolumeView {
    fn set_volume_label(&mut self, label: &str);
}

/// Every display surface the player updates
pub trait PlayerView: ProgressView + PlaylistView + TrackInfoView + VolumeView {}

impl<T> PlayerView for T where T: ProgressView + PlaylistView + TrackInfoView + VolumeView {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_at_maps_relative_to_left_edge() {
        let bounds = TrackBounds::new(100.0, 200.0);
        assert_eq!(bounds.fraction_at(100.0), Some(0.0));
        assert_eq!(bounds.fraction_at(200.0), Some(0.5));
        assert_eq!(bounds.fraction_at(300.0), Some(1.0));
    }

    #[test]
    fn test_fraction_at_clamps_outside_track() {
        let bounds = TrackBounds::new(100.0, 200.0);
        assert_eq!(bounds.fraction_at(50.0), Some(0.0));
        assert_eq!(bounds.fraction_at(1000.0), Some(1.0));
    }

    #[test]
    fn test_fraction_at_collapsed_track() {
        assert_eq!(TrackBounds::new(0.0, 0.0).fraction_at(10.0), None);
        assert_eq!(TrackBounds::new(0.0, -5.0).fraction_at(10.0), None);
        assert_eq!(TrackBounds::new(0.0, 100.0).fraction_at(f64::NAN), None);
    }
}
