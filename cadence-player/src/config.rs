//! Configuration for cadence-player
//!
//! A single TOML file, resolved in priority order:
//! 1. `--config` command-line argument
//! 2. `CADENCE_CONFIG` environment variable
//! 3. `<user config dir>/cadence/config.toml`, if present
//! 4. Built-in defaults (the four-song greeting playlist)
//!
//! Command-line overrides (`--volume`, `--log-level`, ...) are applied on top
//! by the binary after loading.

use crate::error::{Error, Result};
use crate::host::simulated::Catalog;
use crate::playback::player::PlayerSettings;
use crate::playback::playlist::{Playlist, Track};
use cadence_common::config::load_toml;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Player configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Starting volume, 0-100
    #[serde(default = "default_initial_volume")]
    pub initial_volume: u8,

    /// Wait before skipping past a track that failed to play
    #[serde(default = "default_error_advance_delay_ms")]
    pub error_advance_delay_ms: u64,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Playlist, in play order
    #[serde(default = "default_tracks")]
    pub tracks: Vec<TrackConfig>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// One `[[tracks]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackConfig {
    pub title: String,
    pub artist: String,
    pub source: String,

    /// Length the simulated media surface plays this source for.
    /// Tracks without it fail to load in the simulator.
    #[serde(default)]
    pub duration_secs: Option<f64>,
}

fn default_initial_volume() -> u8 {
    75
}

fn default_error_advance_delay_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tracks() -> Vec<TrackConfig> {
    let track = |title: &str, artist: &str, source: &str, duration_secs: f64| TrackConfig {
        title: title.to_string(),
        artist: artist.to_string(),
        source: source.to_string(),
        duration_secs: Some(duration_secs),
    };
    vec![
        track(
            "Happiest Birthday Shreya",
            "Special Birthday Song",
            "images/Happiest_Birthday_Shreya.mp3",
            184.0,
        ),
        track(
            "Happy Birthday Dost",
            "For My Best Friend",
            "images/Shreya_Happy_BirthdayDost.mp3",
            142.0,
        ),
        track(
            "My Greatest Gift",
            "A Special Message",
            "images/Shreya_My_Greatest_Gift.mp3",
            205.0,
        ),
        track(
            "Sunshine Shreya",
            "Bright & Beautiful",
            "images/SunshineShreya.mp3",
            167.0,
        ),
    ]
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_volume: default_initial_volume(),
            error_advance_delay_ms: default_error_advance_delay_ms(),
            logging: LoggingConfig::default(),
            tracks: default_tracks(),
        }
    }
}

impl PlayerConfig {
    /// Load `path`, or the built-in defaults when no file was resolved.
    ///
    /// Callers resolve the path with
    /// [`resolve_config_path`](cadence_common::config::resolve_config_path)
    /// so they can report the source once logging is up.
    pub fn from_path(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => load_toml::<PlayerConfig>(path)?,
            None => PlayerConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.initial_volume > 100 {
            return Err(Error::Config(format!(
                "initial_volume must be 0-100, got {}",
                self.initial_volume
            )));
        }
        if self.tracks.is_empty() {
            return Err(Error::Config("at least one [[tracks]] entry is required".to_string()));
        }
        for (i, track) in self.tracks.iter().enumerate() {
            if track.source.trim().is_empty() {
                return Err(Error::Config(format!("track {} has an empty source", i + 1)));
            }
            if let Some(duration) = track.duration_secs {
                if !duration.is_finite() || duration <= 0.0 {
                    return Err(Error::Config(format!(
                        "track {} has invalid duration_secs {}",
                        i + 1,
                        duration
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn playlist(&self) -> Result<Playlist> {
        Playlist::new(
            self.tracks
                .iter()
                .map(|t| Track::new(&t.title, &t.artist, &t.source))
                .collect(),
        )
    }

    pub fn settings(&self) -> PlayerSettings {
        PlayerSettings {
            initial_volume: self.initial_volume.min(100),
            error_advance_delay: Duration::from_millis(self.error_advance_delay_ms),
        }
    }

    /// Sources the simulated media surface can play
    pub fn media_catalog(&self) -> Catalog {
        self.tracks
            .iter()
            .filter_map(|t| t.duration_secs.map(|d| (t.source.clone(), d)))
            .collect()
    }
}
