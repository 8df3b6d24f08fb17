//! Playlist player and the surfaces it drives

pub mod player;
pub mod playlist;
pub mod state;
pub mod surface;

pub use player::{PlayerSettings, PlaylistPlayer, ScheduledAdvance};
pub use playlist::{Playlist, Track};
pub use state::{PlayerSnapshot, PlayerState};
pub use surface::{MediaEvent, MediaSurface, PlayerView, TrackBounds};
