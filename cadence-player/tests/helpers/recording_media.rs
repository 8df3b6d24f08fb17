//! Media surface that records requests instead of producing audio

use cadence_player::playback::MediaSurface;

#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    Load(String),
    Play,
    Pause,
    SetPosition(f64),
    SetVolume(f64),
}

#[derive(Debug, Default)]
pub struct RecordingMedia {
    pub calls: Vec<MediaCall>,
}

impl RecordingMedia {
    pub fn last(&self) -> Option<&MediaCall> {
        self.calls.last()
    }

    pub fn count(&self, wanted: &MediaCall) -> usize {
        self.calls.iter().filter(|c| *c == wanted).count()
    }

    pub fn positions(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                MediaCall::SetPosition(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn loads(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                MediaCall::Load(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl MediaSurface for RecordingMedia {
    fn load_source(&mut self, source: &str) {
        self.calls.push(MediaCall::Load(source.to_string()));
    }

    fn request_play(&mut self) {
        self.calls.push(MediaCall::Play);
    }

    fn pause(&mut self) {
        self.calls.push(MediaCall::Pause);
    }

    fn set_position(&mut self, seconds: f64) {
        self.calls.push(MediaCall::SetPosition(seconds));
    }

    fn set_volume(&mut self, volume: f64) {
        self.calls.push(MediaCall::SetVolume(volume));
    }
}
