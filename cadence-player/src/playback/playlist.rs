//! Playlist model
//!
//! A fixed, ordered, non-empty list of tracks. Index arithmetic for skipping
//! wraps in both directions.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One playable audio item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Display title
    pub title: String,
    /// Display artist line
    pub artist: String,
    /// Locator handed to the media surface (path or URL)
    pub source: String,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            source: source.into(),
        }
    }
}

/// Ordered playlist, fixed at construction
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create a playlist; at least one track is required
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(Error::EmptyPlaylist);
        }
        Ok(Self { tracks })
    }

    /// Number of tracks (always >= 1)
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Get track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Check that an index addresses a track
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.tracks.len()
    }

    /// Whether `index` is the final track
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.tracks.len()
    }

    /// Index after `index`, wrapping to the first track
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tracks.len()
    }

    /// Index before `index`, wrapping to the last track
    pub fn previous_index(&self, index: usize) -> usize {
        let len = self.tracks.len();
        (index % len + len - 1) % len
    }
}

impl std::ops::Index<usize> for Playlist {
    type Output = Track;

    fn index(&self, index: usize) -> &Track {
        &self.tracks[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(n: usize) -> Playlist {
        Playlist::new(
            (0..n)
                .map(|i| Track::new(format!("Song {i}"), "Artist", format!("song{i}.mp3")))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_playlist_rejected() {
        assert!(matches!(Playlist::new(Vec::new()), Err(Error::EmptyPlaylist)));
    }

    #[test]
    fn test_next_wraps_past_last() {
        let list = playlist(4);
        assert_eq!(list.next_index(0), 1);
        assert_eq!(list.next_index(3), 0);
    }

    #[test]
    fn test_previous_wraps_past_first() {
        let list = playlist(4);
        assert_eq!(list.previous_index(0), 3);
        assert_eq!(list.previous_index(2), 1);
    }

    #[test]
    fn test_next_n_times_is_cyclic() {
        for n in 1..6 {
            let list = playlist(n);
            for start in 0..n {
                let mut index = start;
                for _ in 0..n {
                    index = list.next_index(index);
                }
                assert_eq!(index, start, "playlist of {n}, start {start}");
            }
        }
    }

    #[test]
    fn test_previous_inverts_next() {
        for n in 1..6 {
            let list = playlist(n);
            for i in 0..n {
                assert_eq!(list.next_index(list.previous_index(i)), i);
                assert_eq!(list.previous_index(list.next_index(i)), i);
            }
        }
    }

    #[test]
    fn test_single_track_playlist() {
        let list = playlist(1);
        assert_eq!(list.next_index(0), 0);
        assert_eq!(list.previous_index(0), 0);
        assert!(list.is_last(0));
    }

    #[test]
    fn test_bounds() {
        let list = playlist(3);
        assert!(list.contains_index(2));
        assert!(!list.contains_index(3));
        assert!(list.get(3).is_none());
        assert!(list.is_last(2));
        assert!(!list.is_last(1));
    }
}
