/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A playable audio track
///
/// Contains all metadata needed for playback and display. Loaded eagerly
/// from the catalog so the playback core never does I/O of its own.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier from the catalog
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name (optional)
    pub album: Option<String>,

    /// Track duration
    pub duration: Duration,

    /// Resolvable audio source for the platform player
    pub stream_url: String,
}

impl Track {
    /// Create a new track
    pub fn new(
        id: TrackId,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration: Duration,
        stream_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            album: None,
            duration,
            stream_url: stream_url.into(),
        }
    }

    /// Set the album name
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_creation() {
        let track = Track::new(
            TrackId::new("t-1"),
            "Glasshouse",
            "The Lumen Field",
            Duration::from_secs(200),
            "https://cdn.lyra.fm/audio/t-1.m4a",
        )
        .with_album("Weather Systems");

        assert_eq!(track.id.as_str(), "t-1");
        assert_eq!(track.title, "Glasshouse");
        assert_eq!(track.album.as_deref(), Some("Weather Systems"));
        assert_eq!(track.duration, Duration::from_secs(200));
    }
}
