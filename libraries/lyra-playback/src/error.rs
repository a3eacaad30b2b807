//! Error types for playback orchestration

use lyra_core::TrackId;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Queue replacement rejected: empty input or out-of-range start index.
    /// The engine state is unchanged when this is returned.
    #[error("Invalid queue: {0}")]
    InvalidQueue(String),

    /// The audio resource failed to prepare a track. The engine is back in
    /// `Idle` with the failing track cleared; no automatic retry.
    #[error("Failed to load track {track_id}: {reason}")]
    LoadFailure {
        /// Track that failed to prepare
        track_id: TrackId,
        /// Backend-provided reason
        reason: String,
    },

    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Seek rejected by the audio resource
    #[error("Invalid seek position: {0:?}")]
    InvalidSeekPosition(std::time::Duration),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
