//! Core types for playback orchestration

use lyra_core::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback state
///
/// `Ended` is transient: the engine resolves it through the loop policy in
/// the same operation that produced it, so consumers normally observe the
/// follow-up `Loading`/`Paused`/`Idle` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// No track loaded
    Idle,

    /// Resource being prepared
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track (or halted at a queue boundary)
    Paused,

    /// Track ran to its natural end
    Ended,
}

impl PlaybackState {
    /// True only while audio is actually sounding
    pub fn is_playing(self) -> bool {
        self == PlaybackState::Playing
    }
}

/// Loop mode
///
/// Governs behavior at queue boundaries and on natural track completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Stop when the queue ends
    Off,

    /// Loop the current track only
    One,

    /// Loop the entire queue
    All,
}

/// Traversal direction for queue advancement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the end of the queue (`next`, natural completion)
    Forward,

    /// Towards the start of the queue (`previous`)
    Backward,
}

/// Configuration for the playback core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Fraction of a track's duration that must be listened for the session
    /// to count as a completed play (default: 0.5)
    pub completion_ratio: f64,

    /// Sessions shorter than this are discarded without flushing (default: 1s)
    pub min_session: Duration,

    /// Initial volume (0-100, default: 80)
    pub volume: u8,

    /// Initial loop mode (default: Off)
    pub loop_mode: LoopMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            completion_ratio: 0.5,
            min_session: Duration::from_secs(1),
            volume: 80,
            loop_mode: LoopMode::Off,
        }
    }
}

/// Read-only snapshot of derived playback state
///
/// Everything the presentation layer renders, serializable for the bridge.
/// The audio resource itself is never part of the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Currently active track, if any
    pub active_song: Option<Track>,

    /// Whether audio is sounding right now
    pub is_playing: bool,

    /// Whether a track is being prepared
    pub is_song_loading: bool,

    /// Reported position (scrub target while a seek session is active)
    pub position: Duration,

    /// Queue contents in the active traversal order
    pub playlist: Vec<Track>,

    /// Current loop mode
    pub loop_mode: LoopMode,

    /// Whether shuffle is enabled
    pub shuffled: bool,

    /// Listened time accumulated for the open session
    pub listening_time: Duration,

    /// Volume level (0-100)
    pub volume: u8,

    /// Whether audio is muted
    pub muted: bool,
}
