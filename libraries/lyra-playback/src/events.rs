//! Playback events and the observer bus
//!
//! The engine buffers events as it transitions; the facade drains the buffer
//! after every operation, feeding the listening tracker first and then the
//! subscribers. Subscriptions are explicit and removable, so teardown is
//! deterministic.

use crate::types::{LoopMode, PlaybackState};
use lyra_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed (loading, playing, paused, idle)
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A track took the "current" slot (including a repeat-one restart,
    /// where both ids are the same)
    TrackChanged {
        /// ID of the new current track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
        /// Duration of the new track in milliseconds
        duration_ms: u64,
    },

    /// Track finished playing naturally (position reached duration)
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Position update (periodic timer tick, suppressed while scrubbing)
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total track duration
        duration_ms: u64,
    },

    /// Queue replaced
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Shuffle toggled
    ShuffleChanged {
        /// Whether shuffle is now enabled
        enabled: bool,
    },

    /// Loop mode changed
    LoopModeChanged {
        /// The new loop mode
        mode: LoopMode,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// The audio resource failed to prepare a track
    LoadFailed {
        /// Track that failed
        track_id: TrackId,
        /// Backend-provided reason
        message: String,
    },
}

/// Handle for removing a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&PlaybackEvent) + Send>;

/// Observer registry for playback events
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_id: u64,
}

impl EventBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register an observer; the returned id removes it again
    pub fn subscribe(&mut self, callback: impl FnMut(&PlaybackEvent) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove an observer
    ///
    /// Returns false when the id was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Deliver an event to every observer, in subscription order
    pub fn dispatch(&mut self, event: &PlaybackEvent) {
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }

    /// Number of registered observers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
