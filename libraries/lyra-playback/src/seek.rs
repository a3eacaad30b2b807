//! Seek controller
//!
//! Arbitrates between engine-reported position and user scrubbing. While a
//! scrub session is active it owns position authority: engine ticks are
//! suppressed and drag updates only move a cached target, so the decoder is
//! asked to seek exactly once, on release.

use std::time::Duration;

/// Seek controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrubState {
    Idle,
    Scrubbing,
}

/// Arbiter for user-driven seeking
#[derive(Debug, Clone)]
pub struct SeekController {
    state: ScrubState,

    /// Pending target position; meaningful only while scrubbing
    target: Duration,
}

impl SeekController {
    /// Create a new controller in the idle state
    pub fn new() -> Self {
        Self {
            state: ScrubState::Idle,
            target: Duration::ZERO,
        }
    }

    /// Start a scrub session
    ///
    /// `baseline` is the last engine-reported position; it seeds the target
    /// so position reads stay continuous until the first drag update.
    /// Starting while already scrubbing keeps the existing session.
    pub fn begin(&mut self, baseline: Duration) {
        if self.state == ScrubState::Idle {
            self.state = ScrubState::Scrubbing;
            self.target = baseline;
        }
    }

    /// Record a drag update
    ///
    /// Clamps `value` to `[0, duration]` and moves the cached target only.
    /// No-op when idle.
    pub fn update(&mut self, duration: Duration, value: Duration) {
        if self.state == ScrubState::Scrubbing {
            self.target = value.min(duration);
        }
    }

    /// End the scrub session
    ///
    /// Returns the single position to commit to the audio resource, or
    /// `None` when no session was active.
    pub fn commit(&mut self) -> Option<Duration> {
        if self.state == ScrubState::Scrubbing {
            self.state = ScrubState::Idle;
            Some(self.target)
        } else {
            None
        }
    }

    /// Discard the scrub session unconditionally
    ///
    /// Used when a track change arrives mid-scrub: the newer intent wins and
    /// nothing is committed. Silent — this is not an error.
    pub fn cancel(&mut self) {
        self.state = ScrubState::Idle;
    }

    /// Whether a scrub session is active
    pub fn is_scrubbing(&self) -> bool {
        self.state == ScrubState::Scrubbing
    }

    /// Position to report while the controller owns authority
    pub fn position_override(&self) -> Option<Duration> {
        if self.state == ScrubState::Scrubbing {
            Some(self.target)
        } else {
            None
        }
    }
}

impl Default for SeekController {
    fn default() -> Self {
        Self::new()
    }
}
