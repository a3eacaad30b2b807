//! Listening session tracking
//!
//! Accumulates per-track engagement (listened time, play/skip classification)
//! from the engine's event stream and flushes closed sessions to the
//! telemetry sink. Telemetry is analytics, not authoritative state: a sink
//! failure is logged and the session is dropped, never retried, and nothing
//! here ever touches playback state.

use crate::events::PlaybackEvent;
use crate::types::{PlaybackConfig, PlaybackState};
use lyra_core::{ListeningReport, TelemetrySink, TrackId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Position jumps above this ceiling come from seeks, not listening.
/// Real ticks arrive well under a second apart.
const PLAUSIBLE_TICK_CEILING: Duration = Duration::from_secs(2);

/// Engagement accumulator for one occupancy of the "current" slot
#[derive(Debug, Clone)]
struct ListeningSession {
    track_id: TrackId,
    duration: Duration,
    listened: Duration,
    natural_end: bool,
    last_position: Option<Duration>,
}

impl ListeningSession {
    fn open(track_id: TrackId, duration: Duration) -> Self {
        Self {
            track_id,
            duration,
            listened: Duration::ZERO,
            natural_end: false,
            last_position: None,
        }
    }

    /// Fold one position report into the listened total
    ///
    /// Only forward movement within a plausible tick interval counts;
    /// anything larger is a seek jump, anything backward just moves the
    /// baseline. Crossing the same stretch twice counts twice — that is
    /// real listening.
    fn observe_position(&mut self, position: Duration) {
        if let Some(last) = self.last_position {
            let delta = position.saturating_sub(last);
            if delta > Duration::ZERO && delta <= PLAUSIBLE_TICK_CEILING {
                self.listened += delta;
            }
        }
        self.last_position = Some(position);
    }

    /// Classify and convert into the report handed to the sink
    fn into_report(self, completion_ratio: f64) -> ListeningReport {
        let threshold = self.duration.as_secs_f64() * completion_ratio;
        let completed = self.natural_end
            || (self.duration > Duration::ZERO && self.listened.as_secs_f64() >= threshold);

        ListeningReport {
            track_id: self.track_id,
            listened: self.listened,
            skip_count: u32::from(!completed),
            play_count: u32::from(completed),
        }
    }
}

/// Observes engine transitions and owns the open listening session
///
/// Exactly one session is open at a time, for the current track. It closes
/// (flush + discard) on track change, on engine teardown, on a background
/// transition, or on a manual flush.
pub struct SessionTracker {
    current: Option<ListeningSession>,
    sink: Arc<dyn TelemetrySink>,
    completion_ratio: f64,
    min_session: Duration,
}

impl SessionTracker {
    /// Create a tracker flushing into `sink`
    pub fn new(sink: Arc<dyn TelemetrySink>, config: &PlaybackConfig) -> Self {
        Self {
            current: None,
            sink,
            completion_ratio: config.completion_ratio,
            min_session: config.min_session,
        }
    }

    /// Fold one engine event into the open session
    pub fn handle_event(&mut self, event: &PlaybackEvent) {
        match event {
            PlaybackEvent::TrackChanged {
                track_id,
                duration_ms,
                ..
            } => {
                // A same-id change (repeat restart) is a fresh play attempt
                self.close_current();
                self.current = Some(ListeningSession::open(
                    track_id.clone(),
                    Duration::from_millis(*duration_ms),
                ));
            }
            PlaybackEvent::PositionUpdate {
                position_ms,
                duration_ms,
            } => {
                if let Some(session) = &mut self.current {
                    if session.duration.is_zero() {
                        session.duration = Duration::from_millis(*duration_ms);
                    }
                    session.observe_position(Duration::from_millis(*position_ms));
                }
            }
            PlaybackEvent::TrackFinished { track_id } => {
                if let Some(session) = &mut self.current {
                    if session.track_id == *track_id {
                        session.natural_end = true;
                    }
                }
            }
            PlaybackEvent::StateChanged {
                state: PlaybackState::Idle,
            } => {
                // Engine teardown or load failure: the session ends here
                self.close_current();
            }
            _ => {}
        }
    }

    /// Flush the open session now (background transition, manual trigger)
    ///
    /// The accumulator restarts at zero for the same track, so listening
    /// after the app returns to the foreground lands in a fresh session.
    pub fn flush(&mut self) {
        let reopen = self
            .current
            .as_ref()
            .map(|s| (s.track_id.clone(), s.duration));
        self.close_current();
        if let Some((track_id, duration)) = reopen {
            self.current = Some(ListeningSession::open(track_id, duration));
        }
    }

    /// Listened time accumulated in the open session
    pub fn listening_time(&self) -> Duration {
        self.current
            .as_ref()
            .map_or(Duration::ZERO, |s| s.listened)
    }

    /// Close and flush the open session, if it is worth reporting
    fn close_current(&mut self) {
        let Some(session) = self.current.take() else {
            return;
        };

        if session.listened < self.min_session {
            debug!(track_id = %session.track_id, "discarding sub-threshold session");
            return;
        }

        let report = session.into_report(self.completion_ratio);
        if let Err(error) = self.sink.upsert_listening(report) {
            // Analytics only: log and drop, never retry, never surface
            warn!(%error, "telemetry flush failed; dropping session");
        }
    }
}

impl Drop for SessionTracker {
    fn drop(&mut self) {
        self.close_current();
    }
}
