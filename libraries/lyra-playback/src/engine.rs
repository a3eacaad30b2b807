//! Playback engine - core orchestration
//!
//! Owns the single audio resource handle and drives every transition:
//! `Idle → Loading → Playing ⇄ Paused → Ended`, with `Ended` resolved
//! through the loop policy in the same operation that produced it.
//!
//! Resource loading is asynchronous: `play` hands the backend a tokened
//! `begin_load` and parks in `Loading` until the platform driver reports the
//! outcome. A newer `play`/`next`/`previous` bumps the generation counter, so
//! completions for superseded loads are discarded on arrival — that is the
//! whole cancellation model. Any track-change path also discards an active
//! scrub session: the newer intent wins.

use crate::{
    backend::{AudioBackend, LoadToken},
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    policy::{self, Outcome},
    queue::Queue,
    seek::SeekController,
    types::{Direction, LoopMode, PlaybackConfig, PlaybackState},
    volume::Volume,
};
use lyra_core::{Track, TrackId};
use std::time::Duration;
use tracing::{debug, warn};

/// Central playback orchestration
///
/// Exactly one engine exists per process; it is constructed once at
/// application start and exclusively owns the audio resource handle. All
/// operations are synchronous with respect to each other (the presentation
/// layer's scheduling loop); the only asynchronous boundaries are resource
/// loading and telemetry flush, both fire-and-forget.
pub struct PlaybackEngine {
    // Audio resource (never exposed outside the engine)
    backend: Box<dyn AudioBackend>,

    // State
    state: PlaybackState,
    current_track: Option<Track>,
    position: Duration,

    // Queue and traversal
    queue: Queue,
    loop_mode: LoopMode,

    // Seek arbitration
    seek: SeekController,

    // Output level
    volume: Volume,

    // Load cancellation: completions carrying a stale generation are dropped
    load_generation: u64,

    // Event buffer drained by the facade
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackEngine {
    /// Create a new engine owning `backend`
    pub fn new(backend: Box<dyn AudioBackend>, config: &PlaybackConfig) -> Self {
        let mut engine = Self {
            backend,
            state: PlaybackState::Idle,
            current_track: None,
            position: Duration::ZERO,
            queue: Queue::new(),
            loop_mode: config.loop_mode,
            seek: SeekController::new(),
            volume: Volume::new(config.volume),
            load_generation: 0,
            pending_events: Vec::new(),
        };
        let gain = engine.volume.gain();
        engine.backend.set_gain(gain);
        engine
    }

    // ===== Playback Control =====

    /// Start playing a track, optionally replacing the queue
    ///
    /// With a queue supplied, the queue is replaced and positioned at the
    /// requested track (`InvalidQueue` if the track is not in it, or the
    /// queue is empty — rejected synchronously, engine state unchanged).
    /// Without one, a track already in the queue is jumped to; an unknown
    /// track becomes a single-entry queue.
    pub fn play(&mut self, track: Track, queue: Option<Vec<Track>>) -> Result<()> {
        if let Some(tracks) = queue {
            let start = tracks
                .iter()
                .position(|t| t.id == track.id)
                .ok_or_else(|| {
                    PlaybackError::InvalidQueue(format!(
                        "track {} not in the supplied queue",
                        track.id
                    ))
                })?;
            self.queue.set_queue(tracks, start)?;
            self.emit(PlaybackEvent::QueueChanged {
                length: self.queue.len(),
            });
        } else if let Some(slot) = self.queue.index_of_track(&track.id) {
            self.queue.set_position(slot)?;
        } else {
            self.queue.set_queue(vec![track], 0)?;
            self.emit(PlaybackEvent::QueueChanged {
                length: self.queue.len(),
            });
        }

        self.load_current()
    }

    /// Pause playback
    ///
    /// Valid only from `Playing`; a silent no-op otherwise.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.backend.pause();
            self.state = PlaybackState::Paused;
            self.emit(PlaybackEvent::StateChanged {
                state: PlaybackState::Paused,
            });
        }
    }

    /// Resume playback
    ///
    /// Valid only from `Paused`; a silent no-op otherwise.
    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.backend.play();
            self.state = PlaybackState::Playing;
            self.emit(PlaybackEvent::StateChanged {
                state: PlaybackState::Playing,
            });
        }
    }

    /// Skip to the next track
    ///
    /// `data`, when it differs from the loaded queue, replaces it first.
    /// `use_shuffle` selects the shuffled or natural traversal order;
    /// `None` keeps whichever is active.
    pub fn next(&mut self, data: Option<Vec<Track>>, use_shuffle: Option<bool>) -> Result<()> {
        self.step(Direction::Forward, data, use_shuffle)
    }

    /// Go to the previous track
    pub fn previous(&mut self, data: Option<Vec<Track>>, use_shuffle: Option<bool>) -> Result<()> {
        self.step(Direction::Backward, data, use_shuffle)
    }

    /// Set the loop mode, optionally replacing/reshuffling the queue
    ///
    /// Never interrupts the sounding track.
    pub fn set_loop_mode(
        &mut self,
        mode: LoopMode,
        data: Option<Vec<Track>>,
        use_shuffle: Option<bool>,
    ) -> Result<()> {
        self.adopt_queue(data, use_shuffle)?;
        if self.loop_mode != mode {
            self.loop_mode = mode;
            self.emit(PlaybackEvent::LoopModeChanged { mode });
        }
        Ok(())
    }

    /// Enable or disable shuffle
    ///
    /// Traversal-only: the sounding track never changes.
    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.queue.is_shuffled() != enabled {
            self.queue.enable_shuffle(enabled);
            self.emit(PlaybackEvent::ShuffleChanged { enabled });
        }
    }

    /// Release the audio resource and return to `Idle`
    pub fn dispose(&mut self) {
        self.seek.cancel();
        self.backend.stop();
        self.load_generation += 1;
        self.current_track = None;
        self.position = Duration::ZERO;
        self.state = PlaybackState::Idle;
        self.emit(PlaybackEvent::StateChanged {
            state: PlaybackState::Idle,
        });
    }

    // ===== Load Boundary =====

    /// Platform driver callback: the tokened load is ready
    ///
    /// Stale tokens (superseded by a newer track intent) are discarded.
    pub fn on_load_ready(&mut self, token: LoadToken) {
        if token != LoadToken::new(self.load_generation) {
            debug!("discarding stale load completion");
            return;
        }
        if self.state != PlaybackState::Loading {
            return;
        }

        self.backend.play();
        self.state = PlaybackState::Playing;
        self.emit(PlaybackEvent::StateChanged {
            state: PlaybackState::Playing,
        });
    }

    /// Platform driver callback: the tokened load failed
    ///
    /// The engine returns to `Idle` with the failing track cleared; no
    /// automatic retry. `play` can always be retried by the caller.
    pub fn on_load_failed(&mut self, token: LoadToken, reason: &str) {
        if token != LoadToken::new(self.load_generation) {
            debug!("discarding stale load failure");
            return;
        }

        let track_id = self
            .current_track
            .take()
            .map(|t| t.id)
            .unwrap_or_else(|| TrackId::new("unknown"));
        warn!(%track_id, reason, "track failed to load");

        self.backend.stop();
        self.position = Duration::ZERO;
        self.state = PlaybackState::Idle;
        self.emit(PlaybackEvent::LoadFailed {
            track_id,
            message: reason.to_string(),
        });
        self.emit(PlaybackEvent::StateChanged {
            state: PlaybackState::Idle,
        });
    }

    // ===== Position and Natural End =====

    /// Periodic timer tick: poll the resource position
    ///
    /// Suppressed while a scrub session owns position authority and while
    /// the engine is not playing. Detects natural end-of-track and resolves
    /// it as an implicit forward advance.
    pub fn tick(&mut self) {
        if self.state != PlaybackState::Playing || self.seek.is_scrubbing() {
            return;
        }
        let Some(duration) = self.current_track.as_ref().map(|t| t.duration) else {
            return;
        };

        let reported = self.backend.position().min(duration);
        self.position = reported;
        self.emit(PlaybackEvent::PositionUpdate {
            position_ms: reported.as_millis() as u64,
            duration_ms: duration.as_millis() as u64,
        });

        if duration > Duration::ZERO && reported >= duration {
            self.finish_track();
        }
    }

    /// Natural end-of-track: implicit forward advance
    fn finish_track(&mut self) {
        if let Some(track) = &self.current_track {
            debug!(track_id = %track.id, "track finished");
            self.emit(PlaybackEvent::TrackFinished {
                track_id: track.id.clone(),
            });
        }
        self.state = PlaybackState::Ended;

        let outcome = policy::advance(
            Direction::Forward,
            self.queue.position(),
            self.queue.len(),
            self.loop_mode,
        );
        if let Err(error) = self.resolve(Direction::Forward, outcome) {
            warn!(%error, "failed to resolve track completion");
        }
    }

    // ===== Seek =====

    /// Start a scrub session from the last reported position
    ///
    /// Ignored while no track is loaded — there is no position authority to
    /// arbitrate yet.
    pub fn begin_seek(&mut self) {
        if self.current_track.is_some() {
            self.seek.begin(self.position);
        }
    }

    /// Record a drag update (clamped to `[0, duration]`)
    ///
    /// The audio resource is not touched until `end_seek`.
    pub fn handle_seek(&mut self, duration: Duration, value: Duration) {
        self.seek.update(duration, value);
    }

    /// End the scrub session, committing the last value with one resource seek
    pub fn end_seek(&mut self) -> Result<()> {
        let Some(target) = self.seek.commit() else {
            return Ok(());
        };

        self.backend.seek(target)?;
        self.position = target;
        if let Some(track) = &self.current_track {
            self.emit(PlaybackEvent::PositionUpdate {
                position_ms: target.as_millis() as u64,
                duration_ms: track.duration.as_millis() as u64,
            });
        }
        Ok(())
    }

    // ===== Volume =====

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.push_gain();
    }

    /// Mute audio
    pub fn mute(&mut self) {
        self.volume.mute();
        self.push_gain();
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.push_gain();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.push_gain();
    }

    fn push_gain(&mut self) {
        let gain = self.volume.gain();
        self.backend.set_gain(gain);
        self.emit(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    // ===== State Queries =====

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Currently active track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Reported position: the scrub target while a seek session is active,
    /// the engine position otherwise
    pub fn position(&self) -> Duration {
        self.seek.position_override().unwrap_or(self.position)
    }

    /// Queue contents in the active traversal order
    pub fn playlist(&self) -> Vec<&Track> {
        self.queue.active_tracks()
    }

    /// Current loop mode
    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    /// Whether shuffle is enabled
    pub fn is_shuffled(&self) -> bool {
        self.queue.is_shuffled()
    }

    /// Volume level (0-100)
    pub fn volume_level(&self) -> u8 {
        self.volume.level()
    }

    /// Whether audio is muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Drain buffered events (called by the facade)
    pub fn take_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internals =====

    /// Replace the queue when `data` differs from the loaded one, then align
    /// the traversal order with `use_shuffle`
    fn adopt_queue(
        &mut self,
        data: Option<Vec<Track>>,
        use_shuffle: Option<bool>,
    ) -> Result<()> {
        if let Some(tracks) = data {
            if !self.queue.same_tracks(&tracks) {
                // Keep the sounding track's slot when it survives the swap
                let start = self
                    .current_track
                    .as_ref()
                    .and_then(|current| tracks.iter().position(|t| t.id == current.id))
                    .unwrap_or(0);
                self.queue.set_queue(tracks, start)?;
                self.emit(PlaybackEvent::QueueChanged {
                    length: self.queue.len(),
                });
            }
        }

        if let Some(enabled) = use_shuffle {
            self.set_shuffle(enabled);
        }
        Ok(())
    }

    /// Shared body of `next`/`previous`
    fn step(
        &mut self,
        direction: Direction,
        data: Option<Vec<Track>>,
        use_shuffle: Option<bool>,
    ) -> Result<()> {
        self.adopt_queue(data, use_shuffle)?;

        let outcome = policy::advance(
            direction,
            self.queue.position(),
            self.queue.len(),
            self.loop_mode,
        );
        self.resolve(direction, outcome)
    }

    /// Apply a loop-policy outcome
    fn resolve(&mut self, direction: Direction, outcome: Outcome) -> Result<()> {
        match outcome {
            Outcome::Index(slot) => {
                self.queue.set_position(slot)?;
                self.load_current()
            }
            Outcome::WrapAll => {
                let slot = policy::wrap_target(direction, self.queue.len());
                self.queue.set_position(slot)?;
                self.load_current()
            }
            Outcome::RepeatSame => self.restart_current(),
            Outcome::StopAtBoundary => match direction {
                // Forward boundary: halt with the current track retained,
                // playing flag false, position held at track end
                Direction::Forward => {
                    self.halt_at_end();
                    Ok(())
                }
                // Backward boundary: restart the current track from zero
                Direction::Backward => self.restart_current(),
            },
        }
    }

    /// Begin loading the queue's current track
    fn load_current(&mut self) -> Result<()> {
        let track = self
            .queue
            .current_track()
            .cloned()
            .ok_or(PlaybackError::NoTrackLoaded)?;

        // A newer track intent discards any scrub session and any in-flight load
        self.seek.cancel();
        self.load_generation += 1;
        let token = LoadToken::new(self.load_generation);

        let previous_track_id = self.current_track.take().map(|t| t.id);
        debug!(track_id = %track.id, "loading track");

        self.position = Duration::ZERO;
        self.state = PlaybackState::Loading;
        self.backend.begin_load(token, &track);

        self.emit(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
            duration_ms: track.duration.as_millis() as u64,
        });
        self.emit(PlaybackEvent::StateChanged {
            state: PlaybackState::Loading,
        });
        self.current_track = Some(track);
        Ok(())
    }

    /// Replay the current track from position zero (repeat-one, backward
    /// boundary). A fresh play attempt: consumers see a same-id track change.
    fn restart_current(&mut self) -> Result<()> {
        let Some(track) = self.current_track.clone() else {
            return Ok(());
        };

        self.seek.cancel();
        self.backend.seek(Duration::ZERO)?;
        self.position = Duration::ZERO;

        if self.state != PlaybackState::Playing {
            self.backend.play();
            self.state = PlaybackState::Playing;
        }

        self.emit(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id: Some(track.id.clone()),
            duration_ms: track.duration.as_millis() as u64,
        });
        self.emit(PlaybackEvent::StateChanged {
            state: PlaybackState::Playing,
        });
        Ok(())
    }

    /// Forward boundary without looping: playback halts, the current track
    /// is retained, and the reported position holds at the track end
    fn halt_at_end(&mut self) {
        self.seek.cancel();
        self.backend.pause();
        if let Some(track) = &self.current_track {
            self.position = track.duration;
        }
        self.state = PlaybackState::Paused;
        self.emit(PlaybackEvent::StateChanged {
            state: PlaybackState::Paused,
        });
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }
}
