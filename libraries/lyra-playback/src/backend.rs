//! Platform-agnostic audio resource handle
//!
//! Abstracts the platform player (AVPlayer, ExoPlayer, a desktop sink) behind
//! a control surface the engine drives. The handle is a singleton exclusively
//! owned by the engine; nothing else reads or mutates its position or playing
//! flag directly.

use crate::error::Result;
use lyra_core::Track;
use std::time::Duration;

/// Identifies one load request across the asynchronous prepare boundary
///
/// `begin_load` is fire-and-forget; the platform echoes the token back
/// through `Player::on_load_ready` / `on_load_failed`. The engine discards
/// completions whose token is stale, which is how superseded loads are
/// cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadToken(u64);

impl LoadToken {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }
}

/// Platform audio resource
///
/// Implementors wrap the platform player. All calls are made from the
/// engine's scheduling loop; implementations must return promptly and push
/// slow work (resource preparation) behind the `begin_load` token handshake.
pub trait AudioBackend: Send {
    /// Start preparing a track's audio resource
    ///
    /// Must not block. Completion is reported by the platform driver calling
    /// `Player::on_load_ready(token)` or `Player::on_load_failed(token, ..)`.
    /// A new `begin_load` implicitly supersedes any prepare still in flight;
    /// the stale resource is discarded on the backend side.
    fn begin_load(&mut self, token: LoadToken, track: &Track);

    /// Start or resume audio output
    fn play(&mut self);

    /// Pause audio output, keeping the resource loaded
    fn pause(&mut self);

    /// Release the current resource
    fn stop(&mut self);

    /// Move the playback position
    ///
    /// # Errors
    /// Returns an error if the resource rejects the position
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Apply an output gain multiplier (0.0 = silence, 1.0 = unity)
    fn set_gain(&mut self, gain: f32);
}

/// Call log shared between a scripted test backend and the test body
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FakeBackendState {
    /// Tokens passed to `begin_load`, in order
    pub loads: Vec<(LoadToken, lyra_core::TrackId)>,
    /// Positions passed to `seek`, in order
    pub seeks: Vec<Duration>,
    /// Current simulated position
    pub position: Duration,
    /// Whether the platform player is outputting audio
    pub playing: bool,
    /// Last gain applied
    pub gain: f32,
}

#[cfg(test)]
impl FakeBackendState {
    /// Token of the most recent load request
    pub fn last_token(&self) -> LoadToken {
        self.loads.last().expect("no load requested").0
    }
}

/// Scripted backend for unit tests
///
/// Records the calls the engine makes; the test keeps a clone of the shared
/// state to observe them and to drive the simulated position.
#[cfg(test)]
pub(crate) struct FakeBackend {
    state: std::sync::Arc<std::sync::Mutex<FakeBackendState>>,
}

#[cfg(test)]
impl FakeBackend {
    pub fn new() -> (Self, std::sync::Arc<std::sync::Mutex<FakeBackendState>>) {
        let state = std::sync::Arc::new(std::sync::Mutex::new(FakeBackendState {
            gain: 1.0,
            ..FakeBackendState::default()
        }));
        (
            Self {
                state: state.clone(),
            },
            state,
        )
    }
}

#[cfg(test)]
impl AudioBackend for FakeBackend {
    fn begin_load(&mut self, token: LoadToken, track: &Track) {
        let mut state = self.state.lock().unwrap();
        state.loads.push((token, track.id.clone()));
        state.position = Duration::ZERO;
    }

    fn play(&mut self) {
        self.state.lock().unwrap().playing = true;
    }

    fn pause(&mut self) {
        self.state.lock().unwrap().playing = false;
    }

    fn stop(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.playing = false;
        state.position = Duration::ZERO;
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.seeks.push(position);
        state.position = position;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.state.lock().unwrap().position
    }

    fn set_gain(&mut self, gain: f32) {
        self.state.lock().unwrap().gain = gain;
    }
}
