//! Lyra - Playback Orchestration
//!
//! Platform-agnostic playback orchestration for Lyra.
//!
//! This crate provides:
//! - Single-owner playback engine (play/pause/resume/next/previous/seek)
//! - Play queue with an exact-restore shuffle permutation
//! - Loop modes (Off, All, One) as pure boundary arithmetic
//! - Scrub-session seek arbitration (one resource seek per drag)
//! - Listening-session telemetry (elapsed time, play/skip classification)
//! - Event bus for UI synchronization
//! - Volume control (logarithmic, 0-100%, mute/unmute)
//!
//! # Architecture
//!
//! `lyra-playback` is completely platform-agnostic: no dependency on any
//! platform player or on the storage layer. The platform provides the audio
//! resource behind the [`AudioBackend`] trait and drives the load-completion
//! and timer-tick hooks; the backend record store sits behind
//! [`lyra_core::TelemetrySink`].
//!
//! Exactly one [`Player`] exists per process. It is constructed at
//! application start, handed by reference to all consumers, and exclusively
//! owns the audio resource until `dispose`.
//!
//! # Example
//!
//! ```rust,no_run
//! use lyra_playback::{AudioBackend, LoadToken, PlaybackConfig, Player};
//! use lyra_core::{ListeningReport, TelemetrySink, Track, TrackId};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! struct PlatformPlayer { /* ... native player handle */ }
//!
//! impl AudioBackend for PlatformPlayer {
//!     fn begin_load(&mut self, _token: LoadToken, _track: &Track) { /* ... */ }
//!     fn play(&mut self) { /* ... */ }
//!     fn pause(&mut self) { /* ... */ }
//!     fn stop(&mut self) { /* ... */ }
//!     fn seek(&mut self, _position: Duration) -> lyra_playback::Result<()> { Ok(()) }
//!     fn position(&self) -> Duration { Duration::ZERO }
//!     fn set_gain(&mut self, _gain: f32) { /* ... */ }
//! }
//!
//! struct BackendStore;
//!
//! impl TelemetrySink for BackendStore {
//!     fn upsert_listening(&self, _report: ListeningReport) -> lyra_core::Result<()> {
//!         // enqueue for the records API; must not block
//!         Ok(())
//!     }
//! }
//!
//! let mut player = Player::new(
//!     Box::new(PlatformPlayer {}),
//!     Arc::new(BackendStore),
//!     PlaybackConfig::default(),
//! );
//!
//! let track = Track::new(
//!     TrackId::new("t-1042"),
//!     "Night Drive",
//!     "Mira Vale",
//!     Duration::from_secs(214),
//!     "https://cdn.lyra.fm/audio/t-1042.m4a",
//! );
//! player.play(track, None).ok();
//! ```

mod backend;
mod engine;
mod error;
mod events;
mod player;
mod policy;
mod queue;
mod seek;
mod session;
pub mod types;
mod volume;

// Public exports
pub use backend::{AudioBackend, LoadToken};
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::{EventBus, PlaybackEvent, SubscriptionId};
pub use player::Player;
pub use policy::{advance, wrap_target, Outcome};
pub use queue::Queue;
pub use seek::SeekController;
pub use session::SessionTracker;
pub use types::{Direction, LoopMode, PlaybackConfig, PlaybackSnapshot, PlaybackState};
