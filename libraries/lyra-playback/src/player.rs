//! Player facade
//!
//! The single composition root the presentation layer talks to. Owns the
//! engine, the listening tracker, and the observer bus; constructed once at
//! application start and passed by reference to all consumers. After every
//! operation the engine's buffered events are drained — the listening
//! tracker sees them first, then the subscribers.

use crate::{
    backend::{AudioBackend, LoadToken},
    engine::PlaybackEngine,
    error::Result,
    events::{EventBus, PlaybackEvent, SubscriptionId},
    session::SessionTracker,
    types::{LoopMode, PlaybackConfig, PlaybackSnapshot, PlaybackState},
};
use lyra_core::{TelemetrySink, Track};
use std::sync::Arc;
use std::time::Duration;

/// Facade over the playback core
pub struct Player {
    engine: PlaybackEngine,
    tracker: SessionTracker,
    bus: EventBus,
}

impl Player {
    /// Create the player
    ///
    /// `backend` is the platform audio resource (exclusively owned from here
    /// on); `sink` receives closed listening sessions.
    pub fn new(
        backend: Box<dyn AudioBackend>,
        sink: Arc<dyn TelemetrySink>,
        config: PlaybackConfig,
    ) -> Self {
        Self {
            engine: PlaybackEngine::new(backend, &config),
            tracker: SessionTracker::new(sink, &config),
            bus: EventBus::new(),
        }
    }

    // ===== Intents =====

    /// Start playing a track, optionally replacing the queue
    pub fn play(&mut self, track: Track, queue: Option<Vec<Track>>) -> Result<()> {
        let result = self.engine.play(track, queue);
        self.drain();
        result
    }

    /// Pause playback (no-op unless playing)
    pub fn pause(&mut self) {
        self.engine.pause();
        self.drain();
    }

    /// Resume playback (no-op unless paused)
    pub fn resume(&mut self) {
        self.engine.resume();
        self.drain();
    }

    /// Skip to the next track
    pub fn next(&mut self, data: Option<Vec<Track>>, use_shuffle: Option<bool>) -> Result<()> {
        let result = self.engine.next(data, use_shuffle);
        self.drain();
        result
    }

    /// Go to the previous track
    pub fn previous(&mut self, data: Option<Vec<Track>>, use_shuffle: Option<bool>) -> Result<()> {
        let result = self.engine.previous(data, use_shuffle);
        self.drain();
        result
    }

    /// Set the loop mode, optionally replacing/reshuffling the queue
    pub fn set_loop_mode(
        &mut self,
        mode: LoopMode,
        data: Option<Vec<Track>>,
        use_shuffle: Option<bool>,
    ) -> Result<()> {
        let result = self.engine.set_loop_mode(mode, data, use_shuffle);
        self.drain();
        result
    }

    /// Enable or disable shuffle (never changes the sounding track)
    pub fn set_shuffle(&mut self, enabled: bool) {
        self.engine.set_shuffle(enabled);
        self.drain();
    }

    // ===== Seeking =====

    /// Start a scrub session
    pub fn begin_seek(&mut self) {
        self.engine.begin_seek();
    }

    /// Record a drag update, clamped to `[0, duration]`
    pub fn handle_seek(&mut self, duration: Duration, value: Duration) {
        self.engine.handle_seek(duration, value);
    }

    /// End the scrub session with a single resource seek
    pub fn end_seek(&mut self) -> Result<()> {
        let result = self.engine.end_seek();
        self.drain();
        result
    }

    // ===== Volume =====

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.engine.set_volume(level);
        self.drain();
    }

    /// Get current volume level (0-100)
    pub fn volume(&self) -> u8 {
        self.engine.volume_level()
    }

    /// Mute audio
    pub fn mute(&mut self) {
        self.engine.mute();
        self.drain();
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        self.engine.unmute();
        self.drain();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.engine.toggle_mute();
        self.drain();
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.engine.is_muted()
    }

    // ===== Platform Driver Hooks =====

    /// Periodic position tick (wire to a ~1 Hz timer while the app is alive)
    pub fn tick(&mut self) {
        self.engine.tick();
        self.drain();
    }

    /// The tokened load completed successfully
    pub fn on_load_ready(&mut self, token: LoadToken) {
        self.engine.on_load_ready(token);
        self.drain();
    }

    /// The tokened load failed
    pub fn on_load_failed(&mut self, token: LoadToken, reason: &str) {
        self.engine.on_load_failed(token, reason);
        self.drain();
    }

    // ===== Lifecycle =====

    /// App became active: flush the open listening session
    pub fn on_app_active(&mut self) {
        self.tracker.flush();
    }

    /// App left the foreground: flush the open listening session
    pub fn on_app_background(&mut self) {
        self.tracker.flush();
    }

    /// Manual telemetry flush
    pub fn flush_listening(&mut self) {
        self.tracker.flush();
    }

    /// Release the audio resource; the open session is closed on the way out
    pub fn dispose(&mut self) {
        self.engine.dispose();
        self.drain();
    }

    // ===== Observation =====

    /// Register an observer for playback events
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&PlaybackEvent) + Send + 'static,
    ) -> SubscriptionId {
        self.bus.subscribe(callback)
    }

    /// Remove an observer
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // ===== Derived Read State =====

    /// Currently active track
    pub fn active_song(&self) -> Option<&Track> {
        self.engine.current_track()
    }

    /// Whether audio is sounding right now
    pub fn is_playing(&self) -> bool {
        self.engine.state().is_playing()
    }

    /// Whether a track is being prepared
    pub fn is_song_loading(&self) -> bool {
        self.engine.state() == PlaybackState::Loading
    }

    /// Reported position (scrub target while a seek session is active)
    pub fn position(&self) -> Duration {
        self.engine.position()
    }

    /// Queue contents in the active traversal order
    pub fn playlist(&self) -> Vec<&Track> {
        self.engine.playlist()
    }

    /// Listened time accumulated for the open session
    pub fn listening_time(&self) -> Duration {
        self.tracker.listening_time()
    }

    /// Current loop mode
    pub fn loop_mode(&self) -> LoopMode {
        self.engine.loop_mode()
    }

    /// Whether shuffle is enabled
    pub fn is_shuffled(&self) -> bool {
        self.engine.is_shuffled()
    }

    /// Serializable snapshot of everything the presentation layer renders
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            active_song: self.engine.current_track().cloned(),
            is_playing: self.is_playing(),
            is_song_loading: self.is_song_loading(),
            position: self.position(),
            playlist: self.playlist().into_iter().cloned().collect(),
            loop_mode: self.loop_mode(),
            shuffled: self.is_shuffled(),
            listening_time: self.listening_time(),
            volume: self.volume(),
            muted: self.is_muted(),
        }
    }

    /// Route buffered engine events: tracker first, then subscribers
    fn drain(&mut self) {
        for event in self.engine.take_events() {
            self.tracker.handle_event(&event);
            self.bus.dispatch(&event);
        }
    }
}
