//! Playback state controller.
//!
//! Keeps three copies of playback state in step: the in-memory
//! [`PlaybackState`], the output handle's own asynchronous state, and the
//! snapshot in the persistent store. All methods run on the page's event
//! loop; none of them block or return errors.

mod notifications;
mod shared;
mod transport;

pub use shared::{SharedPlayer, Spawner};

use tracing::{debug, info, warn};

use crate::catalog::{Track, TrackCatalog};
use crate::clock::Clock;
use crate::config::PlayerConfig;
use crate::error::{OutputError, PlayerError};
use crate::output::{AudioOutput, EventSink, PlayOutcome};
use crate::persist::PersistSchedule;
use crate::projection::{play_glyph, Slot, UiProjection};
use crate::restore::{RestorePhase, RestoreSequence};
use crate::state::PlaybackState;
use crate::store::KeyValueStore;
use crate::utils::format_time;

/// Who asked for playback to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOrigin {
    /// `play()` / `toggle()`
    User,
    /// Resume step of the restore sequence
    Restore,
}

/// A play request in flight. Await `outcome`, then hand the result back
/// through [`PlaybackController::complete_play`] with the same generation.
pub struct PlayRequest {
    pub generation: u64,
    pub origin: PlayOrigin,
    pub outcome: PlayOutcome,
}

impl std::fmt::Debug for PlayRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayRequest")
            .field("generation", &self.generation)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

pub struct PlaybackController {
    catalog: TrackCatalog,
    config: PlayerConfig,
    state: PlaybackState,
    output: Box<dyn AudioOutput>,
    store: Box<dyn KeyValueStore>,
    projection: Box<dyn UiProjection>,
    clock: Box<dyn Clock>,
    restore: RestoreSequence,
    schedule: PersistSchedule,
    /// Bumped by every play request and by anything that supersedes one
    generation: u64,
    initialized: bool,
}

impl PlaybackController {
    pub fn new(
        catalog: TrackCatalog,
        config: PlayerConfig,
        output: Box<dyn AudioOutput>,
        store: Box<dyn KeyValueStore>,
        projection: Box<dyn UiProjection>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let state = PlaybackState::new(catalog.default_key().clone());
        let schedule = PersistSchedule::new(config.persist_interval_ms);
        Self {
            catalog,
            config,
            state,
            output,
            store,
            projection,
            clock,
            restore: RestoreSequence::default(),
            schedule,
            generation: 0,
            initialized: false,
        }
    }

    /// Load the snapshot, attach to the output handle and start the restore
    /// sequence. Returns `false` if the controller was already initialized.
    pub fn initialize(&mut self, sink: EventSink) -> bool {
        if self.initialized {
            debug!("playback controller already initialized");
            return false;
        }
        self.initialized = true;

        self.load_persisted();

        self.output.clear_subscriptions();
        self.output.subscribe(sink);
        self.output.set_volume(self.state.volume);

        self.begin_restore();

        info!(
            track = %self.state.current_track,
            playing = self.state.is_playing,
            position = self.state.current_time,
            "playback controller initialized"
        );
        true
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn current_track(&self) -> &Track {
        self.catalog.resolve(&self.state.current_track)
    }

    pub fn catalog(&self) -> &TrackCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn restore_phase(&self) -> RestorePhase {
        self.restore.phase()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Give up on a restore that is still waiting for media data.
    pub fn cancel_restore(&mut self) {
        if self.restore.cancel() {
            info!(track = %self.state.current_track, "restore sequence cancelled");
        }
    }

    /// Repaint every display element from the current state.
    pub fn refresh_projection(&mut self) {
        self.refresh_ui();
        self.refresh_progress();
        self.refresh_duration();
    }

    /// Write a snapshot deferred by progress-tick throttling.
    pub fn flush(&mut self) {
        if self.schedule.is_pending() {
            self.persist_now();
        }
    }

    fn load_persisted(&mut self) {
        let key = &self.config.storage_key;
        match self.store.get(key) {
            Ok(Some(raw)) => {
                if let Err(err) = self.state.overlay_snapshot(&raw, &self.catalog) {
                    warn!(error = %err, "ignoring stored playback state");
                }
            }
            Ok(None) => debug!(key = %key, "no stored playback state"),
            Err(err) => {
                let err = PlayerError::from(err);
                warn!(error = %err, "failed to read playback state");
            }
        }
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn request_playback(&mut self, origin: PlayOrigin) -> PlayRequest {
        let generation = self.next_generation();
        PlayRequest {
            generation,
            origin,
            outcome: self.output.play(),
        }
    }

    /// Apply the resolution of a play request.
    ///
    /// Results carrying a generation other than the current one were
    /// superseded by a later pause, play or track change and are dropped.
    pub fn complete_play(
        &mut self,
        generation: u64,
        origin: PlayOrigin,
        result: Result<(), OutputError>,
    ) {
        if origin == PlayOrigin::Restore {
            self.restore.settle(generation);
        }

        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "discarding superseded play resolution"
            );
            return;
        }

        match result {
            Ok(()) => {
                self.state.is_playing = true;
                self.refresh_ui();
                self.persist_now();
            }
            Err(err) => {
                let err = PlayerError::from(err);
                warn!(error = %err, ?origin, "could not start playback");
                self.state.is_playing = false;
                self.refresh_ui();
                // A rejected resume is not persisted so the next page load tries again.
                if origin == PlayOrigin::User {
                    self.persist_now();
                }
            }
        }
    }

    fn persist_now(&mut self) {
        let now = self.clock.now_ms();
        self.schedule.record_write(now);

        let snapshot = match self.state.to_snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "failed to encode playback state");
                return;
            }
        };
        if let Err(err) = self.store.set(&self.config.storage_key, &snapshot) {
            let err = PlayerError::from(err);
            warn!(error = %err, "failed to save playback state");
        }
    }

    fn persist_throttled(&mut self) {
        let now = self.clock.now_ms();
        if self.schedule.due(now) {
            self.persist_now();
        }
    }

    fn refresh_ui(&mut self) {
        let track = self.catalog.resolve(&self.state.current_track);
        self.projection.set_text(Slot::TrackTitle, &track.title);
        self.projection.set_text(Slot::TrackArtist, &track.artist);
        self.projection
            .set_text(Slot::PlayPause, play_glyph(self.shows_playing()));
        self.projection
            .set_fill(Slot::ProgressFill, self.state.progress);
        self.projection
            .set_fill(Slot::VolumeFill, self.state.volume * 100.0);
    }

    fn refresh_progress(&mut self) {
        self.projection
            .set_fill(Slot::ProgressFill, self.state.progress);
        self.projection
            .set_text(Slot::Elapsed, &format_time(self.output.current_time()));
    }

    fn refresh_duration(&mut self) {
        if let Some(duration) = self.output.duration() {
            self.projection
                .set_text(Slot::Duration, &format_time(duration));
        }
    }

    fn refresh_play_indicator(&mut self) {
        self.projection
            .set_text(Slot::PlayPause, play_glyph(self.shows_playing()));
    }

    /// A restored `isPlaying` is only shown once the resume has resolved.
    fn shows_playing(&self) -> bool {
        match self.restore.phase() {
            RestorePhase::AwaitingData | RestorePhase::Resuming { .. } => false,
            _ => self.state.is_playing,
        }
    }
}
