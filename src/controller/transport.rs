// Transport operations: play/pause/seek/volume and track selection.
use tracing::{debug, info};

use super::{PlayOrigin, PlayRequest, PlaybackController};
use crate::utils::{clamp_percent, clamp_unit};

impl PlaybackController {
    /// Ask the output to start. `isPlaying` only changes once the returned
    /// request resolves. `None` when no source is loaded.
    pub fn play(&mut self) -> Option<PlayRequest> {
        if self.output.source().is_none() {
            debug!("play ignored, no source loaded");
            return None;
        }
        Some(self.request_playback(PlayOrigin::User))
    }

    pub fn pause(&mut self) {
        self.next_generation();
        self.output.pause();
        self.state.is_playing = false;
        self.refresh_ui();
        self.persist_now();
    }

    pub fn toggle(&mut self) -> Option<PlayRequest> {
        if self.state.is_playing {
            self.pause();
            None
        } else {
            self.play()
        }
    }

    /// Jump to `percent` of the track. No-op while the duration is unknown.
    pub fn seek(&mut self, percent: f64) {
        let Some(duration) = self.output.duration() else {
            debug!(percent, "seek ignored, duration unknown");
            return;
        };
        let Some(percent) = clamp_percent(percent) else {
            return;
        };

        let position = percent / 100.0 * duration;
        self.output.set_current_time(position);
        self.state.current_time = position;
        self.state.progress = percent;
        self.refresh_ui();
        self.persist_now();
    }

    pub fn set_volume(&mut self, level: f64) {
        let Some(volume) = clamp_unit(level) else {
            debug!("volume ignored, not a number");
            return;
        };

        self.output.set_volume(volume);
        self.state.volume = volume;
        self.refresh_ui();
        self.persist_now();
    }

    /// Switch to the track `key`.
    ///
    /// A different key stops playback and rewinds; it does not resume even if
    /// the previous theme was playing. The same key is a no-op unless
    /// `force_restart` is set, which rewinds and stops in place.
    pub fn select_track(&mut self, key: &str, force_restart: bool) {
        let Some(track) = self.catalog.get(key).cloned() else {
            debug!(key, "unknown track key");
            return;
        };

        if track.id != self.state.current_track {
            self.cancel_restore();
            self.next_generation();

            self.output.pause();
            self.output.set_source(&track.source);
            self.output.set_current_time(0.0);

            info!(from = %self.state.current_track, to = %track.id, "theme changed");
            self.state.current_track = track.id;
            self.state.is_playing = false;
            self.state.rewind();

            self.refresh_ui();
            self.persist_now();
        } else if force_restart {
            self.next_generation();

            self.output.set_current_time(0.0);
            self.output.pause();

            self.state.is_playing = false;
            self.state.rewind();

            self.refresh_ui();
            self.persist_now();
        }
    }
}
