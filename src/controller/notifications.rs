// Output notifications and the restore sequence they drive.
use tracing::{debug, warn};

use super::{PlayOrigin, PlayRequest, PlaybackController};
use crate::error::PlayerError;
use crate::output::OutputEvent;
use crate::restore::RestorePhase;

impl PlaybackController {
    /// React to a notification from the output handle. A returned request is
    /// the restore sequence's resume attempt and must be driven like `play()`.
    pub fn handle_event(&mut self, event: OutputEvent) -> Option<PlayRequest> {
        match event {
            OutputEvent::TimeUpdate => {
                self.on_time_update();
                None
            }
            OutputEvent::LoadedMetadata => {
                self.refresh_duration();
                None
            }
            OutputEvent::LoadedData => self.on_data_ready(),
            OutputEvent::Ended => {
                self.on_ended();
                None
            }
            OutputEvent::Error(message) => {
                let err = PlayerError::MediaLoad(message);
                warn!(error = %err, track = %self.state.current_track, "audio loading error");
                if self.restore.phase() == RestorePhase::AwaitingData {
                    self.restore.cancel();
                }
                None
            }
        }
    }

    pub(super) fn begin_restore(&mut self) {
        let source = self.catalog.resolve(&self.state.current_track).source.clone();
        self.output.set_source(&source);
        self.restore.begin();
    }

    fn on_data_ready(&mut self) -> Option<PlayRequest> {
        if !self.restore.take_data_ready() {
            return None;
        }

        let saved = self.state.current_time;
        if let Some(duration) = self.output.duration() {
            if saved > 0.0 && saved < duration {
                self.output.set_current_time(saved);
            } else if saved >= duration {
                debug!(saved, duration, "saved position is past the end, starting over");
                self.state.rewind();
            }
        }

        let request = if self.state.is_playing {
            let request = self.request_playback(PlayOrigin::Restore);
            self.restore.resuming(request.generation);
            Some(request)
        } else {
            None
        };

        self.refresh_ui();
        request
    }

    fn on_time_update(&mut self) {
        // The saved position is still waiting to be applied by `on_data_ready`.
        if self.restore.phase() == RestorePhase::AwaitingData {
            return;
        }
        let Some(duration) = self.output.duration() else {
            return;
        };

        let position = self.output.current_time();
        self.state.current_time = position;
        self.state.progress = (position / duration * 100.0).clamp(0.0, 100.0);

        self.refresh_progress();
        self.persist_throttled();
    }

    fn on_ended(&mut self) {
        self.state.is_playing = false;
        self.state.rewind();
        self.refresh_play_indicator();
        self.persist_now();
    }
}
