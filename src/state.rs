//! Playback state and its persisted snapshot.
//!
//! The snapshot is a flat JSON object with five camelCase fields. Readers
//! tolerate any subset of them: a missing or ill-typed field keeps whatever
//! value the state already had.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::{TrackCatalog, TrackKey};
use crate::error::PlayerError;
use crate::utils::{clamp_percent, clamp_unit};

pub const DEFAULT_TRACK: &str = "rap";
pub const DEFAULT_VOLUME: f64 = 0.7;
pub const DEFAULT_PROGRESS: f64 = 35.0;

/// Last known playback intent, position and volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_track: TrackKey,
    /// seconds
    pub current_time: f64,
    pub volume: f64,
    /// percent of duration, may be stale while duration is unknown
    pub progress: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(TrackKey::new(DEFAULT_TRACK))
    }
}

impl PlaybackState {
    pub fn new(current_track: TrackKey) -> Self {
        Self {
            is_playing: false,
            current_track,
            current_time: 0.0,
            volume: DEFAULT_VOLUME,
            progress: DEFAULT_PROGRESS,
        }
    }

    /// Apply a persisted snapshot field by field.
    ///
    /// Fails only when `raw` is not a JSON object, in which case nothing is changed.
    pub fn overlay_snapshot(&mut self, raw: &str, catalog: &TrackCatalog) -> Result<(), PlayerError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| PlayerError::StoreCorrupt(e.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(PlayerError::StoreCorrupt(
                "snapshot is not a JSON object".to_string(),
            ));
        };

        if let Some(is_playing) = fields.get("isPlaying").and_then(Value::as_bool) {
            self.is_playing = is_playing;
        }
        if let Some(key) = fields.get("currentTrack").and_then(Value::as_str) {
            if catalog.contains(key) {
                self.current_track = TrackKey::new(key);
            }
        }
        if let Some(time) = finite_field(&fields, "currentTime").filter(|t| *t >= 0.0) {
            self.current_time = time;
        }
        if let Some(volume) = finite_field(&fields, "volume").and_then(clamp_unit) {
            self.volume = volume;
        }
        if let Some(progress) = finite_field(&fields, "progress").and_then(clamp_percent) {
            self.progress = progress;
        }

        Ok(())
    }

    /// Full snapshot, all five fields.
    pub fn to_snapshot(&self) -> Result<String, PlayerError> {
        serde_json::to_string(self).map_err(|e| PlayerError::StoreCorrupt(e.to_string()))
    }

    /// Zero position and progress together.
    pub fn rewind(&mut self) {
        self.current_time = 0.0;
        self.progress = 0.0;
    }
}

fn finite_field(fields: &Map<String, Value>, name: &str) -> Option<f64> {
    fields
        .get(name)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
}
