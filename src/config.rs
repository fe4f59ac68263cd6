//! Player configuration.

use serde::{Deserialize, Serialize};

use crate::error::PlayerError;

const BUILTIN_CONFIG: &str = include_str!("../assets/player.json");

/// Identifiers of the optional display elements the player writes into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub track_title: String,
    pub track_artist: String,
    pub play_button: String,
    pub progress_fill: String,
    pub volume_fill: String,
    /// Class shared by the time labels: first match is elapsed, second is duration.
    pub time_class: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            track_title: "trackTitle".to_string(),
            track_artist: "trackArtist".to_string(),
            play_button: "playBtn".to_string(),
            progress_fill: "progressFill".to_string(),
            volume_fill: "volumeFill".to_string(),
            time_class: "time".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// localStorage key of the persisted snapshot
    pub storage_key: String,
    /// DOM id of the shared `<audio>` element
    pub audio_element_id: String,
    /// Minimum spacing of snapshot writes caused by progress ticks
    pub persist_interval_ms: u64,
    pub elements: ElementIds,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            storage_key: "musicPlayerState".to_string(),
            audio_element_id: "globalAudioPlayer".to_string(),
            persist_interval_ms: 1000,
            elements: ElementIds::default(),
        }
    }
}

impl PlayerConfig {
    pub fn from_json(raw: &str) -> Result<Self, PlayerError> {
        serde_json::from_str(raw).map_err(|e| PlayerError::Config(e.to_string()))
    }

    /// Configuration shipped in `assets/player.json`.
    pub fn builtin() -> Result<Self, PlayerError> {
        Self::from_json(BUILTIN_CONFIG)
    }
}
