//! Static theme-music catalog.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::CatalogError;

const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.json");

/// Key of a catalog entry, e.g. `"rap"` or `"metal"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackKey(String);

impl TrackKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl PartialEq<str> for TrackKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TrackKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackKey,
    pub title: String,
    pub artist: String,
    /// URI handed to the output handle
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    default: TrackKey,
    tracks: Vec<Track>,
}

/// Fixed set of tracks plus the entry used when a key does not resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackCatalog {
    default_key: TrackKey,
    tracks: Vec<Track>,
}

impl TrackCatalog {
    pub fn new(default_key: TrackKey, tracks: Vec<Track>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for track in &tracks {
            if !seen.insert(track.id.as_str()) {
                return Err(CatalogError::DuplicateKey(track.id.to_string()));
            }
        }

        if !tracks.iter().any(|t| t.id == default_key) {
            return Err(CatalogError::UnknownDefault(default_key.to_string()));
        }

        Ok(Self {
            default_key,
            tracks,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(raw).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(file.default, file.tracks)
    }

    /// The four-theme catalog shipped with the site.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn get(&self, key: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn default_key(&self) -> &TrackKey {
        &self.default_key
    }

    pub fn default_track(&self) -> &Track {
        // Presence of the default entry is checked in `new`.
        self.tracks
            .iter()
            .find(|t| t.id == self.default_key)
            .unwrap_or(&self.tracks[0])
    }

    /// Look up `key`, falling back to the default entry.
    pub fn resolve(&self, key: &TrackKey) -> &Track {
        self.get(key.as_str()).unwrap_or_else(|| self.default_track())
    }

    pub fn keys(&self) -> impl Iterator<Item = &TrackKey> {
        self.tracks.iter().map(|t| &t.id)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}
