//! Error types for the playback controller.
//!
//! None of these reach the page: the controller logs them and falls back to
//! a quieter state (defaults, paused, unchanged).

use thiserror::Error;

/// Main error type for the player.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlayerError {
    /// Persisted snapshot could not be decoded
    #[error("Stored playback state is corrupt: {0}")]
    StoreCorrupt(String),

    /// Persistent store refused a read or write
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Runtime refused to start playback (autoplay policy, decode failure)
    #[error("Playback rejected: {0}")]
    PlaybackRejected(#[from] OutputError),

    /// Output handle reported a network or decode error
    #[error("Media load error: {0}")]
    MediaLoad(String),

    /// Track catalog is unusable
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Player configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failures of the persistent key-value store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("write failed: {0}")]
    Write(String),
}

/// Failures reported by an audio output handle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OutputError {
    #[error("play request rejected: {0}")]
    Rejected(String),

    #[error("no source loaded")]
    NoSource,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("catalog has no tracks")]
    Empty,

    #[error("duplicate track key `{0}`")]
    DuplicateKey(String),

    #[error("default track `{0}` is not in the catalog")]
    UnknownDefault(String),

    #[error("invalid catalog JSON: {0}")]
    Parse(String),
}

/// Convenience Result type using the player Error
pub type Result<T> = std::result::Result<T, PlayerError>;
