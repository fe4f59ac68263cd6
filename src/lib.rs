//! Background theme music that keeps playing across page navigations.
//!
//! A [`PlaybackController`] owns one audio output handle and one persisted
//! [`PlaybackState`] snapshot, restores position and intent on every page
//! load, and mirrors the visible state into optional display elements.

pub mod catalog;
pub mod clock;
pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod output;
pub mod persist;
pub mod projection;
pub mod restore;
pub mod state;
pub mod store;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use catalog::{Track, TrackCatalog, TrackKey};
pub use config::{ElementIds, PlayerConfig};
pub use controller::{PlayOrigin, PlayRequest, PlaybackController, SharedPlayer, Spawner};
pub use error::{CatalogError, OutputError, PlayerError, StoreError};
pub use output::{AudioOutput, EventSink, OutputEvent, PlayOutcome};
pub use projection::{Slot, UiProjection};
pub use restore::RestorePhase;
pub use state::PlaybackState;
pub use store::{KeyValueStore, MemoryStore};
