//! The components module contains the web shell around the player.

mod app;
mod player;

pub use app::*;
pub use player::*;
