//! Write-only projection of playback state onto display elements.
//!
//! Every target is optional. Implementations skip slots they cannot find.

pub const GLYPH_PLAYING: &str = "⏸";
pub const GLYPH_PAUSED: &str = "▶";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    TrackTitle,
    TrackArtist,
    PlayPause,
    ProgressFill,
    VolumeFill,
    Elapsed,
    Duration,
}

pub trait UiProjection {
    fn set_text(&mut self, slot: Slot, text: &str);

    /// Width of a fill bar, in percent.
    fn set_fill(&mut self, slot: Slot, percent: f64);
}

/// Projection for pages without player controls.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProjection;

impl UiProjection for NullProjection {
    fn set_text(&mut self, _slot: Slot, _text: &str) {}

    fn set_fill(&mut self, _slot: Slot, _percent: f64) {}
}

pub fn play_glyph(is_playing: bool) -> &'static str {
    if is_playing {
        GLYPH_PLAYING
    } else {
        GLYPH_PAUSED
    }
}
