//! Audio output capability consumed by the controller.

use futures_util::future::LocalBoxFuture;
use std::rc::Rc;

use crate::error::OutputError;

/// Notifications raised by an output handle.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputEvent {
    TimeUpdate,
    LoadedMetadata,
    LoadedData,
    Ended,
    Error(String),
}

impl OutputEvent {
    /// DOM event name of this notification.
    pub fn dom_name(&self) -> &'static str {
        match self {
            OutputEvent::TimeUpdate => "timeupdate",
            OutputEvent::LoadedMetadata => "loadedmetadata",
            OutputEvent::LoadedData => "loadeddata",
            OutputEvent::Ended => "ended",
            OutputEvent::Error(_) => "error",
        }
    }
}

/// Callback an output handle invokes for every notification.
pub type EventSink = Rc<dyn Fn(OutputEvent)>;

/// Outcome of a play request, resolved some time after `play` returns.
pub type PlayOutcome = LocalBoxFuture<'static, Result<(), OutputError>>;

/// One audio rendering handle (an `<audio>` element in the browser).
pub trait AudioOutput {
    fn set_source(&mut self, uri: &str);

    /// Currently loaded source, `None` when nothing is loaded.
    fn source(&self) -> Option<String>;

    fn play(&mut self) -> PlayOutcome;

    fn pause(&mut self);

    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, seconds: f64);

    /// Track length, `None` until metadata is known.
    fn duration(&self) -> Option<f64>;

    fn volume(&self) -> f64;

    fn set_volume(&mut self, volume: f64);

    fn subscribe(&mut self, sink: EventSink);

    /// Drop every subscription made through `subscribe`.
    fn clear_subscriptions(&mut self);
}

/// Normalize a raw media duration: NaN, infinite and zero mean "unknown".
pub fn known_duration(raw: f64) -> Option<f64> {
    if raw.is_finite() && raw > 0.0 {
        Some(raw)
    } else {
        None
    }
}
