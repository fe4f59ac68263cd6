//! Fake collaborators shared by the integration tests.
#![allow(dead_code)]

use futures_util::future::{ready, FutureExt};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use themebgm::clock::Clock;
use themebgm::{
    AudioOutput, EventSink, OutputError, OutputEvent, PlayOutcome, PlayRequest,
    PlaybackController, PlayerConfig, Slot, TrackCatalog, UiProjection, MemoryStore,
};

pub const STORAGE_KEY: &str = "musicPlayerState";

pub struct OutputLog {
    pub source: Option<String>,
    pub position: f64,
    pub duration: Option<f64>,
    pub volume: f64,
    pub paused: bool,
    pub play_calls: usize,
    pub play_result: Result<(), OutputError>,
    pub sinks: Vec<EventSink>,
    pub cleared: usize,
}

impl Default for OutputLog {
    fn default() -> Self {
        Self {
            source: None,
            position: 0.0,
            duration: None,
            volume: 1.0,
            paused: true,
            play_calls: 0,
            play_result: Ok(()),
            sinks: Vec::new(),
            cleared: 0,
        }
    }
}

/// Output handle that behaves like an `<audio>` element without a clock:
/// setting a source rewinds and forgets the duration until `load_media`.
#[derive(Clone, Default)]
pub struct FakeOutput {
    pub log: Rc<RefCell<OutputLog>>,
}

impl FakeOutput {
    pub fn load_media(&self, duration: f64) {
        self.log.borrow_mut().duration = Some(duration);
    }

    pub fn advance_to(&self, position: f64) {
        self.log.borrow_mut().position = position;
    }

    pub fn reject_play(&self, reason: &str) {
        self.log.borrow_mut().play_result = Err(OutputError::Rejected(reason.to_string()));
    }

    pub fn emit(&self, event: OutputEvent) {
        let sinks = self.log.borrow().sinks.clone();
        for sink in sinks {
            sink(event.clone());
        }
    }

    pub fn position(&self) -> f64 {
        self.log.borrow().position
    }

    pub fn play_calls(&self) -> usize {
        self.log.borrow().play_calls
    }

    pub fn volume(&self) -> f64 {
        self.log.borrow().volume
    }

    pub fn is_paused(&self) -> bool {
        self.log.borrow().paused
    }
}

impl AudioOutput for FakeOutput {
    fn set_source(&mut self, uri: &str) {
        let mut log = self.log.borrow_mut();
        log.source = Some(uri.to_string());
        log.position = 0.0;
        log.duration = None;
    }

    fn source(&self) -> Option<String> {
        self.log.borrow().source.clone()
    }

    fn play(&mut self) -> PlayOutcome {
        let mut log = self.log.borrow_mut();
        log.play_calls += 1;
        if log.play_result.is_ok() {
            log.paused = false;
        }
        ready(log.play_result.clone()).boxed_local()
    }

    fn pause(&mut self) {
        self.log.borrow_mut().paused = true;
    }

    fn current_time(&self) -> f64 {
        self.log.borrow().position
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.log.borrow_mut().position = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.log.borrow().duration
    }

    fn volume(&self) -> f64 {
        self.log.borrow().volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.log.borrow_mut().volume = volume;
    }

    fn subscribe(&mut self, sink: EventSink) {
        self.log.borrow_mut().sinks.push(sink);
    }

    fn clear_subscriptions(&mut self) {
        let mut log = self.log.borrow_mut();
        log.sinks.clear();
        log.cleared += 1;
    }
}

#[derive(Clone, Default)]
pub struct RecordingProjection {
    pub texts: Rc<RefCell<HashMap<Slot, String>>>,
    pub fills: Rc<RefCell<HashMap<Slot, f64>>>,
}

impl RecordingProjection {
    pub fn text(&self, slot: Slot) -> Option<String> {
        self.texts.borrow().get(&slot).cloned()
    }

    pub fn fill(&self, slot: Slot) -> Option<f64> {
        self.fills.borrow().get(&slot).copied()
    }
}

impl UiProjection for RecordingProjection {
    fn set_text(&mut self, slot: Slot, text: &str) {
        self.texts.borrow_mut().insert(slot, text.to_string());
    }

    fn set_fill(&mut self, slot: Slot, percent: f64) {
        self.fills.borrow_mut().insert(slot, percent);
    }
}

#[derive(Clone, Default)]
pub struct ManualClock {
    pub now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

pub struct Harness {
    pub controller: PlaybackController,
    pub output: FakeOutput,
    pub store: MemoryStore,
    pub ui: RecordingProjection,
    pub clock: ManualClock,
}

pub fn harness(store: MemoryStore) -> Harness {
    let output = FakeOutput::default();
    let ui = RecordingProjection::default();
    let clock = ManualClock::default();
    let controller = PlaybackController::new(
        TrackCatalog::builtin().expect("builtin catalog"),
        PlayerConfig::default(),
        Box::new(output.clone()),
        Box::new(store.clone()),
        Box::new(ui.clone()),
        Box::new(clock.clone()),
    );
    Harness {
        controller,
        output,
        store,
        ui,
        clock,
    }
}

/// Fresh controller, initialized, with the restore sequence completed on a
/// track of `duration` seconds.
pub fn ready_harness(store: MemoryStore, duration: f64) -> Harness {
    let mut h = harness(store);
    h.controller.initialize(noop_sink());
    h.output.load_media(duration);
    if let Some(request) = h.controller.handle_event(OutputEvent::LoadedData) {
        resolve(&mut h.controller, request);
    }
    h
}

pub fn noop_sink() -> EventSink {
    Rc::new(|_: OutputEvent| {})
}

/// Await a fake outcome (always ready) and report it back.
pub fn resolve(controller: &mut PlaybackController, request: PlayRequest) {
    let result = request
        .outcome
        .now_or_never()
        .expect("fake play outcomes resolve immediately");
    controller.complete_play(request.generation, request.origin, result);
}

pub fn stored(store: &MemoryStore) -> serde_json::Value {
    let raw = store.raw(STORAGE_KEY).expect("snapshot written");
    serde_json::from_str(&raw).expect("snapshot is JSON")
}
