// Single-threaded shared handle that drives play requests and output events.
use futures_util::future::LocalBoxFuture;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::warn;

use super::{PlayRequest, PlaybackController};
use crate::output::{EventSink, OutputEvent};
use crate::state::PlaybackState;

/// Runs a future to completion on the page's event loop.
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// Cloneable handle passed to whatever UI layer needs the player.
#[derive(Clone)]
pub struct SharedPlayer {
    inner: Rc<RefCell<PlaybackController>>,
    spawner: Spawner,
}

impl PartialEq for SharedPlayer {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl SharedPlayer {
    pub fn new(controller: PlaybackController, spawner: Spawner) -> Self {
        Self {
            inner: Rc::new(RefCell::new(controller)),
            spawner,
        }
    }

    /// Initialize the controller with an event sink routed back to this handle.
    pub fn initialize(&self) -> bool {
        let sink = event_sink(Rc::downgrade(&self.inner), self.spawner.clone());
        self.inner.borrow_mut().initialize(sink)
    }

    pub fn dispatch(&self, event: OutputEvent) {
        let request = match self.inner.try_borrow_mut() {
            Ok(mut controller) => controller.handle_event(event),
            Err(_) => {
                warn!(event = event.dom_name(), "dropping re-entrant output event");
                return;
            }
        };
        if let Some(request) = request {
            self.drive(request);
        }
    }

    pub fn play(&self) {
        let request = self.inner.borrow_mut().play();
        if let Some(request) = request {
            self.drive(request);
        }
    }

    pub fn pause(&self) {
        self.inner.borrow_mut().pause();
    }

    pub fn toggle(&self) {
        let request = self.inner.borrow_mut().toggle();
        if let Some(request) = request {
            self.drive(request);
        }
    }

    pub fn seek(&self, percent: f64) {
        self.inner.borrow_mut().seek(percent);
    }

    pub fn set_volume(&self, level: f64) {
        self.inner.borrow_mut().set_volume(level);
    }

    pub fn select_track(&self, key: &str, force_restart: bool) {
        self.inner.borrow_mut().select_track(key, force_restart);
    }

    pub fn refresh(&self) {
        if let Ok(mut controller) = self.inner.try_borrow_mut() {
            controller.refresh_projection();
        }
    }

    pub fn flush(&self) {
        if let Ok(mut controller) = self.inner.try_borrow_mut() {
            controller.flush();
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.inner.borrow().state().clone()
    }

    pub fn with_controller<R>(&self, f: impl FnOnce(&PlaybackController) -> R) -> R {
        f(&self.inner.borrow())
    }

    fn drive(&self, request: PlayRequest) {
        drive_request(Rc::downgrade(&self.inner), &self.spawner, request);
    }
}

fn drive_request(
    controller: Weak<RefCell<PlaybackController>>,
    spawner: &Spawner,
    request: PlayRequest,
) {
    let PlayRequest {
        generation,
        origin,
        outcome,
    } = request;

    spawner(Box::pin(async move {
        let result = outcome.await;
        if let Some(controller) = controller.upgrade() {
            controller
                .borrow_mut()
                .complete_play(generation, origin, result);
        }
    }));
}

fn event_sink(controller: Weak<RefCell<PlaybackController>>, spawner: Spawner) -> EventSink {
    Rc::new(move |event: OutputEvent| {
        let Some(inner) = controller.upgrade() else {
            return;
        };
        SharedPlayer {
            inner,
            spawner: spawner.clone(),
        }
        .dispatch(event);
    })
}
