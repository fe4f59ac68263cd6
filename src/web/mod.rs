//! Browser collaborators and the wiring that mounts the player on a page.

mod audio_element;
mod dom_projection;
mod local_store;

pub use audio_element::HtmlAudioOutput;
pub use dom_projection::DomProjection;
pub use local_store::LocalStore;

use futures_util::future::LocalBoxFuture;
use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::{closure::Closure, JsCast};

use crate::catalog::TrackCatalog;
use crate::clock::SystemClock;
use crate::config::PlayerConfig;
use crate::controller::{PlaybackController, SharedPlayer, Spawner};

pub fn spawner() -> Spawner {
    Rc::new(|future: LocalBoxFuture<'static, ()>| {
        wasm_bindgen_futures::spawn_local(future)
    })
}

/// Build the browser-backed controller, initialize it and keep throttled
/// snapshot writes flowing. `None` when the page has no document.
pub fn mount(config: PlayerConfig, catalog: TrackCatalog) -> Option<SharedPlayer> {
    let Some(output) = HtmlAudioOutput::acquire(&config.audio_element_id) else {
        warn!(id = %config.audio_element_id, "could not acquire audio element");
        return None;
    };

    let flush_every = config.persist_interval_ms.clamp(1, u32::MAX as u64) as u32;
    let projection = DomProjection::new(config.elements.clone());
    let controller = PlaybackController::new(
        catalog,
        config,
        Box::new(output),
        Box::new(LocalStore),
        Box::new(projection),
        Box::new(SystemClock),
    );

    let player = SharedPlayer::new(controller, spawner());
    player.initialize();

    {
        let player = player.clone();
        gloo_timers::callback::Interval::new(flush_every, move || player.flush()).forget();
    }

    if let Some(window) = web_sys::window() {
        let player = player.clone();
        let on_pagehide = Closure::wrap(Box::new(move || player.flush()) as Box<dyn FnMut()>);
        let _ = window
            .add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref());
        on_pagehide.forget();
    }

    Some(player)
}
