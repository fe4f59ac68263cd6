// `<audio>` element backed output handle.
use futures_util::future::{ready, FutureExt};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, HtmlAudioElement};

use crate::error::OutputError;
use crate::output::{known_duration, AudioOutput, EventSink, OutputEvent, PlayOutcome};

pub struct HtmlAudioOutput {
    element: HtmlAudioElement,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
}

impl HtmlAudioOutput {
    /// Reuse the page's audio element with this id or create a hidden one.
    ///
    /// A reused element is replaced by a bare clone of itself: clones carry
    /// attributes but no listeners, so handlers attached by an earlier
    /// incarnation of the player cannot fire twice.
    pub fn acquire(element_id: &str) -> Option<Self> {
        let document = window()?.document()?;

        let element = if let Some(existing) = document.get_element_by_id(element_id) {
            let existing: HtmlAudioElement = existing.dyn_into().ok()?;
            let fresh: HtmlAudioElement = existing.clone_node().ok()?.dyn_into().ok()?;
            existing.replace_with_with_node_1(&fresh).ok()?;
            fresh
        } else {
            let audio: HtmlAudioElement =
                document.create_element("audio").ok()?.dyn_into().ok()?;
            audio.set_id(element_id);
            audio.set_hidden(true);
            audio.set_attribute("preload", "auto").ok()?;
            document.body()?.append_child(&audio).ok()?;
            audio
        };

        Some(Self {
            element,
            listeners: Vec::new(),
        })
    }

    fn listen(&mut self, sink: &EventSink, event: OutputEvent) {
        let name = event.dom_name();
        let sink = sink.clone();
        let callback = Closure::wrap(Box::new(move || sink(event.clone())) as Box<dyn FnMut()>);
        let _ = self
            .element
            .add_event_listener_with_callback(name, callback.as_ref().unchecked_ref());
        self.listeners.push((name, callback));
    }

    fn listen_for_errors(&mut self, sink: &EventSink) {
        let sink = sink.clone();
        let element = self.element.clone();
        let callback = Closure::wrap(Box::new(move || {
            sink(OutputEvent::Error(media_error_message(&element)))
        }) as Box<dyn FnMut()>);
        let _ = self
            .element
            .add_event_listener_with_callback("error", callback.as_ref().unchecked_ref());
        self.listeners.push(("error", callback));
    }
}

fn media_error_message(audio: &HtmlAudioElement) -> String {
    let code = audio.error().map(|e| e.code()).unwrap_or(0);
    match code {
        1 => "playback was aborted before the source loaded".to_string(),
        2 => "network error while loading the track".to_string(),
        3 => "audio could not be decoded".to_string(),
        4 => format!("unsupported or missing source `{}`", audio.src()),
        _ => "unable to load the audio source".to_string(),
    }
}

impl AudioOutput for HtmlAudioOutput {
    fn set_source(&mut self, uri: &str) {
        self.element.set_src(uri);
    }

    fn source(&self) -> Option<String> {
        let src = self.element.src();
        if src.is_empty() {
            None
        } else {
            Some(src)
        }
    }

    fn play(&mut self) -> PlayOutcome {
        match self.element.play() {
            Ok(promise) => async move {
                wasm_bindgen_futures::JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|e| OutputError::Rejected(format!("{e:?}")))
            }
            .boxed_local(),
            Err(e) => ready(Err(OutputError::Rejected(format!("{e:?}")))).boxed_local(),
        }
    }

    fn pause(&mut self) {
        let _ = self.element.pause();
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn duration(&self) -> Option<f64> {
        known_duration(self.element.duration())
    }

    fn volume(&self) -> f64 {
        self.element.volume()
    }

    fn set_volume(&mut self, volume: f64) {
        self.element.set_volume(volume);
    }

    fn subscribe(&mut self, sink: EventSink) {
        self.listen(&sink, OutputEvent::TimeUpdate);
        self.listen(&sink, OutputEvent::LoadedMetadata);
        self.listen(&sink, OutputEvent::LoadedData);
        self.listen(&sink, OutputEvent::Ended);
        self.listen_for_errors(&sink);
    }

    fn clear_subscriptions(&mut self) {
        for (name, callback) in self.listeners.drain(..) {
            let _ = self
                .element
                .remove_event_listener_with_callback(name, callback.as_ref().unchecked_ref());
        }
    }
}
