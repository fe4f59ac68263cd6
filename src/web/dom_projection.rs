// Projection onto externally owned DOM elements, looked up on every write.
use wasm_bindgen::JsCast;
use web_sys::{window, Document, HtmlElement, Node};

use crate::config::ElementIds;
use crate::projection::{Slot, UiProjection};

pub struct DomProjection {
    ids: ElementIds,
}

impl DomProjection {
    pub fn new(ids: ElementIds) -> Self {
        Self { ids }
    }

    fn lookup(&self, slot: Slot) -> Option<Node> {
        let document: Document = window()?.document()?;
        let by_id = |id: &str| document.get_element_by_id(id).map(Node::from);
        let nth_time = |index: u32| {
            document
                .query_selector_all(&format!(".{}", self.ids.time_class))
                .ok()?
                .item(index)
        };

        match slot {
            Slot::TrackTitle => by_id(&self.ids.track_title),
            Slot::TrackArtist => by_id(&self.ids.track_artist),
            Slot::PlayPause => by_id(&self.ids.play_button),
            Slot::ProgressFill => by_id(&self.ids.progress_fill),
            Slot::VolumeFill => by_id(&self.ids.volume_fill),
            Slot::Elapsed => nth_time(0),
            Slot::Duration => nth_time(1),
        }
    }
}

impl UiProjection for DomProjection {
    fn set_text(&mut self, slot: Slot, text: &str) {
        if let Some(node) = self.lookup(slot) {
            node.set_text_content(Some(text));
        }
    }

    fn set_fill(&mut self, slot: Slot, percent: f64) {
        let Some(element) = self
            .lookup(slot)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let _ = element.style().set_property("width", &format!("{percent}%"));
    }
}
