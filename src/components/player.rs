use crate::components::PlayerContext;
use crate::config::ElementIds;
use crate::projection::GLYPH_PAUSED;
use dioxus::prelude::*;

/// Player controls. Text and fill widths are written by the controller's
/// projection; this component only lays out the elements it looks up.
#[component]
pub fn PlayerBar() -> Element {
    let player = use_context::<PlayerContext>().0;
    let ids = player
        .as_ref()
        .map(|p| p.with_controller(|c| c.config().elements.clone()))
        .unwrap_or_else(ElementIds::default);

    {
        let player = player.clone();
        use_effect(move || {
            if let Some(player) = &player {
                player.refresh();
            }
        });
    }

    let on_toggle = {
        let player = player.clone();
        move |_: MouseEvent| {
            if let Some(player) = &player {
                player.toggle();
            }
        }
    };

    let on_seek = {
        let player = player.clone();
        move |e: Event<FormData>| {
            if let (Some(player), Ok(percent)) = (&player, e.value().parse::<f64>()) {
                player.seek(percent);
            }
        }
    };

    let on_volume_change = {
        let player = player.clone();
        move |e: Event<FormData>| {
            if let (Some(player), Ok(val)) = (&player, e.value().parse::<f64>()) {
                player.set_volume(val / 100.0);
            }
        }
    };

    rsx! {
        div { class: "music-player",
            div { class: "track-info",
                span { id: ids.track_title.clone(), class: "track-title" }
                span { id: ids.track_artist.clone(), class: "track-artist" }
            }
            button {
                id: ids.play_button.clone(),
                r#type: "button",
                class: "play-btn",
                onclick: on_toggle,
                "{GLYPH_PAUSED}"
            }
            div { class: "progress",
                span { class: ids.time_class.clone(), "0:00" }
                div { class: "progress-bar",
                    div { id: ids.progress_fill.clone(), class: "progress-fill" }
                }
                span { class: ids.time_class.clone(), "0:00" }
                input {
                    r#type: "range",
                    min: "0",
                    max: "100",
                    step: "0.1",
                    oninput: on_seek,
                }
            }
            div { class: "volume",
                div { class: "volume-bar",
                    div { id: ids.volume_fill.clone(), class: "volume-fill" }
                }
                input {
                    r#type: "range",
                    min: "0",
                    max: "100",
                    oninput: on_volume_change,
                }
            }
        }
    }
}
