use crate::catalog::{Track, TrackCatalog};
use crate::components::PlayerBar;
#[cfg(target_arch = "wasm32")]
use crate::config::PlayerConfig;
use crate::controller::SharedPlayer;
use dioxus::prelude::*;
use tracing::warn;

/// Player handle shared through context. `None` outside the browser.
#[derive(Clone, PartialEq)]
pub struct PlayerContext(pub Option<SharedPlayer>);

#[cfg(target_arch = "wasm32")]
fn mount_player() -> PlayerContext {
    let catalog = match TrackCatalog::builtin() {
        Ok(catalog) => catalog,
        Err(err) => {
            warn!(error = %err, "theme catalog unusable, player disabled");
            return PlayerContext(None);
        }
    };
    let config = PlayerConfig::builtin().unwrap_or_else(|err| {
        warn!(error = %err, "player configuration unusable, using defaults");
        PlayerConfig::default()
    });
    PlayerContext(crate::web::mount(config, catalog))
}

#[cfg(not(target_arch = "wasm32"))]
fn mount_player() -> PlayerContext {
    warn!("background music needs a browser, rendering without a player");
    PlayerContext(None)
}

/// `(key, label)` pairs for the theme buttons.
fn theme_buttons(player: &Option<SharedPlayer>) -> Vec<(String, String)> {
    let tracks: Vec<Track> = match player {
        Some(player) => player.with_controller(|c| c.catalog().tracks().to_vec()),
        None => TrackCatalog::builtin()
            .map(|catalog| catalog.tracks().to_vec())
            .unwrap_or_default(),
    };
    tracks
        .into_iter()
        .map(|track| (track.id.to_string(), track.artist))
        .collect()
}

#[component]
pub fn App() -> Element {
    let player = use_context_provider(mount_player).0;
    let themes = theme_buttons(&player);

    let on_restart = {
        let player = player.clone();
        move |_: MouseEvent| {
            if let Some(player) = &player {
                let current = player.state().current_track;
                player.select_track(current.as_str(), true);
            }
        }
    };

    rsx! {
        nav { class: "theme-picker",
            for (key, label) in themes {
                button {
                    key: "{key}",
                    r#type: "button",
                    class: "theme-btn",
                    onclick: {
                        let player = player.clone();
                        let key = key.clone();
                        move |_: MouseEvent| {
                            if let Some(player) = &player {
                                player.select_track(&key, false);
                            }
                        }
                    },
                    "{label}"
                }
            }
            button {
                id: "restartBtn",
                r#type: "button",
                class: "theme-btn",
                onclick: on_restart,
                "↺"
            }
        }
        PlayerBar {}
    }
}
