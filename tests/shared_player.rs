mod common;

use futures_util::future::{FutureExt, LocalBoxFuture};
use std::rc::Rc;

use common::{FakeOutput, ManualClock, RecordingProjection, STORAGE_KEY};
use themebgm::{
    MemoryStore, OutputEvent, PlaybackController, PlayerConfig, RestorePhase, SharedPlayer,
    Slot, Spawner, TrackCatalog,
};

/// Polls each future once; fake play outcomes are always ready.
fn inline_spawner() -> Spawner {
    Rc::new(|future: LocalBoxFuture<'static, ()>| {
        let _ = future.now_or_never();
    })
}

fn shared(store: MemoryStore) -> (SharedPlayer, FakeOutput, RecordingProjection) {
    let output = FakeOutput::default();
    let ui = RecordingProjection::default();
    let controller = PlaybackController::new(
        TrackCatalog::builtin().unwrap(),
        PlayerConfig::default(),
        Box::new(output.clone()),
        Box::new(store),
        Box::new(ui.clone()),
        Box::new(ManualClock::default()),
    );
    (SharedPlayer::new(controller, inline_spawner()), output, ui)
}

#[test]
fn output_events_reach_the_controller_through_the_sink() {
    let store = MemoryStore::with_entry(
        STORAGE_KEY,
        r#"{"currentTrack":"metal","isPlaying":true,"currentTime":42,"volume":0.3,"progress":50}"#,
    );
    let (player, output, ui) = shared(store);
    assert!(player.initialize());
    assert!(!player.initialize());

    output.load_media(120.0);
    output.emit(OutputEvent::LoadedMetadata);
    output.emit(OutputEvent::LoadedData);

    assert_eq!(output.position(), 42.0);
    assert!(player.state().is_playing);
    assert_eq!(ui.text(Slot::Duration).as_deref(), Some("2:00"));
    assert_eq!(
        player.with_controller(|c| c.restore_phase()),
        RestorePhase::Ready
    );

    output.emit(OutputEvent::Ended);
    assert!(!player.state().is_playing);
    assert_eq!(player.state().current_time, 0.0);
}

#[test]
fn handle_drives_user_requests() {
    let store = MemoryStore::new();
    let (player, output, ui) = shared(store.clone());
    player.initialize();
    output.load_media(60.0);
    output.emit(OutputEvent::LoadedData);

    player.toggle();
    assert!(player.state().is_playing);

    player.seek(50.0);
    assert_eq!(output.position(), 30.0);

    player.set_volume(0.1);
    player.select_track("lofi", false);
    assert!(!player.state().is_playing);
    assert_eq!(ui.text(Slot::TrackArtist).as_deref(), Some("LOFI"));

    player.play();
    assert!(player.state().is_playing);
    player.pause();
    assert!(!player.state().is_playing);

    let saved: serde_json::Value =
        serde_json::from_str(&store.raw(STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(saved["currentTrack"], "lofi");
    assert_eq!(saved["volume"], 0.1);
}

#[test]
fn dropped_player_ignores_late_events() {
    let (player, output, _ui) = shared(MemoryStore::new());
    player.initialize();
    drop(player);

    output.load_media(60.0);
    output.emit(OutputEvent::LoadedData);
    assert_eq!(output.play_calls(), 0);
}

#[test]
fn refresh_repaints_every_slot() {
    let (player, output, ui) = shared(MemoryStore::new());
    player.initialize();
    output.load_media(95.0);
    output.advance_to(65.0);

    player.refresh();

    assert_eq!(ui.text(Slot::TrackTitle).as_deref(), Some("Track 1"));
    assert_eq!(ui.text(Slot::TrackArtist).as_deref(), Some("RAP"));
    assert_eq!(ui.text(Slot::Elapsed).as_deref(), Some("1:05"));
    assert_eq!(ui.text(Slot::Duration).as_deref(), Some("1:35"));
    assert_eq!(ui.fill(Slot::VolumeFill), Some(70.0));
    assert_eq!(ui.fill(Slot::ProgressFill), Some(35.0));
}
