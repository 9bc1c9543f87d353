use super::*;
use std::sync::mpsc;

fn player() -> (PlayerIface, MprisHandle, mpsc::Receiver<ControlCmd>) {
    let status = Arc::new(Mutex::new(PlayerStatus::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        status: status.clone(),
    };
    (iface, MprisHandle { status }, rx)
}

fn playing_second_entry() -> PlayerStatus {
    PlayerStatus {
        playing: true,
        shuffle: true,
        volume: 0.25,
        index: Some(1),
        title: Some("b.mp3".to_string()),
        path: Some(PathBuf::from("/audio/b.mp3")),
        length: Duration::from_millis(180_000),
        position: Duration::from_millis(1_500),
    }
}

#[test]
fn publish_replaces_the_served_status() {
    let (iface, handle, _rx) = player();
    assert_eq!(iface.playback_status(), "Stopped");
    assert!(!iface.can_play());

    handle.publish(playing_second_entry());
    assert_eq!(iface.playback_status(), "Playing");
    assert!(iface.shuffle());
    assert_eq!(iface.volume(), 0.25);
    assert!(iface.can_play());
    assert!(iface.can_go_next());

    handle.publish(PlayerStatus::default());
    assert_eq!(iface.playback_status(), "Stopped");
    assert!(iface.metadata().is_empty());
}

#[test]
fn position_is_reported_in_microseconds_and_capped_at_length() {
    let (iface, handle, _rx) = player();
    handle.publish(playing_second_entry());
    assert_eq!(iface.position(), 1_500_000);

    handle.publish(PlayerStatus {
        position: Duration::from_secs(500),
        ..playing_second_entry()
    });
    assert_eq!(iface.position(), 180_000_000);
}

#[test]
fn player_methods_forward_commands_in_order() {
    let (mut iface, _handle, rx) = player();

    iface.play();
    iface.pause();
    iface.play_pause();
    iface.next();
    iface.previous();
    iface.stop();
    iface.set_shuffle(true);
    iface.set_volume(0.5);

    let cmds: Vec<ControlCmd> = rx.try_iter().collect();
    assert_eq!(
        cmds,
        vec![
            ControlCmd::Play,
            ControlCmd::Stop,
            ControlCmd::PlayPause,
            ControlCmd::Next,
            ControlCmd::Prev,
            ControlCmd::Stop,
            ControlCmd::SetShuffle(true),
            ControlCmd::SetVolume(0.5),
        ]
    );
}

#[test]
fn metadata_describes_the_current_entry() {
    let meta = playing_second_entry().metadata();

    let title: String = meta.get("xesam:title").cloned().unwrap().try_into().unwrap();
    assert_eq!(title, "b.mp3");

    let url: String = meta.get("xesam:url").cloned().unwrap().try_into().unwrap();
    assert_eq!(url, "file:///audio/b.mp3");

    let length: i64 = meta.get("mpris:length").cloned().unwrap().try_into().unwrap();
    assert_eq!(length, 180_000_000);

    assert!(meta.contains_key("mpris:trackid"));
}

#[test]
fn metadata_omits_unknown_length() {
    let status = PlayerStatus {
        length: Duration::ZERO,
        ..playing_second_entry()
    };
    let meta = status.metadata();
    assert!(!meta.contains_key("mpris:length"));
    assert!(meta.contains_key("xesam:title"));
}

#[test]
fn track_ids_follow_the_catalog_index() {
    let status = playing_second_entry();
    assert_eq!(
        status.track_id().map(|p| p.as_str().to_string()),
        Some("/org/cardplay/entry/1".to_string())
    );
    assert_eq!(PlayerStatus::default().track_id(), None);
}

#[test]
fn root_advertises_cataloged_formats() {
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let root = RootIface { tx };

    let mimes = root.supported_mime_types();
    assert_eq!(mimes.len(), FileType::KNOWN.len());
    assert!(mimes.contains(&"audio/flac".to_string()));
    assert_eq!(root.supported_uri_schemes(), vec!["file".to_string()]);
}
