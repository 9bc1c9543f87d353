//! MPRIS D-Bus service so desktop media keys and `playerctl` can drive the
//! controller. Method calls become [`ControlCmd`]s for the runtime loop;
//! properties are read from the last published [`PlayerStatus`].

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, mpsc::Sender};
use std::time::Duration;

use async_io::block_on;
use tracing::{debug, warn};
use zbus::{Connection, connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::library::FileType;

const BUS_NAME: &str = "org.mpris.MediaPlayer2.cardplay";
const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";

/// Transport commands issued by a front-end.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlCmd {
    Quit,
    Play,
    Stop,
    PlayPause,
    Next,
    Prev,
    Randomize,
    ToggleShuffle,
    SetShuffle(bool),
    VolumeUp,
    VolumeDown,
    SetVolume(f32),
}

/// What MPRIS clients see of the controller, refreshed by the runtime loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStatus {
    pub playing: bool,
    pub shuffle: bool,
    pub volume: f32,
    /// Cursor position; `None` while the catalog is empty.
    pub index: Option<usize>,
    pub title: Option<String>,
    pub path: Option<PathBuf>,
    pub length: Duration,
    pub position: Duration,
}

fn micros(d: Duration) -> i64 {
    i64::try_from(d.as_micros()).unwrap_or(i64::MAX)
}

impl PlayerStatus {
    /// One object path per catalog index.
    fn track_id(&self) -> Option<ObjectPath<'static>> {
        let index = self.index?;
        ObjectPath::try_from(format!("/org/cardplay/entry/{index}")).ok()
    }

    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let mut put = |key: &str, value: Value<'_>| {
            if let Ok(v) = OwnedValue::try_from(value) {
                map.insert(key.to_string(), v);
            }
        };

        if let Some(id) = self.track_id() {
            put("mpris:trackid", Value::from(id));
        }
        if let Some(title) = &self.title {
            put("xesam:title", Value::from(title.as_str()));
        }
        if let Some(path) = &self.path {
            put("xesam:url", Value::from(format!("file://{}", path.display())));
        }
        if !self.length.is_zero() {
            put("mpris:length", Value::from(micros(self.length)));
        }
        map
    }
}

#[derive(Clone)]
pub struct MprisHandle {
    status: Arc<Mutex<PlayerStatus>>,
}

impl MprisHandle {
    pub fn publish(&self, status: PlayerStatus) {
        if let Ok(mut s) = self.status.lock() {
            *s = status;
        }
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "cardplay"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    /// Every cataloged format, including ones the engine cannot decode.
    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        FileType::KNOWN
            .iter()
            .filter_map(|t| t.mime_type())
            .map(str::to_string)
            .collect()
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    status: Arc<Mutex<PlayerStatus>>,
}

impl PlayerIface {
    fn read<T: Default>(&self, f: impl FnOnce(&PlayerStatus) -> T) -> T {
        self.status.lock().map(|s| f(&s)).unwrap_or_default()
    }

    fn send(&self, cmd: ControlCmd) {
        let _ = self.tx.send(cmd);
    }
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        self.send(ControlCmd::Next);
    }

    fn previous(&self) {
        self.send(ControlCmd::Prev);
    }

    fn play(&self) {
        self.send(ControlCmd::Play);
    }

    // There is no paused state: pausing stops, and play restarts the entry.
    fn pause(&self) {
        self.send(ControlCmd::Stop);
    }

    fn play_pause(&self) {
        self.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        self.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        if self.read(|s| s.playing) { "Playing" } else { "Stopped" }
    }

    #[zbus(property)]
    fn shuffle(&self) -> bool {
        self.read(|s| s.shuffle)
    }

    #[zbus(property)]
    fn set_shuffle(&mut self, shuffle: bool) {
        self.send(ControlCmd::SetShuffle(shuffle));
    }

    #[zbus(property)]
    fn volume(&self) -> f64 {
        self.read(|s| f64::from(s.volume))
    }

    #[zbus(property)]
    fn set_volume(&mut self, volume: f64) {
        self.send(ControlCmd::SetVolume(volume as f32));
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        self.read(PlayerStatus::metadata)
    }

    #[zbus(property)]
    fn position(&self) -> i64 {
        self.read(|s| micros(s.position.min(s.length)))
    }

    #[zbus(property)]
    fn rate(&self) -> f64 {
        1.0
    }

    #[zbus(property)]
    fn minimum_rate(&self) -> f64 {
        1.0
    }

    #[zbus(property)]
    fn maximum_rate(&self) -> f64 {
        1.0
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        self.read(|s| s.index.is_some())
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        self.read(|s| s.playing)
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        self.read(|s| s.index.is_some())
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        self.read(|s| s.index.is_some())
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        false
    }
}

async fn serve(tx: Sender<ControlCmd>, status: Arc<Mutex<PlayerStatus>>) -> zbus::Result<Connection> {
    connection::Builder::session()?
        .name(BUS_NAME)?
        .serve_at(OBJECT_PATH, RootIface { tx: tx.clone() })?
        .serve_at(OBJECT_PATH, PlayerIface { tx, status })?
        .build()
        .await
}

/// Register the service on the session bus from a background thread. A
/// missing bus only costs remote control, so failures are logged.
pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let status = Arc::new(Mutex::new(PlayerStatus::default()));

    let served = status.clone();
    std::thread::spawn(move || {
        block_on(async move {
            match serve(tx, served).await {
                Ok(_connection) => {
                    debug!(name = BUS_NAME, "MPRIS service registered");
                    std::future::pending::<()>().await;
                }
                Err(e) => warn!(error = %e, "MPRIS unavailable"),
            }
        });
    });

    MprisHandle { status }
}

#[cfg(test)]
mod tests;
