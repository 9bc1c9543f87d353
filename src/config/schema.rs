use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/cardplay/config.toml` or `~/.config/cardplay/config.toml`
///
/// Precedence (highest wins):
/// 1) Command-line flags
/// 2) Environment variables (prefix `CARDPLAY__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory holding the audio files. Only its immediate entries are
    /// cataloged. Falls back to the working directory when unset.
    pub directory: Option<PathBuf>,
    /// Whether to follow symlinks when listing the directory.
    pub follow_links: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            directory: None,
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Start playing the first entry right after the scan.
    pub autoplay: bool,
    /// Output gain in `[0, 1]`.
    pub volume: f32,
    /// Interval between completion polls (milliseconds).
    pub tick_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            shuffle: false,
            autoplay: true,
            volume: 0.5,
            tick_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Volume change per `+`/`-` key press.
    pub volume_step: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ cardplay ~ ".to_string(),
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Log file used while the terminal UI owns the screen.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
