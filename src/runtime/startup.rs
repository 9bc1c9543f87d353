use rand::Rng;
use tracing::info;

use crate::audio::AudioEngine;
use crate::config;
use crate::controller::PlaybackController;

/// Startup playback choices after merging the CLI over the settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartupOptions {
    pub shuffle: bool,
    pub autoplay: bool,
    pub volume: f32,
}

impl StartupOptions {
    pub fn resolve(settings: &config::Settings, cli_shuffle: bool, cli_no_autoplay: bool) -> Self {
        Self {
            shuffle: settings.playback.shuffle || cli_shuffle,
            autoplay: settings.playback.autoplay && !cli_no_autoplay,
            volume: settings.playback.volume,
        }
    }
}

/// Apply startup defaults to a freshly scanned controller.
///
/// Playback starts at the first entry; shuffle only affects later advances.
pub fn apply_playback_defaults<E: AudioEngine, R: Rng>(
    controller: &mut PlaybackController<E, R>,
    opts: StartupOptions,
) {
    controller.set_volume(opts.volume);
    controller.shuffle(opts.shuffle);

    if controller.catalog().is_empty() {
        return;
    }

    if opts.autoplay {
        let _ = controller.play();
    } else {
        info!("autoplay disabled, waiting for a command");
    }
}
