use rand::Rng;
use tracing::debug;

use crate::audio::AudioEngine;
use crate::controller::PlaybackController;
use crate::mpris::ControlCmd;

/// Apply one transport command to the controller. Returns `true` on quit.
///
/// Failures are already logged by the controller; they never stop the loop.
pub fn handle_control_cmd<E: AudioEngine, R: Rng>(
    cmd: ControlCmd,
    controller: &mut PlaybackController<E, R>,
    volume_step: f32,
) -> bool {
    let result = match &cmd {
        ControlCmd::Quit => {
            controller.stop();
            return true;
        }
        ControlCmd::Play => controller.play(),
        ControlCmd::Stop => {
            controller.stop();
            Ok(())
        }
        ControlCmd::PlayPause => controller.toggle_play(),
        ControlCmd::Next => controller.next(),
        ControlCmd::Prev => controller.prev(),
        ControlCmd::Randomize => controller.randomize(),
        ControlCmd::ToggleShuffle => {
            controller.toggle_shuffle();
            Ok(())
        }
        ControlCmd::SetShuffle(enable) => {
            controller.shuffle(*enable);
            Ok(())
        }
        ControlCmd::VolumeUp => {
            controller.set_volume(controller.volume() + volume_step);
            Ok(())
        }
        ControlCmd::VolumeDown => {
            controller.set_volume(controller.volume() - volume_step);
            Ok(())
        }
        ControlCmd::SetVolume(volume) => {
            controller.set_volume(*volume);
            Ok(())
        }
    };

    if let Err(e) = result {
        debug!(?cmd, error = %e, "command had no effect");
    }
    false
}
