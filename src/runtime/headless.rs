use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::audio::AudioEngine;
use crate::controller::PlaybackController;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::commands::handle_control_cmd;
use crate::runtime::mpris_sync::update_mpris;

/// Loop without a terminal: wait up to one tick for a remote command, then
/// poll for track completion. Returns when a quit command arrives.
pub fn run<E: AudioEngine, R: Rng>(
    controller: &mut PlaybackController<E, R>,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    tick: Duration,
    volume_step: f32,
) -> anyhow::Result<()> {
    info!(tick_ms = tick.as_millis() as u64, "running headless");

    loop {
        match control_rx.recv_timeout(tick) {
            Ok(cmd) => {
                if handle_control_cmd(cmd, controller, volume_step) {
                    info!("quit requested");
                    return Ok(());
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        }

        if let Err(e) = controller.tick() {
            debug!(error = %e, "auto-advance failed");
        }
        update_mpris(mpris, controller);
    }
}
