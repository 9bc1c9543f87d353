use crate::audio::AudioEngine;
use crate::controller::PlaybackController;
use crate::mpris::{MprisHandle, PlayerStatus};

pub fn player_status<E: AudioEngine, R>(controller: &PlaybackController<E, R>) -> PlayerStatus {
    let entry = controller.current_entry();
    PlayerStatus {
        playing: controller.is_playing(),
        shuffle: controller.is_shuffle(),
        volume: controller.volume(),
        index: controller.current_index(),
        title: entry.map(|e| e.name()),
        path: entry.map(|e| e.path().to_path_buf()),
        length: controller.duration(),
        position: controller.position(),
    }
}

/// Refresh what MPRIS serves. Called once per loop iteration so `Position`
/// stays current.
pub fn update_mpris<E: AudioEngine, R>(mpris: &MprisHandle, controller: &PlaybackController<E, R>) {
    mpris.publish(player_status(controller));
}
