use rand::Rng;

use crate::library::FileType;

/// Whether a dispatch is believed to be sounding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Idle,
    Playing,
}

/// Mutable playback bookkeeping owned by the controller.
#[derive(Debug, Clone, Default)]
pub(crate) struct PlaybackSession {
    /// Always `< catalog.len()` while the catalog is non-empty.
    pub(crate) current_index: usize,
    pub(crate) state: PlayState,
    pub(crate) shuffle: bool,
    /// Type of the last attempted dispatch, successful or not.
    pub(crate) currently_playing_type: FileType,
}

pub(crate) fn next_index(index: usize, len: usize) -> usize {
    (index + 1) % len
}

pub(crate) fn prev_index(index: usize, len: usize) -> usize {
    if index == 0 { len - 1 } else { index - 1 }
}

/// Uniform pick among every index except `current`.
///
/// Draws from `len - 1` slots and skips over `current`. A single-entry list
/// has no other index, so `current` is returned as is.
pub(crate) fn random_other_index<R: Rng + ?Sized>(rng: &mut R, current: usize, len: usize) -> usize {
    if len <= 1 {
        return current;
    }
    let draw = rng.random_range(0..len - 1);
    if draw >= current { draw + 1 } else { draw }
}
