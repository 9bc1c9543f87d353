//! Audio engine collaborator interface.
//!
//! The controller never decodes anything itself: it talks to an engine that
//! owns one decode/output sub-channel per supported format.

use std::path::Path;

use crate::error::EngineError;
use crate::library::FileType;

/// One decode/output pipeline dedicated to a single format.
pub trait DecodeChannel {
    /// Start decoding `path` from the beginning.
    fn play(&mut self, path: &Path) -> Result<(), EngineError>;
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
    /// Current position. Once the decode has drained this equals
    /// [`DecodeChannel::length_millis`].
    fn position_millis(&self) -> u64;
    /// Total length of the loaded file, 0 when nothing is loaded.
    fn length_millis(&self) -> u64;
}

/// Left/right peak amplitude since the last read, in `[0, 1]` for sane input.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PeakLevels {
    pub left: f32,
    pub right: f32,
}

/// The set of decode channels plus global output controls.
///
/// Implementations must make channel start/stop and gain changes atomic with
/// respect to their own output callback, so a half-reconfigured signal is
/// never rendered.
pub trait AudioEngine {
    /// Sub-channel for `file_type`, or `None` if the engine cannot play it.
    fn channel(&self, file_type: FileType) -> Option<&dyn DecodeChannel>;

    fn channel_mut(&mut self, file_type: FileType) -> Option<&mut dyn DecodeChannel>;

    /// Stop every sub-channel regardless of which one is active.
    fn stop_all(&mut self) {
        for file_type in FileType::KNOWN {
            if let Some(ch) = self.channel_mut(file_type) {
                ch.stop();
            }
        }
    }

    /// Output gain in `[0, 1]`.
    fn set_gain(&mut self, gain: f32);

    /// Read and reset the peak levels. Engines without metering return zeros.
    fn peak(&self) -> PeakLevels {
        PeakLevels::default()
    }
}
