use std::path::Path;
use std::time::Duration;

use crate::audio::{AudioEngine, DecodeChannel};
use crate::error::{EngineError, PlaybackError, PlaybackResult};
use crate::library::{FileType, classify};

use super::model::PlaybackController;

impl<E: AudioEngine, R> PlaybackController<E, R> {
    /// Route `path` to the engine channel matching its type.
    ///
    /// The attempted type is recorded even when the dispatch fails, so later
    /// progress queries go to the same channel (and read 0).
    pub fn play_audio_file(&mut self, path: &Path) -> PlaybackResult<()> {
        let file_type = classify(path);
        self.session.currently_playing_type = file_type;

        let result = match self.engine.channel_mut(file_type) {
            Some(channel) if file_type.is_known() => channel.play(path),
            _ => Err(EngineError::Unsupported(file_type)),
        };

        result.map_err(|source| PlaybackError::DispatchFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    fn active_channel(&self) -> Option<&dyn DecodeChannel> {
        match self.session.currently_playing_type {
            FileType::Unknown => None,
            known => self.engine.channel(known),
        }
    }

    /// Fraction of the current file played, in `[0, 1]`.
    ///
    /// 0 for an unknown type, a missing channel, or a zero-length report.
    pub fn progress(&self) -> f32 {
        let Some(channel) = self.active_channel() else {
            return 0.0;
        };
        let length = channel.length_millis();
        if length == 0 {
            return 0.0;
        }
        (channel.position_millis() as f64 / length as f64).clamp(0.0, 1.0) as f32
    }

    pub fn file_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Total length of the current file, zero for an unknown type.
    pub fn duration(&self) -> Duration {
        self.active_channel()
            .map_or(Duration::ZERO, |c| Duration::from_millis(c.length_millis()))
    }

    /// Position within the current file, capped at its length.
    pub fn position(&self) -> Duration {
        self.active_channel().map_or(Duration::ZERO, |c| {
            Duration::from_millis(c.position_millis().min(c.length_millis()))
        })
    }

    /// Whether the engine itself reports the active channel as sounding.
    pub fn engine_active(&self) -> bool {
        self.active_channel().is_some_and(|c| c.is_playing())
    }
}
