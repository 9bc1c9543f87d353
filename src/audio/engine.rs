use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rodio::mixer::Mixer;
use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::debug;

use crate::error::EngineError;
use crate::library::FileType;

use super::meter::PeakMeter;
use super::sink::create_sink;
use super::types::{AudioEngine, DecodeChannel, PeakLevels};

/// A `rodio::Sink` dedicated to one format.
pub struct RodioChannel {
    file_type: FileType,
    mixer: Mixer,
    meter: Arc<PeakMeter>,
    sink: Option<Sink>,
    length: Duration,
    gain: f32,
}

impl RodioChannel {
    fn new(file_type: FileType, mixer: Mixer, meter: Arc<PeakMeter>) -> Self {
        Self {
            file_type,
            mixer,
            meter,
            sink: None,
            length: Duration::ZERO,
            gain: 1.0,
        }
    }

    fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(gain);
        }
    }

    /// A file was started and its samples have all been handed to the mixer.
    fn drained(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| s.empty())
    }
}

impl DecodeChannel for RodioChannel {
    fn play(&mut self, path: &Path) -> Result<(), EngineError> {
        self.stop();

        let (sink, length) = create_sink(&self.mixer, path, self.meter.clone())?;
        sink.set_volume(self.gain);
        sink.play();

        debug!(
            channel = %self.file_type,
            path = %path.display(),
            length_ms = length.as_millis() as u64,
            "decode started"
        );
        self.sink = Some(sink);
        self.length = length;
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.length = Duration::ZERO;
    }

    fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|s| !s.empty() && !s.is_paused())
    }

    fn position_millis(&self) -> u64 {
        if self.drained() {
            return self.length_millis();
        }
        self.sink
            .as_ref()
            .map_or(0, |s| s.get_pos().as_millis() as u64)
    }

    fn length_millis(&self) -> u64 {
        let ms = self.length.as_millis() as u64;
        // Unknown length: report a drained stream as 1ms long so it reads as finished.
        if ms == 0 && self.drained() { 1 } else { ms }
    }
}

/// Engine backed by the default output device.
///
/// `rodio` mixes on its own thread; every `Sink` operation is synchronized
/// with that thread, so starting, stopping and gain changes are atomic with
/// respect to the output callback. OPUS has no decoder in `rodio`, so the
/// engine exposes no channel for it and dispatch fails cleanly.
pub struct RodioEngine {
    _stream: OutputStream,
    wav: RodioChannel,
    mp3: RodioChannel,
    flac: RodioChannel,
    aac: RodioChannel,
    meter: Arc<PeakMeter>,
}

impl RodioEngine {
    pub fn open_default() -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::Output(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let mixer = stream.mixer().clone();
        let meter = Arc::new(PeakMeter::default());
        let channel = |t| RodioChannel::new(t, mixer.clone(), meter.clone());

        Ok(Self {
            wav: channel(FileType::Wav),
            mp3: channel(FileType::Mp3),
            flac: channel(FileType::Flac),
            aac: channel(FileType::Aac),
            _stream: stream,
            meter,
        })
    }

    fn slot(&self, file_type: FileType) -> Option<&RodioChannel> {
        match file_type {
            FileType::Wav => Some(&self.wav),
            FileType::Mp3 => Some(&self.mp3),
            FileType::Flac => Some(&self.flac),
            FileType::Aac => Some(&self.aac),
            FileType::Opus | FileType::Unknown => None,
        }
    }

    fn slot_mut(&mut self, file_type: FileType) -> Option<&mut RodioChannel> {
        match file_type {
            FileType::Wav => Some(&mut self.wav),
            FileType::Mp3 => Some(&mut self.mp3),
            FileType::Flac => Some(&mut self.flac),
            FileType::Aac => Some(&mut self.aac),
            FileType::Opus | FileType::Unknown => None,
        }
    }
}

impl AudioEngine for RodioEngine {
    fn channel(&self, file_type: FileType) -> Option<&dyn DecodeChannel> {
        self.slot(file_type).map(|c| c as &dyn DecodeChannel)
    }

    fn channel_mut(&mut self, file_type: FileType) -> Option<&mut dyn DecodeChannel> {
        self.slot_mut(file_type).map(|c| c as &mut dyn DecodeChannel)
    }

    fn set_gain(&mut self, gain: f32) {
        for file_type in FileType::KNOWN {
            if let Some(ch) = self.slot_mut(file_type) {
                ch.set_gain(gain);
            }
        }
    }

    fn peak(&self) -> PeakLevels {
        self.meter.take()
    }
}
