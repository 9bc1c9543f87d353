//! Utilities for creating `rodio` sinks from file paths.
//!
//! The helpers here encapsulate opening/decoding a file, working out its
//! length, and preparing a paused `Sink` wired through the peak meter.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::mixer::Mixer;
use rodio::{Decoder, Sink, Source};

use crate::error::EngineError;

use super::meter::{Metered, PeakMeter};

pub(super) fn open_source(path: &Path) -> Result<Decoder<BufReader<File>>, EngineError> {
    let file = File::open(path).map_err(|source| EngineError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Decoder::new(BufReader::new(file)).map_err(|e| EngineError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Container-level duration, for streams whose decoder cannot tell (MP3, ADTS).
pub(super) fn tag_length(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}

/// Create a paused `Sink` for `path` plus the file's length (zero if unknown).
pub(super) fn create_sink(
    mixer: &Mixer,
    path: &Path,
    meter: Arc<PeakMeter>,
) -> Result<(Sink, Duration), EngineError> {
    let source = open_source(path)?;
    let length = source
        .total_duration()
        .or_else(|| tag_length(path))
        .unwrap_or(Duration::ZERO);

    let sink = Sink::connect_new(mixer);
    sink.append(Metered::new(source, meter));
    sink.pause();
    Ok((sink, length))
}
