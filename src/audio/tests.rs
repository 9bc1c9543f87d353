use std::sync::Arc;

use rodio::Source;
use rodio::buffer::SamplesBuffer;

use super::meter::{Metered, PeakMeter};
use super::sink::{open_source, tag_length};
use super::types::PeakLevels;
use crate::error::EngineError;

#[test]
fn peak_meter_tracks_each_side_and_resets_on_take() {
    let meter = PeakMeter::default();
    meter.record(0, 2, 0.25);
    meter.record(1, 2, -0.75);
    meter.record(0, 2, -0.5);
    meter.record(1, 2, 0.1);

    assert_eq!(
        meter.take(),
        PeakLevels {
            left: 0.5,
            right: 0.75
        }
    );
    assert_eq!(meter.take(), PeakLevels::default());
}

#[test]
fn peak_meter_mono_feeds_both_sides_and_ignores_nan() {
    let meter = PeakMeter::default();
    meter.record(0, 1, -0.4);
    meter.record(0, 1, f32::NAN);

    let peak = meter.take();
    assert_eq!(peak.left, 0.4);
    assert_eq!(peak.right, 0.4);
}

#[test]
fn metered_source_passes_samples_through_and_records_peaks() {
    let meter = Arc::new(PeakMeter::default());
    let buffer = SamplesBuffer::new(2, 44_100, vec![0.1, -0.9, 0.6, 0.2]);
    let metered = Metered::new(buffer, meter.clone());

    assert_eq!(metered.channels(), 2);
    assert_eq!(metered.sample_rate(), 44_100);

    let samples: Vec<f32> = metered.collect();
    assert_eq!(samples, vec![0.1, -0.9, 0.6, 0.2]);

    let peak = meter.take();
    assert_eq!(peak.left, 0.6);
    assert_eq!(peak.right, 0.9);
}

#[test]
fn open_source_reports_missing_file_as_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.wav");

    let err = open_source(&missing).err().unwrap();
    assert!(matches!(err, EngineError::Open { .. }));
}

#[test]
fn open_source_reports_garbage_as_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.wav");
    std::fs::write(&path, b"definitely not RIFF data").unwrap();

    let err = open_source(&path).err().unwrap();
    assert!(matches!(err, EngineError::Decode { .. }));
    assert!(tag_length(&path).is_none());
}
