//! Peak-level metering for visualization.
//!
//! `Metered` wraps a `rodio` source and records the largest absolute sample
//! seen on each side; the UI reads and resets it once per redraw.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use rodio::{ChannelCount, Sample, SampleRate, Source};

use super::types::PeakLevels;

#[derive(Debug, Default)]
pub struct PeakMeter {
    left: AtomicU32,
    right: AtomicU32,
}

impl PeakMeter {
    /// Record one interleaved sample. `channel` is its position in the frame.
    pub fn record(&self, channel: usize, channels: usize, sample: f32) {
        let level = sample.abs();
        if level.is_nan() {
            return;
        }
        // Non-negative floats order the same as their bit patterns.
        let bits = level.to_bits();
        if channels <= 1 {
            self.left.fetch_max(bits, Ordering::Relaxed);
            self.right.fetch_max(bits, Ordering::Relaxed);
        } else if channel % 2 == 0 {
            self.left.fetch_max(bits, Ordering::Relaxed);
        } else {
            self.right.fetch_max(bits, Ordering::Relaxed);
        }
    }

    /// Return the peaks since the last call and reset them.
    pub fn take(&self) -> PeakLevels {
        PeakLevels {
            left: f32::from_bits(self.left.swap(0, Ordering::Relaxed)),
            right: f32::from_bits(self.right.swap(0, Ordering::Relaxed)),
        }
    }
}

/// Source adapter feeding every sample through a [`PeakMeter`].
pub struct Metered<S> {
    inner: S,
    meter: Arc<PeakMeter>,
    frame_pos: usize,
}

impl<S: Source> Metered<S> {
    pub fn new(inner: S, meter: Arc<PeakMeter>) -> Self {
        Self {
            inner,
            meter,
            frame_pos: 0,
        }
    }
}

impl<S: Source> Iterator for Metered<S> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        let sample = self.inner.next()?;
        let channels = usize::from(self.inner.channels()).max(1);
        self.meter.record(self.frame_pos, channels, sample);
        self.frame_pos = (self.frame_pos + 1) % channels;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S: Source> Source for Metered<S> {
    fn current_span_len(&self) -> Option<usize> {
        self.inner.current_span_len()
    }

    fn channels(&self) -> ChannelCount {
        self.inner.channels()
    }

    fn sample_rate(&self) -> SampleRate {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }
}
