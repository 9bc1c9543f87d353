//! Audio subsystem: the engine interface the controller drives, and a
//! `rodio`-backed implementation with one sink per format.

mod engine;
mod meter;
mod sink;
mod types;

pub use engine::RodioEngine;
pub use types::{AudioEngine, DecodeChannel, PeakLevels};

#[cfg(test)]
mod tests;
