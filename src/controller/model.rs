//! The playback state machine: cursor, shuffle mode and play/stop state.
//!
//! `PlaybackController` is driven from a single thread by transport commands
//! and a periodic [`PlaybackController::tick`]. It owns the catalog after
//! `begin` and talks to the engine only through [`AudioEngine`].

use std::path::Path;

use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{debug, info, warn};

use crate::audio::{AudioEngine, PeakLevels};
use crate::error::{CatalogError, PlaybackError, PlaybackResult};
use crate::library::{AudioFileEntry, Catalog, FileType, Storage, populate};

use super::session::{PlayState, PlaybackSession, next_index, prev_index, random_other_index};

/// Gain applied at `begin` unless changed.
pub const DEFAULT_VOLUME: f32 = 0.5;

pub struct PlaybackController<E, R = ThreadRng> {
    pub(super) engine: E,
    catalog: Catalog,
    pub(super) session: PlaybackSession,
    rng: R,
    volume: f32,
    empty_reported: bool,
}

impl<E: AudioEngine> PlaybackController<E, ThreadRng> {
    pub fn new(engine: E) -> Self {
        Self::with_rng(engine, rand::rng())
    }
}

impl<E: AudioEngine, R: Rng> PlaybackController<E, R> {
    /// Create a controller with an explicit random source (seeded in tests).
    pub fn with_rng(engine: E, rng: R) -> Self {
        Self {
            engine,
            catalog: Catalog::default(),
            session: PlaybackSession::default(),
            rng,
            volume: DEFAULT_VOLUME,
            empty_reported: false,
        }
    }

    /// Scan `root` and reset the cursor. Returns the number of playable files.
    ///
    /// An unopenable directory is returned as an error for the caller to treat
    /// as fatal; an empty directory is only reported.
    pub fn begin<S: Storage>(&mut self, storage: &S, root: &Path) -> Result<usize, CatalogError> {
        let catalog = populate(storage, root)?;
        self.load_catalog(catalog);
        self.engine.set_gain(self.volume);
        Ok(self.catalog.len())
    }

    /// Replace the catalog and return to `Idle` at index 0. Shuffle mode is kept.
    pub fn load_catalog(&mut self, catalog: Catalog) {
        self.engine.stop_all();
        self.session = PlaybackSession {
            shuffle: self.session.shuffle,
            ..PlaybackSession::default()
        };
        self.catalog = catalog;
        self.empty_reported = false;

        if self.catalog.is_empty() {
            self.report_empty();
        } else {
            for (i, entry) in self.catalog.iter().enumerate() {
                info!(index = i, path = %entry.path().display(), "catalog entry");
            }
        }
    }

    fn report_empty(&mut self) {
        if !self.empty_reported {
            warn!(root = %self.catalog.root().display(), "no playable audio files found");
            self.empty_reported = true;
        }
    }

    fn require_entries(&mut self) -> PlaybackResult<usize> {
        if self.catalog.is_empty() {
            self.report_empty();
            return Err(PlaybackError::EmptyCatalog);
        }
        Ok(self.catalog.len())
    }

    /// Stop whatever is sounding and dispatch the entry under the cursor.
    ///
    /// A failed dispatch leaves the controller `Idle` and is not retried.
    pub fn play(&mut self) -> PlaybackResult<()> {
        self.require_entries()?;

        self.engine.stop_all();
        self.session.state = PlayState::Idle;

        let index = self.session.current_index;
        let path = self.catalog.entry_at(index)?.path().to_path_buf();

        match self.play_audio_file(&path) {
            Ok(()) => {
                self.session.state = PlayState::Playing;
                info!(index, path = %path.display(), "playing audio file");
                Ok(())
            }
            Err(e) => {
                warn!(index, error = %e, "could not play audio file");
                Err(e)
            }
        }
    }

    /// Stop every engine channel, whichever one is believed active.
    pub fn stop(&mut self) {
        self.session.state = PlayState::Idle;
        self.engine.stop_all();
        debug!("playback stopped");
    }

    pub fn toggle_play(&mut self) -> PlaybackResult<()> {
        if self.is_playing() {
            self.stop();
            Ok(())
        } else {
            self.play()
        }
    }

    /// Advance the cursor (or pick a random entry when shuffling). Playback
    /// restarts on the new entry only if something was playing.
    pub fn next(&mut self) -> PlaybackResult<()> {
        let len = self.require_entries()?;
        if self.session.shuffle {
            return self.randomize();
        }

        self.session.current_index = next_index(self.session.current_index, len);
        debug!(index = self.session.current_index, "cursor moved to next entry");
        self.resume_if_playing()
    }

    pub fn prev(&mut self) -> PlaybackResult<()> {
        let len = self.require_entries()?;
        if self.session.shuffle {
            return self.randomize();
        }

        self.session.current_index = prev_index(self.session.current_index, len);
        debug!(index = self.session.current_index, "cursor moved to previous entry");
        self.resume_if_playing()
    }

    /// Jump to a random entry other than the current one.
    ///
    /// With a single entry the cursor stays put (and the entry restarts if it
    /// was playing).
    pub fn randomize(&mut self) -> PlaybackResult<()> {
        let len = self.require_entries()?;
        let from = self.session.current_index;
        let to = random_other_index(&mut self.rng, from, len);

        self.session.current_index = to;
        info!(from, to, "randomized cursor");
        self.resume_if_playing()
    }

    fn resume_if_playing(&mut self) -> PlaybackResult<()> {
        if self.is_playing() { self.play() } else { Ok(()) }
    }

    pub fn shuffle(&mut self, enable: bool) {
        self.session.shuffle = enable;
        info!(shuffle = enable, "shuffle mode set");
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle(!self.session.shuffle);
    }

    /// Poll for track completion. Returns `Ok(true)` when it advanced.
    ///
    /// At most one advance happens per call.
    pub fn tick(&mut self) -> PlaybackResult<bool> {
        if !self.is_playing() || !self.file_finished() {
            return Ok(false);
        }

        info!(index = self.session.current_index, "file finished");
        if self.session.shuffle {
            self.randomize()?;
        } else {
            self.next()?;
        }
        Ok(true)
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
        self.volume = volume;
        self.engine.set_gain(volume);
        debug!(volume, "volume set");
    }
}

impl<E: AudioEngine, R> PlaybackController<E, R> {
    pub fn is_playing(&self) -> bool {
        self.session.state == PlayState::Playing
    }

    pub fn state(&self) -> PlayState {
        self.session.state
    }

    pub fn is_shuffle(&self) -> bool {
        self.session.shuffle
    }

    /// Cursor position, `None` while the catalog is empty.
    pub fn current_index(&self) -> Option<usize> {
        (!self.catalog.is_empty()).then_some(self.session.current_index)
    }

    pub fn current_entry(&self) -> Option<&AudioFileEntry> {
        self.catalog.entry_at(self.session.current_index).ok()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn currently_playing_type(&self) -> FileType {
        self.session.currently_playing_type
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Peak levels since the last call, for visualization.
    pub fn peak(&self) -> PeakLevels {
        self.engine.peak()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}
