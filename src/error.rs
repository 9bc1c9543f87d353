//! Error types for catalog construction, engine dispatch and playback commands.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::library::FileType;

/// Failures while building or reading the catalog. Both are fatal at the
/// boundary: the first means the medium is unusable, the second means a
/// caller and the catalog disagree about its size.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("storage unavailable: cannot open {}: {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("index {index} out of range for catalog of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failures reported by an audio engine sub-channel.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine has no sub-channel for this type.
    #[error("no decoder channel for {0} files")]
    Unsupported(FileType),

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("audio output error: {0}")]
    Output(String),
}

/// Failures of transport commands. None of these leave the controller in an
/// inconsistent state.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no playable files in catalog")]
    EmptyCatalog,

    #[error("could not play {}: {source}", path.display())]
    DispatchFailed {
        path: PathBuf,
        #[source]
        source: EngineError,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type PlaybackResult<T> = std::result::Result<T, PlaybackError>;
