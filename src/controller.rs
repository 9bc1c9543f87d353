//! Playback controller: the playlist cursor and play/stop state machine.
//!
//! The controller lives in `controller::model`; dispatch and progress
//! queries against the engine live in `controller::dispatch`.

mod dispatch;
mod model;
mod session;

pub use model::*;
pub use session::PlayState;
