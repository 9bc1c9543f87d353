//! File catalog: discovers playable audio files on the storage medium.
//!
//! The catalog is built once from a single directory (no recursion) and is
//! read-only afterwards. File types are derived from extensions.

mod kind;
mod model;
mod scan;
mod storage;

pub use kind::{FileType, classify};
pub use model::{AudioFileEntry, Catalog};
pub use scan::populate;
pub use storage::{FileEntry, FsStorage, Storage, normalize_root};

#[cfg(test)]
pub(crate) mod tests;
