use std::path::{Path, PathBuf};

use crate::error::CatalogError;

use super::kind::FileType;

/// One playable file found during the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFileEntry {
    path: PathBuf,
    file_type: FileType,
}

impl AudioFileEntry {
    pub(crate) fn new(path: PathBuf, file_type: FileType) -> Self {
        Self { path, file_type }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// File name without the directory, for display.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Ordered list of playable files, in the order the medium yielded them.
///
/// Built once by [`super::populate`]; there is no way to add or remove entries
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    root: PathBuf,
    entries: Vec<AudioFileEntry>,
}

impl Catalog {
    pub(crate) fn new(root: PathBuf, entries: Vec<AudioFileEntry>) -> Self {
        Self { root, entries }
    }

    /// The scanned directory, always ending with a path separator.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`; never wraps.
    pub fn entry_at(&self, index: usize) -> Result<&AudioFileEntry, CatalogError> {
        self.entries.get(index).ok_or(CatalogError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &AudioFileEntry> {
        self.entries.iter()
    }
}
