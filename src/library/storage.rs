//! Storage medium access used by the catalog scan.
//!
//! The scan only needs to open one directory and walk its immediate entries,
//! so the collaborator surface is a single trait with an iterator of names.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// A directory entry as reported by the medium.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Raw name as stored on the medium, not necessarily UTF-8.
    pub name: OsString,
    pub is_dir: bool,
}

impl FileEntry {
    pub fn file(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    pub fn name(&self) -> &OsStr {
        &self.name
    }
}

/// Access to a mounted medium.
pub trait Storage {
    type Entries: Iterator<Item = FileEntry>;

    /// Open `path` for iteration. Iteration ends when the iterator returns
    /// `None`; entry order is whatever the medium yields.
    fn open_directory(&self, path: &Path) -> io::Result<Self::Entries>;
}

/// Local filesystem storage (an SD card mounted by the OS, a USB stick, ...).
#[derive(Debug, Clone, Default)]
pub struct FsStorage {
    follow_links: bool,
}

impl FsStorage {
    pub fn new(follow_links: bool) -> Self {
        Self { follow_links }
    }
}

impl Storage for FsStorage {
    type Entries = Box<dyn Iterator<Item = FileEntry>>;

    fn open_directory(&self, path: &Path) -> io::Result<Self::Entries> {
        // WalkDir defers the read_dir error to the first item; surface it here.
        let meta = std::fs::metadata(path)?;
        if !meta.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{} is not a directory", path.display()),
            ));
        }
        std::fs::read_dir(path)?;

        let walker = WalkDir::new(path)
            .follow_links(self.follow_links)
            .min_depth(1)
            .max_depth(1);

        let entries = walker.into_iter().filter_map(|entry| match entry {
            Ok(e) => Some(FileEntry {
                name: e.file_name().to_os_string(),
                is_dir: e.file_type().is_dir(),
            }),
            Err(e) => {
                // Dangling symlinks and unreadable entries end up here.
                warn!(error = %e, "skipping unreadable directory entry");
                None
            }
        });

        Ok(Box::new(entries))
    }
}

/// Append a trailing separator to `root` unless it already has one.
///
/// Works on the raw bytes, so non-UTF-8 roots are kept intact.
pub fn normalize_root(root: &Path) -> PathBuf {
    let bytes = root.as_os_str().as_encoded_bytes();
    if bytes.is_empty() || bytes.ends_with(b"/") || bytes.ends_with(MAIN_SEPARATOR_STR.as_bytes()) {
        return root.to_path_buf();
    }
    let mut s = root.as_os_str().to_owned();
    s.push(MAIN_SEPARATOR_STR);
    PathBuf::from(s)
}
