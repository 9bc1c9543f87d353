use std::ffi::OsStr;
use std::path::Path;

use tracing::{debug, info, trace};

use crate::error::CatalogError;

use super::kind::{FileType, classify};
use super::model::{AudioFileEntry, Catalog};
use super::storage::{Storage, normalize_root};

fn is_hidden(name: &OsStr) -> bool {
    name.as_encoded_bytes().starts_with(b".")
}

/// Scan `root` once and build the catalog of playable files.
///
/// Subdirectories are listed by the medium but never descended into. Entries
/// keep the medium's order.
pub fn populate<S: Storage>(storage: &S, root: &Path) -> Result<Catalog, CatalogError> {
    let root = normalize_root(root);
    let entries = storage
        .open_directory(&root)
        .map_err(|source| CatalogError::StorageUnavailable {
            path: root.clone(),
            source,
        })?;

    let mut files: Vec<AudioFileEntry> = Vec::new();
    for entry in entries {
        let name = entry.name();
        if entry.is_dir || is_hidden(name) {
            trace!(?name, "skipping directory or hidden entry");
            continue;
        }

        let path = root.join(name);
        let file_type = classify(&path);
        if file_type == FileType::Unknown {
            trace!(?name, "skipping unrecognized file type");
            continue;
        }

        debug!(path = %path.display(), %file_type, "audio file found");
        files.push(AudioFileEntry::new(path, file_type));
    }

    info!(root = %root.display(), total = files.len(), "catalog populated");
    Ok(Catalog::new(root, files))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::FsStorage;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_hidden_checks_leading_dot_only() {
        assert!(is_hidden(OsStr::new(".hidden.wav")));
        assert!(is_hidden(OsStr::new("._b.mp3")));
        assert!(!is_hidden(OsStr::new("a.wav")));
        assert!(!is_hidden(OsStr::new("a.b.wav")));
    }

    #[test]
    fn populate_filters_hidden_non_audio_and_subdirectories() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("a.flac"), b"not a real flac").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();
        fs::write(dir.path().join(".d.wav"), b"hidden").unwrap();
        let sub = dir.path().join("sub.wav");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.wav"), b"not real").unwrap();

        let catalog = populate(&FsStorage::new(true), dir.path()).unwrap();
        assert_eq!(catalog.len(), 2);

        let mut names: Vec<String> = catalog.iter().map(|e| e.name()).collect();
        names.sort();
        assert_eq!(names, vec!["a.flac".to_string(), "b.MP3".to_string()]);

        for entry in catalog.iter() {
            assert!(entry.path().starts_with(dir.path()));
        }
    }

    #[test]
    fn populate_missing_directory_is_storage_unavailable() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = populate(&FsStorage::default(), &missing).unwrap_err();
        assert!(matches!(err, CatalogError::StorageUnavailable { .. }));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn populate_rejects_a_plain_file_as_root() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.wav");
        fs::write(&file, b"x").unwrap();

        let err = populate(&FsStorage::default(), &file).unwrap_err();
        assert!(matches!(err, CatalogError::StorageUnavailable { .. }));
    }
}
