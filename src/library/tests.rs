use std::io;
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use super::*;
use crate::error::CatalogError;

/// In-memory medium: a fixed listing per directory, yielded in order.
#[derive(Debug, Default, Clone)]
pub(crate) struct MemoryStorage {
    dirs: Vec<(PathBuf, Vec<FileEntry>)>,
}

impl MemoryStorage {
    pub(crate) fn with_dir(mut self, path: &str, entries: Vec<FileEntry>) -> Self {
        self.dirs.push((normalize_root(Path::new(path)), entries));
        self
    }

    pub(crate) fn with_files(self, path: &str, names: &[&str]) -> Self {
        let entries = names.iter().map(|n| FileEntry::file(*n)).collect();
        self.with_dir(path, entries)
    }
}

impl Storage for MemoryStorage {
    type Entries = std::vec::IntoIter<FileEntry>;

    fn open_directory(&self, path: &Path) -> io::Result<Self::Entries> {
        self.dirs
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, entries)| entries.clone().into_iter())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such directory"))
    }
}

#[test]
fn classify_matches_known_extensions_case_insensitive() {
    assert_eq!(classify(Path::new("/audio/a.wav")), FileType::Wav);
    assert_eq!(classify(Path::new("/audio/a.WAV")), FileType::Wav);
    assert_eq!(classify(Path::new("/audio/a.Mp3")), FileType::Mp3);
    assert_eq!(classify(Path::new("/audio/a.flac")), FileType::Flac);
    assert_eq!(classify(Path::new("/audio/a.OPUS")), FileType::Opus);
    assert_eq!(classify(Path::new("/audio/a.aac")), FileType::Aac);
    assert_eq!(classify(Path::new("/audio/a.ogg")), FileType::Unknown);
    assert_eq!(classify(Path::new("/audio/a.wav.bak")), FileType::Unknown);
    assert_eq!(classify(Path::new("/audio/wav")), FileType::Unknown);
    assert_eq!(classify(Path::new("/audio/.wav")), FileType::Unknown);
}

#[test]
fn normalize_root_adds_separator_once() {
    assert_eq!(normalize_root(Path::new("/audio")), PathBuf::from("/audio/"));
    assert_eq!(normalize_root(Path::new("/audio/")), PathBuf::from("/audio/"));
    let twice = normalize_root(&normalize_root(Path::new("/audio")));
    assert_eq!(twice, PathBuf::from("/audio/"));
}

#[test]
fn populate_keeps_medium_order_and_joins_paths() {
    let storage = MemoryStorage::default().with_files(
        "/audio",
        &["c.flac", "a.wav", "notes.txt", "b.mp3", ".Trashes", "._a.wav"],
    );

    let catalog = populate(&storage, Path::new("/audio")).unwrap();
    let paths: Vec<&Path> = catalog.iter().map(|e| e.path()).collect();
    assert_eq!(
        paths,
        vec![
            Path::new("/audio/c.flac"),
            Path::new("/audio/a.wav"),
            Path::new("/audio/b.mp3"),
        ]
    );
    assert_eq!(catalog.root(), Path::new("/audio/"));

    let types: Vec<FileType> = catalog.iter().map(|e| e.file_type()).collect();
    assert_eq!(types, vec![FileType::Flac, FileType::Wav, FileType::Mp3]);
}

#[test]
fn populate_with_trailing_separator_gives_same_paths() {
    let storage = MemoryStorage::default().with_files("/audio", &["a.wav"]);

    let a = populate(&storage, Path::new("/audio")).unwrap();
    let b = populate(&storage, Path::new("/audio/")).unwrap();
    assert_eq!(a.entry_at(0).unwrap(), b.entry_at(0).unwrap());
    assert_eq!(a.entry_at(0).unwrap().path(), Path::new("/audio/a.wav"));
}

#[test]
fn populate_skips_directories_even_with_audio_names() {
    let storage = MemoryStorage::default().with_dir(
        "/audio",
        vec![FileEntry::dir("album.flac"), FileEntry::file("track.flac")],
    );

    let catalog = populate(&storage, Path::new("/audio")).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.entry_at(0).unwrap().name(), "track.flac");
}

#[test]
fn populate_unopenable_directory_is_storage_unavailable() {
    let storage = MemoryStorage::default();
    let err = populate(&storage, Path::new("/audio")).unwrap_err();
    match err {
        CatalogError::StorageUnavailable { path, source } => {
            assert_eq!(path, PathBuf::from("/audio/"));
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn entry_at_out_of_range_fails_instead_of_wrapping() {
    let storage = MemoryStorage::default().with_files("/audio", &["a.wav", "b.wav"]);
    let catalog = populate(&storage, Path::new("/audio")).unwrap();

    assert!(catalog.entry_at(1).is_ok());
    let err = catalog.entry_at(2).unwrap_err();
    assert!(matches!(err, CatalogError::IndexOutOfRange { index: 2, len: 2 }));
}

#[test]
fn empty_catalog_is_valid() {
    let storage = MemoryStorage::default().with_files("/audio", &[]);
    let catalog = populate(&storage, Path::new("/audio")).unwrap();
    assert!(catalog.is_empty());
    assert!(catalog.entry_at(0).is_err());
}

#[cfg(unix)]
#[test]
fn normalize_root_keeps_non_utf8_bytes() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let root = normalize_root(Path::new(OsStr::from_bytes(b"/media/caf\xe9")));
    assert_eq!(root.as_os_str().as_bytes(), b"/media/caf\xe9/");
    assert_eq!(normalize_root(&root), root);
}

#[cfg(unix)]
#[test]
fn non_utf8_names_are_cataloged_under_their_real_paths() {
    use std::ffi::OsStr;
    use std::fs;
    use std::os::unix::ffi::OsStrExt;

    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join(OsStr::from_bytes(b"caf\xe9"));
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join(OsStr::from_bytes(b"\xffsong.wav")), b"not real").unwrap();

    let catalog = populate(&FsStorage::new(true), &dir).unwrap();
    assert_eq!(catalog.len(), 1);

    let entry = catalog.entry_at(0).unwrap();
    assert_eq!(entry.file_type(), FileType::Wav);
    assert!(entry.path().exists());
    assert!(entry.path().starts_with(&dir));
}

#[cfg(unix)]
#[test]
fn dangling_symlinks_are_skipped_without_failing_the_scan() {
    use std::fs;

    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("a.wav"), b"not real").unwrap();
    std::os::unix::fs::symlink(tmp.path().join("gone.mp3"), tmp.path().join("b.mp3")).unwrap();

    let catalog = populate(&FsStorage::new(true), tmp.path()).unwrap();
    let names: Vec<String> = catalog.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["a.wav".to_string()]);
}

fn ext_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("wav".to_string()),
        Just("mp3".to_string()),
        Just("flac".to_string()),
        Just("opus".to_string()),
        Just("aac".to_string()),
    ]
}

proptest! {
    #[test]
    fn recognized_extensions_classify_in_any_case(
        ext in ext_strategy(),
        mask in prop::collection::vec(any::<bool>(), 4),
        stem in "[a-z0-9_]{1,12}",
    ) {
        let mixed: String = ext
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
            .collect();
        let path = PathBuf::from(format!("/audio/{stem}.{mixed}"));
        prop_assert_eq!(classify(&path), FileType::from_extension(&ext));
        prop_assert!(classify(&path).is_known());
    }

    #[test]
    fn other_extensions_classify_unknown(ext in "[a-z0-9]{1,6}") {
        prop_assume!(!["wav", "mp3", "flac", "opus", "aac"].contains(&ext.as_str()));
        let path = PathBuf::from(format!("/audio/track.{ext}"));
        prop_assert_eq!(classify(&path), FileType::Unknown);
    }

    #[test]
    fn hidden_and_non_audio_only_gives_empty_catalog(
        hidden in prop::collection::vec("\\.[a-z]{1,8}\\.(wav|mp3|flac)", 0..6),
        other in prop::collection::vec("[a-z]{1,8}\\.(txt|jpg|ogg|m4a)", 0..6),
    ) {
        let names: Vec<&str> = hidden.iter().chain(other.iter()).map(String::as_str).collect();
        let storage = MemoryStorage::default().with_files("/audio", &names);
        let catalog = populate(&storage, Path::new("/audio")).unwrap();
        prop_assert_eq!(catalog.len(), 0);
    }
}
