use std::fmt;
use std::path::Path;

/// Audio container/codec family, derived from a file extension.
///
/// The set is closed: every engine lookup matches on it exhaustively, so a new
/// format is a compile-time change everywhere it matters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum FileType {
    Wav,
    Mp3,
    Flac,
    Opus,
    Aac,
    #[default]
    Unknown,
}

impl FileType {
    /// All recognized (playable) types, in table order.
    pub const KNOWN: [FileType; 5] = [
        FileType::Wav,
        FileType::Mp3,
        FileType::Flac,
        FileType::Opus,
        FileType::Aac,
    ];

    /// Map a bare extension (no dot) to a type, ignoring case.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "wav" => FileType::Wav,
            "mp3" => FileType::Mp3,
            "flac" => FileType::Flac,
            "opus" => FileType::Opus,
            "aac" => FileType::Aac,
            _ => FileType::Unknown,
        }
    }

    pub fn is_known(self) -> bool {
        self != FileType::Unknown
    }

    pub fn label(self) -> &'static str {
        match self {
            FileType::Wav => "WAV",
            FileType::Mp3 => "MP3",
            FileType::Flac => "FLAC",
            FileType::Opus => "OPUS",
            FileType::Aac => "AAC",
            FileType::Unknown => "UNKNOWN",
        }
    }

    /// MIME type advertised to desktop integrations.
    pub fn mime_type(self) -> Option<&'static str> {
        match self {
            FileType::Wav => Some("audio/wav"),
            FileType::Mp3 => Some("audio/mpeg"),
            FileType::Flac => Some("audio/flac"),
            FileType::Opus => Some("audio/opus"),
            FileType::Aac => Some("audio/aac"),
            FileType::Unknown => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify `path` by its extension.
///
/// Paths without an extension (including dotfiles such as `.wav`, whose whole
/// name is the stem) classify as `Unknown`.
pub fn classify(path: &Path) -> FileType {
    path.extension()
        .and_then(|s| s.to_str())
        .map(FileType::from_extension)
        .unwrap_or(FileType::Unknown)
}
