use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Everything that can go wrong during a conversion.
///
/// All variants abort the run; there is no partial-output or
/// skip-bad-note recovery.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// MIDI parsing support was not compiled in.
    #[error("MIDI support is not available (build with the `midi` feature enabled)")]
    MidiUnavailable,

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Extension not recognized while auto-detecting the source format.
    #[error("cannot auto-detect format for extension `{0}`")]
    UnsupportedFormat(String),

    /// Invalid JSON, or a note record missing a required field.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Malformed MIDI data. Carries the parser's reason as a string so
    /// the `MidiParser` trait stays independent of any concrete library.
    #[error("invalid MIDI file: {0}")]
    Midi(String),

    #[error("failed to read or write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// Map an I/O error on `path`, keeping the not-found case distinct.
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConvertError::FileNotFound(path.to_path_buf())
        } else {
            ConvertError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
