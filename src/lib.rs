//! SynToMid and FL Studio to unified JSON note converter
//!
//! This library converts piano-video MIDI exports (SynToMid) and FL
//! Studio piano roll JSON exports into one DAW-agnostic note
//! collection schema.

pub mod collection;
pub mod error;
pub mod fl_studio;
pub mod midi;
pub mod note;
pub mod syntomid;

// Re-export main types for convenience
pub use collection::{default_metadata, Metadata, NoteCollection, Source};
pub use error::{ConvertError, Result};
pub use note::Note;

/// File name without its extension, for default titles and output paths.
pub fn file_stem(path: &std::path::Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("output")
}
