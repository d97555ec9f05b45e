use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConvertError, Result};
use crate::note::Note;

/// Where a collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    #[default]
    Manual,
    Syntomid,
    FlStudio,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Manual => write!(f, "manual"),
            Source::Syntomid => write!(f, "syntomid"),
            Source::FlStudio => write!(f, "fl_studio"),
        }
    }
}

/// Collection metadata, kept as a raw JSON mapping.
///
/// Recognized keys are `title`, `bpm`, `time_signature` and
/// `duration_seconds`. The raw representation matters: `load` keeps
/// whatever mapping the file stored without filling in defaults, while
/// fresh constructions start from [`default_metadata`].
pub type Metadata = serde_json::Map<String, Value>;

/// Fully populated metadata for a fresh collection.
pub fn default_metadata() -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("title".to_string(), Value::from(""));
    metadata.insert("bpm".to_string(), Value::from(120));
    metadata.insert("time_signature".to_string(), Value::from("4/4"));
    metadata.insert("duration_seconds".to_string(), Value::from(0.0));
    metadata
}

fn default_version() -> String {
    "1.0".to_string()
}

/// An ordered list of notes plus metadata, the unified on-disk schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteCollection {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl NoteCollection {
    /// Fresh, empty collection. `None` metadata gets the full default
    /// mapping; the container is rebuilt per call, never shared.
    pub fn new(source: Source, metadata: Option<Metadata>) -> Self {
        NoteCollection {
            version: default_version(),
            source,
            metadata: metadata.unwrap_or_else(default_metadata),
            notes: Vec::new(),
        }
    }

    /// Write the collection as indented JSON, overwriting `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| ConvertError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        fs::write(path, json).map_err(|e| ConvertError::from_io(path, e))?;

        log::info!("saved {} notes to {}", self.notes.len(), path.display());
        Ok(())
    }

    /// Read a collection back from `path`.
    ///
    /// Missing `version`/`source` fall back to `"1.0"`/`manual`;
    /// `metadata` is taken as stored, without default-filling. A note
    /// record missing `start`, `duration`, `pitch` or `velocity` fails
    /// the whole load.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| ConvertError::from_io(path, e))?;
        serde_json::from_str(&data).map_err(|e| ConvertError::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
