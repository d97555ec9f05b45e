//! FL Studio piano roll JSON import.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::collection::{Metadata, NoteCollection, Source};
use crate::error::{ConvertError, Result};
use crate::file_stem;
use crate::note::Note;

/// Top level of the FL Studio export schema. Unknown keys are ignored;
/// note records share the unified [`Note`] field layout.
#[derive(Debug, Deserialize)]
struct FlExport {
    bpm: Option<u32>,
    time_signature: Option<String>,
    duration_seconds: Option<f64>,
    #[serde(default)]
    notes: Vec<Note>,
}

/// Convert an FL Studio piano roll JSON export.
///
/// Metadata comes from the file's top-level fields with defaults for
/// anything absent; the title is always the input file name stem.
/// Notes are kept in file order, without sorting.
pub fn from_json_file(path: &Path) -> Result<NoteCollection> {
    let data = fs::read_to_string(path).map_err(|e| ConvertError::from_io(path, e))?;
    let export: FlExport = serde_json::from_str(&data).map_err(|e| ConvertError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut metadata = Metadata::new();
    metadata.insert("title".to_string(), Value::from(file_stem(path)));
    metadata.insert("bpm".to_string(), Value::from(export.bpm.unwrap_or(120)));
    metadata.insert(
        "time_signature".to_string(),
        Value::from(export.time_signature.unwrap_or_else(|| "4/4".to_string())),
    );
    metadata.insert(
        "duration_seconds".to_string(),
        Value::from(export.duration_seconds.unwrap_or(0.0)),
    );

    let mut collection = NoteCollection::new(Source::FlStudio, Some(metadata));
    collection.notes = export.notes;
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn write_export(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("piano_roll.json");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_minimal_export() {
        let (_dir, path) = write_export(
            r#"{"bpm": 140, "notes": [{"start": 0, "duration": 1, "pitch": 64, "velocity": 0.8}]}"#,
        );

        let collection = from_json_file(&path).unwrap();

        assert_eq!(collection.source, Source::FlStudio);
        assert_eq!(collection.metadata["title"], json!("piano_roll"));
        assert_eq!(collection.metadata["bpm"], json!(140));
        assert_eq!(collection.metadata["time_signature"], json!("4/4"));
        assert_eq!(collection.metadata["duration_seconds"], json!(0.0));

        assert_eq!(collection.notes.len(), 1);
        let note = &collection.notes[0];
        assert_eq!(note.pitch, 64);
        assert_eq!(note.velocity, 0.8);
        assert_eq!(note.channel, 0);
        assert_eq!(note.channel_name, "");

        // The defaulted channel_name stays out of the serialized form
        let serialized = serde_json::to_value(note).unwrap();
        assert!(serialized.get("channel_name").is_none());
    }

    #[test]
    fn test_metadata_from_file() {
        let (_dir, path) = write_export(
            r#"{"bpm": 95, "time_signature": "3/4", "duration_seconds": 12.5, "notes": []}"#,
        );

        let collection = from_json_file(&path).unwrap();
        assert_eq!(collection.metadata["bpm"], json!(95));
        assert_eq!(collection.metadata["time_signature"], json!("3/4"));
        assert_eq!(collection.metadata["duration_seconds"], json!(12.5));
    }

    #[test]
    fn test_note_order_preserved() {
        let (_dir, path) = write_export(
            r#"{"notes": [
                {"start": 2.0, "duration": 0.5, "pitch": 67, "velocity": 0.9},
                {"start": 0.0, "duration": 0.5, "pitch": 60, "velocity": 0.9},
                {"start": 1.0, "duration": 0.5, "pitch": 64, "velocity": 0.9}
            ]}"#,
        );

        let collection = from_json_file(&path).unwrap();
        let starts: Vec<f64> = collection.notes.iter().map(|n| n.start).collect();
        // File order, deliberately not re-sorted
        assert_eq!(starts, vec![2.0, 0.0, 1.0]);
    }

    #[test]
    fn test_missing_notes_key() {
        let (_dir, path) = write_export(r#"{"bpm": 128}"#);

        let collection = from_json_file(&path).unwrap();
        assert!(collection.notes.is_empty());
    }

    #[test]
    fn test_note_missing_required_field() {
        let (_dir, path) = write_export(r#"{"notes": [{"start": 0, "pitch": 60, "velocity": 1}]}"#);

        match from_json_file(&path) {
            Err(ConvertError::Json { source, .. }) => {
                assert!(source.to_string().contains("duration"));
            }
            other => panic!("expected Json error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json() {
        let (_dir, path) = write_export("{");
        assert!(matches!(
            from_json_file(&path),
            Err(ConvertError::Json { .. })
        ));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (_dir, path) = write_export(
            r#"{"plugin": "FL Studio 21", "swing": 0.5, "notes": [], "bpm": 174}"#,
        );

        let collection = from_json_file(&path).unwrap();
        assert_eq!(collection.metadata["bpm"], json!(174));
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        fn arb_note() -> impl Strategy<Value = Note> {
            (
                0.0f64..600.0,
                0.0f64..8.0,
                0u8..=127,
                0.0f64..=1.0,
                0u8..=15,
                "[a-z]{0,8}",
            )
                .prop_map(
                    |(start, duration, pitch, velocity, channel, channel_name)| Note {
                        start,
                        duration,
                        pitch,
                        velocity,
                        channel,
                        channel_name,
                    },
                )
        }

        proptest! {
            #[test]
            fn prop_notes_survive_import(notes in prop::collection::vec(arb_note(), 0..32)) {
                let dir = tempdir().unwrap();
                let path = dir.path().join("export.json");
                let export = json!({ "bpm": 150, "notes": &notes });
                fs::write(&path, serde_json::to_string(&export).unwrap()).unwrap();

                let collection = from_json_file(&path).unwrap();
                prop_assert_eq!(collection.notes.len(), notes.len());
                prop_assert_eq!(collection.notes, notes);
            }
        }
    }
}
