//! SynToMid (piano video) MIDI import.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::collection::{Metadata, NoteCollection, Source};
use crate::error::{ConvertError, Result};
use crate::file_stem;
use crate::midi::{self, MidiEventKind, MidiFile, MidiParser};
use crate::note::Note;

/// Duration assigned to every imported note, in seconds.
///
/// Note-offs are never matched back to their note-ons; SynToMid
/// captures key presses from video, so the fixed value stands in for
/// real durations.
pub const NOTE_DURATION: f64 = 0.25;

/// Convert a SynToMid MIDI file using the compiled-in parser.
///
/// Returns [`ConvertError::MidiUnavailable`] when the crate was built
/// without the `midi` feature. `None` metadata gets
/// `{title: file stem, bpm: 120}`. Metadata is fixed at call time,
/// never derived from the file's tempo events.
pub fn from_midi_file(path: &Path, metadata: Option<Metadata>) -> Result<NoteCollection> {
    let parser = midi::default_parser().ok_or(ConvertError::MidiUnavailable)?;
    from_midi_file_with(parser, path, metadata)
}

/// Convert a SynToMid MIDI file with an explicit parser.
pub fn from_midi_file_with(
    parser: &dyn MidiParser,
    path: &Path,
    metadata: Option<Metadata>,
) -> Result<NoteCollection> {
    let bytes = fs::read(path).map_err(|e| ConvertError::from_io(path, e))?;
    let midi = parser.parse(&bytes)?;

    let metadata = metadata.unwrap_or_else(|| {
        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), Value::from(file_stem(path)));
        metadata.insert("bpm".to_string(), Value::from(120));
        metadata
    });

    let mut collection = NoteCollection::new(Source::Syntomid, Some(metadata));
    collection.notes = collect_notes(&midi);
    Ok(collection)
}

/// Walk every track with its own running clock and tempo, emit one note
/// per sounding note-on, then sort the whole list by start time.
///
/// Tracks are not merged into a global timeline: each restarts at tick
/// 0 with the default tempo, and a tempo event only affects later
/// events in its own track. Ignored events still advance the clock.
fn collect_notes(midi: &MidiFile) -> Vec<Note> {
    let mut notes = Vec::new();

    for track in &midi.tracks {
        let mut current_time = 0.0; // ticks
        let mut tempo = midi::DEFAULT_TEMPO;

        for event in track {
            current_time += event.delta as f64;

            match event.kind {
                MidiEventKind::Tempo(new_tempo) => tempo = new_tempo,
                MidiEventKind::NoteOn {
                    channel,
                    key,
                    velocity,
                } if velocity > 0 => {
                    let start =
                        current_time * (tempo as f64 / 1_000_000.0) / midi.ticks_per_beat as f64;
                    notes.push(Note {
                        start,
                        duration: NOTE_DURATION,
                        pitch: key,
                        velocity: velocity as f64 / 127.0,
                        channel,
                        channel_name: String::new(),
                    });
                }
                _ => {}
            }
        }
    }

    // Stable sort: simultaneous notes keep their emission order
    notes.sort_by(|a, b| a.start.total_cmp(&b.start));
    notes
}
