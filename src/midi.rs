//! MIDI parsing capability.
//!
//! The importer in [`crate::syntomid`] depends on the [`MidiParser`]
//! trait rather than on a concrete MIDI library. The midly-backed
//! implementation lives behind the default-on `midi` cargo feature;
//! when the feature is disabled, [`default_parser`] returns `None` and
//! the importer reports the capability as unavailable instead of
//! failing to build.

use crate::error::Result;

/// Default tempo in microseconds per quarter note (120 BPM).
pub const DEFAULT_TEMPO: u32 = 500_000;

/// Decodes raw MIDI bytes into the neutral event model below.
pub trait MidiParser {
    fn parse(&self, bytes: &[u8]) -> Result<MidiFile>;
}

/// A parsed MIDI file, reduced to what conversion needs.
#[derive(Debug, Clone)]
pub struct MidiFile {
    pub ticks_per_beat: u32,
    pub tracks: Vec<Vec<MidiEvent>>,
}

/// A delta-timed track event.
///
/// Every event keeps its delta, including [`MidiEventKind::Other`], so
/// the running clock still advances across events the conversion
/// ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiEvent {
    pub delta: u32,
    pub kind: MidiEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEventKind {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    /// Tempo change, in microseconds per quarter note.
    Tempo(u32),
    /// Anything else (note-offs included); only the delta matters.
    Other,
}

/// The compiled-in parser, if any.
pub fn default_parser() -> Option<&'static dyn MidiParser> {
    #[cfg(feature = "midi")]
    {
        Some(&MidlyParser)
    }
    #[cfg(not(feature = "midi"))]
    {
        None
    }
}

#[cfg(feature = "midi")]
pub use midly_parser::MidlyParser;

#[cfg(feature = "midi")]
mod midly_parser {
    use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

    use super::{MidiEvent, MidiEventKind, MidiFile, MidiParser};
    use crate::error::{ConvertError, Result};

    /// [`MidiParser`] backed by the midly crate.
    pub struct MidlyParser;

    impl MidiParser for MidlyParser {
        fn parse(&self, bytes: &[u8]) -> Result<MidiFile> {
            let smf = Smf::parse(bytes).map_err(|e| ConvertError::Midi(e.to_string()))?;

            let ticks_per_beat = match smf.header.timing {
                Timing::Metrical(tpb) => tpb.as_int() as u32,
                Timing::Timecode(fps, subframe) => {
                    // Rough ticks-per-beat equivalent for timecode files
                    (fps.as_f32() * subframe as f32 * 4.0) as u32
                }
            };

            let tracks = smf
                .tracks
                .iter()
                .map(|track| {
                    track
                        .iter()
                        .map(|event| MidiEvent {
                            delta: event.delta.as_int(),
                            kind: match event.kind {
                                TrackEventKind::Midi {
                                    channel,
                                    message: MidiMessage::NoteOn { key, vel },
                                } => MidiEventKind::NoteOn {
                                    channel: channel.as_int(),
                                    key: key.as_int(),
                                    velocity: vel.as_int(),
                                },
                                TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => {
                                    MidiEventKind::Tempo(tempo.as_int())
                                }
                                _ => MidiEventKind::Other,
                            },
                        })
                        .collect()
                })
                .collect();

            Ok(MidiFile {
                ticks_per_beat,
                tracks,
            })
        }
    }
}
