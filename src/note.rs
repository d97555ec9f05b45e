use serde::{Deserialize, Serialize};

/// A single note in the unified format.
///
/// `start` and `duration` are seconds, `velocity` is normalized to
/// 0.0-1.0. `start`, `duration`, `pitch` and `velocity` are required
/// when decoding; `channel` and `channel_name` fall back to their
/// defaults. An empty `channel_name` is omitted from the serialized
/// form entirely, so it round-trips to `""` rather than to an identical
/// representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub start: f64,
    pub duration: f64,
    pub pitch: u8,
    pub velocity: f64,
    #[serde(default)]
    pub channel: u8,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub channel_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn note(channel_name: &str) -> Note {
        Note {
            start: 1.5,
            duration: 0.25,
            pitch: 60,
            velocity: 0.5,
            channel: 0,
            channel_name: channel_name.to_string(),
        }
    }

    #[test]
    fn test_empty_channel_name_omitted() {
        let value = serde_json::to_value(note("")).unwrap();
        assert!(value.get("channel_name").is_none());
        assert_eq!(value["channel"], json!(0));
    }

    #[test]
    fn test_non_empty_channel_name_kept() {
        let value = serde_json::to_value(note("Piano")).unwrap();
        assert_eq!(value["channel_name"], json!("Piano"));
    }

    #[test]
    fn test_decode_defaults() {
        let decoded: Note = serde_json::from_value(json!({
            "start": 0.0,
            "duration": 1.0,
            "pitch": 64,
            "velocity": 0.8
        }))
        .unwrap();

        assert_eq!(decoded.channel, 0);
        assert_eq!(decoded.channel_name, "");
    }

    #[test]
    fn test_decode_missing_required_field() {
        let result: Result<Note, _> = serde_json::from_value(json!({
            "start": 0.0,
            "duration": 1.0,
            "pitch": 64
        }));

        let err = result.unwrap_err().to_string();
        assert!(err.contains("velocity"), "unexpected error: {}", err);
    }

    #[test]
    fn test_round_trip() {
        let original = note("Lead");
        let json = serde_json::to_string(&original).unwrap();
        let decoded: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);

        // Empty channel_name comes back as the default, not verbatim.
        let original = note("");
        let json = serde_json::to_string(&original).unwrap();
        let decoded: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(decoded.channel_name, "");
    }
}
