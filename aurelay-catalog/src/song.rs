//! Canonical song record and tolerant normalization.
//!
//! Raw catalog records are untrusted nested JSON: every field access must
//! tolerate absence or type mismatch. All helpers here default instead of
//! failing; only a missing item identifier makes a record unusable.

use serde::Serialize;
use serde_json::Value;

/// Artist sentinel used when the raw record names no artist.
const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// The normalized, stable-shape song record used by all catalog-facing
/// endpoints. Created fresh per response, never mutated, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Song {
    /// Opaque item identifier from the provider
    pub id: String,
    /// Track title, possibly empty
    pub title: String,
    /// First listed artist, or `"Unknown Artist"`
    pub artist: String,
    /// Duration in whole seconds; 0 when unparsable
    pub duration: u64,
    /// Highest-resolution thumbnail URL, or empty string
    pub thumbnail: String,
    /// Canonical watch-link derived from the id, not fetched
    #[serde(rename = "audioUrl")]
    pub audio_url: String,
}

impl Song {
    /// Normalizes a raw search or chart record.
    ///
    /// Returns `None` when the record lacks a usable `videoId`. Every
    /// other field falls back to a default on absence or shape mismatch.
    pub fn from_raw(raw: &Value) -> Option<Song> {
        let id = raw.get("videoId")?.as_str()?;
        if id.is_empty() {
            return None;
        }

        Some(Song {
            id: id.to_string(),
            title: string_field(raw, "title"),
            artist: first_artist(raw),
            duration: parse_duration(raw.get("duration").and_then(Value::as_str).unwrap_or("")),
            thumbnail: last_thumbnail(raw),
            audio_url: format!("https://www.youtube.com/watch?v={id}"),
        })
    }

    /// Normalizes a single-track lookup record.
    ///
    /// Lookup responses carry no `videoId` of their own (the caller already
    /// has it), and their watch-link points at the music frontend.
    pub fn from_lookup(video_id: &str, raw: &Value) -> Song {
        Song {
            id: video_id.to_string(),
            title: string_field(raw, "title"),
            artist: first_artist(raw),
            duration: parse_duration(raw.get("duration").and_then(Value::as_str).unwrap_or("")),
            thumbnail: last_thumbnail(raw),
            audio_url: format!("https://music.youtube.com/watch?v={video_id}"),
        }
    }
}

/// Parses a colon-delimited duration (`MM:SS` or `HH:MM:SS`) to seconds.
///
/// Any malformation - wrong component count, non-numeric part, empty
/// string - yields 0, never an error.
pub fn parse_duration(duration: &str) -> u64 {
    let parts: Vec<&str> = duration.split(':').collect();

    let parsed: Option<Vec<u64>> = parts.iter().map(|p| p.parse().ok()).collect();
    match parsed.as_deref() {
        Some([minutes, seconds]) => minutes * 60 + seconds,
        Some([hours, minutes, seconds]) => hours * 3600 + minutes * 60 + seconds,
        _ => 0,
    }
}

fn string_field(raw: &Value, key: &str) -> String {
    raw.get(key).and_then(Value::as_str).unwrap_or("").to_string()
}

/// Name of the first listed artist, or the fixed sentinel.
fn first_artist(raw: &Value) -> String {
    raw.get("artists")
        .and_then(Value::as_array)
        .and_then(|artists| artists.first())
        .and_then(|artist| artist.get("name"))
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_ARTIST)
        .to_string()
}

/// URL of the last listed thumbnail (providers order smallest to largest,
/// so last is highest resolution), or empty string.
fn last_thumbnail(raw: &Value) -> String {
    raw.get("thumbnails")
        .and_then(Value::as_array)
        .and_then(|thumbnails| thumbnails.last())
        .and_then(|thumbnail| thumbnail.get("url"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_duration_mm_ss() {
        assert_eq!(parse_duration("3:45"), 225);
        assert_eq!(parse_duration("0:07"), 7);
    }

    #[test]
    fn test_parse_duration_hh_mm_ss() {
        assert_eq!(parse_duration("1:02:03"), 3723);
    }

    #[test]
    fn test_parse_duration_malformed() {
        assert_eq!(parse_duration("bad"), 0);
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("5"), 0);
        assert_eq!(parse_duration("1:2:3:4"), 0);
        assert_eq!(parse_duration("3:xx"), 0);
    }

    #[test]
    fn test_from_raw_requires_video_id() {
        assert_eq!(Song::from_raw(&json!({"title": "No Id"})), None);
        assert_eq!(Song::from_raw(&json!({"videoId": 42})), None);
        assert_eq!(Song::from_raw(&json!({"videoId": ""})), None);
    }

    #[test]
    fn test_from_raw_minimal_record() {
        let song = Song::from_raw(&json!({"videoId": "abc"})).unwrap();

        assert_eq!(song.id, "abc");
        assert_eq!(song.title, "");
        assert_eq!(song.artist, "Unknown Artist");
        assert_eq!(song.duration, 0);
        assert_eq!(song.thumbnail, "");
        assert_eq!(song.audio_url, "https://www.youtube.com/watch?v=abc");
    }

    #[test]
    fn test_from_raw_full_record() {
        let song = Song::from_raw(&json!({
            "videoId": "xyz",
            "title": "Song Title",
            "duration": "3:45",
            "artists": [{"name": "First Artist"}, {"name": "Second Artist"}],
            "thumbnails": [
                {"url": "http://img/small.jpg", "width": 60},
                {"url": "http://img/large.jpg", "width": 544}
            ]
        }))
        .unwrap();

        assert_eq!(song.title, "Song Title");
        assert_eq!(song.artist, "First Artist");
        assert_eq!(song.duration, 225);
        assert_eq!(song.thumbnail, "http://img/large.jpg");
    }

    #[test]
    fn test_thumbnail_is_last_regardless_of_prefix() {
        let base = json!({
            "videoId": "t",
            "thumbnails": [{"url": "http://img/big.jpg"}]
        });
        let prefixed = json!({
            "videoId": "t",
            "thumbnails": [
                {"url": "http://img/tiny.jpg"},
                {"url": "http://img/small.jpg"},
                {"url": "http://img/big.jpg"}
            ]
        });

        assert_eq!(
            Song::from_raw(&base).unwrap().thumbnail,
            Song::from_raw(&prefixed).unwrap().thumbnail
        );
    }

    #[test]
    fn test_malformed_nested_shapes_default() {
        let song = Song::from_raw(&json!({
            "videoId": "m",
            "artists": "not-a-list",
            "thumbnails": [{"width": 60}],
            "duration": 225
        }))
        .unwrap();

        assert_eq!(song.artist, "Unknown Artist");
        assert_eq!(song.thumbnail, "");
        // Numeric durations are not the colon-delimited contract.
        assert_eq!(song.duration, 0);
    }

    #[test]
    fn test_from_lookup_uses_music_watch_link() {
        let song = Song::from_lookup("abc", &json!({"title": "T"}));

        assert_eq!(song.id, "abc");
        assert_eq!(song.audio_url, "https://music.youtube.com/watch?v=abc");
    }
}
