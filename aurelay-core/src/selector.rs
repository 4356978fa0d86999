//! Audio format selection policy.

use crate::resolver::CandidateFormat;

/// Picks the source URL to relay from an ordered candidate list.
///
/// Scans in provider-supplied order and commits to the FIRST entry that
/// carries audio; later audio-bearing entries are never considered.
/// Returns `None` when no candidate has audio, or when the chosen
/// candidate carries no URL (selection happens before the URL is
/// inspected).
pub fn select_audio_source(formats: &[CandidateFormat]) -> Option<&str> {
    formats
        .iter()
        .find(|format| format.has_audio())
        .and_then(|format| format.url.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(url: Option<&str>, codec: Option<&str>) -> CandidateFormat {
        CandidateFormat {
            url: url.map(String::from),
            audio_codec: codec.map(String::from),
        }
    }

    #[test]
    fn test_first_audio_candidate_wins() {
        let formats = vec![
            format(Some("http://a/video-only"), Some("none")),
            format(Some("http://a/first-audio"), Some("opus")),
            format(Some("http://a/second-audio"), Some("mp4a.40.2")),
        ];

        assert_eq!(select_audio_source(&formats), Some("http://a/first-audio"));
    }

    #[test]
    fn test_selection_is_order_sensitive() {
        let mut formats = vec![
            format(Some("http://a/opus"), Some("opus")),
            format(Some("http://a/aac"), Some("mp4a.40.2")),
        ];

        assert_eq!(select_audio_source(&formats), Some("http://a/opus"));
        formats.reverse();
        assert_eq!(select_audio_source(&formats), Some("http://a/aac"));
    }

    #[test]
    fn test_no_audio_candidates() {
        let formats = vec![
            format(Some("http://a/video"), Some("none")),
            format(Some("http://a/video2"), None),
        ];

        assert_eq!(select_audio_source(&formats), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(select_audio_source(&[]), None);
    }

    #[test]
    fn test_chosen_candidate_without_url() {
        // Selection commits before the URL is inspected: a later candidate
        // with both audio and a URL does not rescue the request.
        let formats = vec![
            format(None, Some("opus")),
            format(Some("http://a/aac"), Some("mp4a.40.2")),
        ];

        assert_eq!(select_audio_source(&formats), None);
    }
}
