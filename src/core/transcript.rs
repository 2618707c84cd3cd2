use crate::core::video::VideoId;
use crate::error::{Error, Result};
use yt_transcript_rs::{FetchedTranscriptSnippet, api::YouTubeTranscriptApi};

/// Caption language preference; the upstream tool reads the default English
/// track only.
const LANGUAGES: &[&str] = &["en"];

#[derive(Clone)]
pub struct TranscriptService {
    api: YouTubeTranscriptApi,
}

impl TranscriptService {
    pub fn new() -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| Error::custom(format!("Failed to initialize transcript client: {e}")))?;
        Ok(Self { api })
    }

    /// Fetch the full transcript for a video as one string: caption fragments
    /// in their original order, joined by single spaces. No retries and no
    /// caching here; skipping a refetch of the already-loaded video is the
    /// session's job.
    pub async fn fetch(&self, video_id: &VideoId) -> Result<String> {
        match self
            .api
            .fetch_transcript(video_id.as_str(), LANGUAGES, false)
            .await
        {
            Ok(transcript) => Ok(join_snippets(&transcript.snippets)),
            Err(e) => Err(classify_fetch_failure(&e.to_string())),
        }
    }
}

/// Join caption fragments into the session transcript. Caption payloads come
/// back with HTML entities (`&#39;` and friends), so decode each fragment
/// before joining.
pub fn join_snippets(snippets: &[FetchedTranscriptSnippet]) -> String {
    snippets
        .iter()
        .map(|snippet| html_escape::decode_html_entities(snippet.text.trim()).into_owned())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map a provider failure onto the three conditions we distinguish:
/// transcripts disabled, no transcript available, and everything else
/// (surfaced verbatim). The provider renders its failures as text, so the
/// classification works off the rendered message.
pub fn classify_fetch_failure(message: &str) -> Error {
    let lowered = message.to_lowercase();
    if lowered.contains("subtitles are disabled") || lowered.contains("transcripts are disabled") {
        Error::TranscriptsDisabled
    } else if lowered.contains("no transcript") {
        Error::NoTranscriptFound
    } else {
        Error::Provider(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_fetch_failure, join_snippets};
    use crate::error::Error;
    use yt_transcript_rs::FetchedTranscriptSnippet;

    fn snippet(text: &str, start: f64) -> FetchedTranscriptSnippet {
        FetchedTranscriptSnippet {
            text: text.to_string(),
            start,
            duration: 1.0,
        }
    }

    #[test]
    fn joins_fragments_in_order_with_single_spaces() {
        let snippets = vec![
            snippet("hello there", 0.0),
            snippet("and welcome", 1.0),
            snippet("to the video", 2.0),
        ];
        assert_eq!(
            join_snippets(&snippets),
            "hello there and welcome to the video"
        );
    }

    #[test]
    fn decodes_html_entities_and_skips_blank_fragments() {
        let snippets = vec![
            snippet("it&#39;s here", 0.0),
            snippet("   ", 1.0),
            snippet("A &amp; B", 2.0),
        ];
        assert_eq!(join_snippets(&snippets), "it's here A & B");
    }

    #[test]
    fn classifies_disabled_transcripts() {
        let err = classify_fetch_failure("Subtitles are disabled for this video (abc)");
        assert!(matches!(err, Error::TranscriptsDisabled));
    }

    #[test]
    fn classifies_missing_transcripts() {
        let err =
            classify_fetch_failure("No transcripts were found for any of the requested languages");
        assert!(matches!(err, Error::NoTranscriptFound));
    }

    #[test]
    fn passes_through_unclassified_failures() {
        let err = classify_fetch_failure("YouTube request failed: 429 Too Many Requests");
        match err {
            Error::Provider(message) => {
                assert_eq!(message, "YouTube request failed: 429 Too Many Requests");
            }
            other => panic!("expected Provider, got {other:?}"),
        }
    }
}
