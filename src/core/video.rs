use derive_more::Display;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// 11-character opaque token naming a video on the platform.
#[derive(Debug, Display, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[display("{_0}")]
pub struct VideoId(String);

impl VideoId {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Preview image for the video, derived from the identifier alone.
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/0.jpg", self.0)
    }
}

/// The URL shapes we accept, tried in order: standard watch URLs, youtu.be
/// short links, and embed URLs.
static ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"v=([A-Za-z0-9_-]{11})",
        r"youtu\.be/([A-Za-z0-9_-]{11})",
        r"embed/([A-Za-z0-9_-]{11})",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("static pattern"))
    .collect()
});

/// Extract a video identifier from a pasted URL. Returns the first capture of
/// the first matching pattern. Whether the identifier names a real video is
/// not checked here; the transcript fetch finds that out.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .map(|captures| VideoId::new(&captures[1]))
}

#[cfg(test)]
mod tests {
    use super::{VideoId, extract_video_id};

    #[test]
    fn extracts_from_watch_url() {
        let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(id, Some(VideoId::new("dQw4w9WgXcQ")));
    }

    #[test]
    fn extracts_from_watch_url_with_extra_params() {
        let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLx&t=42s");
        assert_eq!(id, Some(VideoId::new("dQw4w9WgXcQ")));
    }

    #[test]
    fn extracts_from_short_url() {
        let id = extract_video_id("https://youtu.be/5_EJwYeQusM?feature=shared");
        assert_eq!(id, Some(VideoId::new("5_EJwYeQusM")));
    }

    #[test]
    fn extracts_from_embed_url() {
        let id = extract_video_id("https://www.youtube.com/embed/abcDEF123-_");
        assert_eq!(id, Some(VideoId::new("abcDEF123-_")));
    }

    #[test]
    fn rejects_unrelated_input() {
        assert_eq!(extract_video_id("https://vimeo.com/123456789"), None);
        assert_eq!(extract_video_id("not a url at all"), None);
        // A bare identifier is not one of the accepted URL shapes.
        assert_eq!(extract_video_id("dQw4w9WgXcQ"), None);
    }

    #[test]
    fn rejects_too_short_identifier() {
        assert_eq!(extract_video_id("https://youtu.be/shortid"), None);
    }

    #[test]
    fn thumbnail_url_is_derived_from_id() {
        let id = VideoId::new("dQw4w9WgXcQ");
        assert_eq!(
            id.thumbnail_url(),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg"
        );
    }
}
