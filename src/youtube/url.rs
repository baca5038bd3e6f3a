//! Video ID extraction from YouTube URLs.

use super::VideoId;
use url::Url;

const YOUTUBE_HOSTS: [&str; 2] = ["youtube.com", "www.youtube.com"];

/// Extract the video ID from a YouTube URL.
///
/// Recognizes `youtu.be/ID`, `youtube.com/watch?v=ID`, `youtube.com/embed/ID`
/// and `youtube.com/v/ID` (with or without `www`). Anything else, including a
/// `/watch` URL without a `v` parameter, yields `None`.
pub fn parse_video_id(input: &str) -> Option<VideoId> {
    let url = Url::parse(input.trim()).ok()?;
    let host = url.host_str()?;
    let path = url.path();

    let id = if host == "youtu.be" {
        path.strip_prefix('/').map(str::to_string)
    } else if YOUTUBE_HOSTS.contains(&host) {
        if path == "/watch" {
            url.query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())
        } else if path.starts_with("/embed/") || path.starts_with("/v/") {
            path.split('/').nth(2).map(str::to_string)
        } else {
            None
        }
    } else {
        None
    };

    id.filter(|id| !id.is_empty()).map(VideoId::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(url: &str) -> Option<String> {
        parse_video_id(url).map(|v| v.as_str().to_string())
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(id("https://youtube.com/watch?v=dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_watch_url_with_params() {
        assert_eq!(
            id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=30s").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            id("https://www.youtube.com/watch?t=30s&v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_repeated_v_takes_first() {
        assert_eq!(
            id("https://www.youtube.com/watch?v=first000000&v=second00000").as_deref(),
            Some("first000000")
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(id("https://youtu.be/dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(id("https://youtu.be/dQw4w9WgXcQ?si=abc").as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_embed_and_v_urls() {
        assert_eq!(id("https://www.youtube.com/embed/dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(id("https://www.youtube.com/v/dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(id("https://youtube.com/embed/dQw4w9WgXcQ?start=10").as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_host_is_case_insensitive() {
        assert_eq!(id("https://WWW.YouTube.com/watch?v=dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn test_unrecognized_inputs() {
        assert_eq!(id("https://example.com/video"), None);
        assert_eq!(id("https://www.youtube.com/"), None);
        assert_eq!(id("https://www.youtube.com/watch"), None);
        assert_eq!(id("https://www.youtube.com/watch?list=PL123"), None);
        assert_eq!(id("https://www.youtube.com/shorts/dQw4w9WgXcQ"), None);
        assert_eq!(id("https://m.youtube.com/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(id("https://youtu.be/"), None);
        assert_eq!(id("dQw4w9WgXcQ"), None);
        assert_eq!(id("not a url"), None);
        assert_eq!(id(""), None);
    }
}
