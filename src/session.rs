//! The currently loaded video and its derived state.

use crate::chunking::ContentChunk;
use crate::youtube::{Transcript, VideoId};
use std::path::PathBuf;

/// A video whose transcript has been fetched, saved and chunked.
#[derive(Debug, Clone)]
pub struct LoadedVideo {
    /// URL as given by the user.
    pub url: String,
    pub video_id: VideoId,
    pub title: String,
    pub transcript: Transcript,
    pub chunks: Vec<ContentChunk>,
    /// Where the transcript was written.
    pub transcript_path: PathBuf,
}

/// Holds at most one loaded video for an interactive session.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<LoadedVideo>,
    questions_asked: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&LoadedVideo> {
        self.current.as_ref()
    }

    /// Swap in a new video, discarding the previous one. Returns the old video.
    pub fn replace(&mut self, video: LoadedVideo) -> Option<LoadedVideo> {
        self.questions_asked = 0;
        self.current.replace(video)
    }

    /// Drop the loaded video.
    pub fn clear(&mut self) -> Option<LoadedVideo> {
        self.questions_asked = 0;
        self.current.take()
    }

    /// Record a question against the current video.
    pub fn record_question(&mut self) {
        self.questions_asked += 1;
    }

    /// Questions asked about the current video.
    pub fn questions_asked(&self) -> usize {
        self.questions_asked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::TranscriptSegment;

    fn video(id: &str, text: &str) -> LoadedVideo {
        let video_id = VideoId::new(id);
        LoadedVideo {
            url: video_id.watch_url(),
            title: format!("Video {}", id),
            transcript: Transcript::new(video_id.clone(), vec![TranscriptSegment::new(0.0, 1.0, text)]),
            chunks: vec![ContentChunk::new(text.to_string(), 0, 0.0)],
            transcript_path: PathBuf::from("transcript.txt"),
            video_id,
        }
    }

    #[test]
    fn test_replace_swaps_wholesale() {
        let mut session = Session::new();
        assert!(session.current().is_none());

        assert!(session.replace(video("aaaaaaaaaaa", "first")).is_none());
        session.record_question();
        session.record_question();
        assert_eq!(session.questions_asked(), 2);

        let old = session.replace(video("bbbbbbbbbbb", "second")).unwrap();
        assert_eq!(old.transcript.full_text, "first");

        let current = session.current().unwrap();
        assert_eq!(current.video_id.as_str(), "bbbbbbbbbbb");
        assert_eq!(current.chunks[0].content, "second");
        assert_eq!(session.questions_asked(), 0);
    }

    #[test]
    fn test_clear() {
        let mut session = Session::new();
        session.replace(video("aaaaaaaaaaa", "first"));
        assert!(session.clear().is_some());
        assert!(session.current().is_none());
        assert!(session.clear().is_none());
    }
}
