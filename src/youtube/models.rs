//! Data models shared by the YouTube collaborators.

use serde::{Deserialize, Serialize};

/// A YouTube video identifier (nominally 11 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    /// Watch URL that starts playback at the given offset.
    pub fn watch_url_at(&self, seconds: f64) -> String {
        format!("https://youtube.com/watch?v={}&t={}s", self.0, seconds as u32)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A caption track offered by the provider for one video.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptTrack {
    pub video_id: VideoId,
    pub language_code: String,
    /// Display name (e.g. "English (auto-generated)").
    pub language: String,
    /// Whether the track is automatic speech recognition output.
    pub is_generated: bool,
    pub base_url: String,
}

/// The caption tracks available for a video, split by origin.
#[derive(Debug, Clone, Default)]
pub struct TranscriptList {
    pub manually_created: Vec<TranscriptTrack>,
    pub generated: Vec<TranscriptTrack>,
}

impl TranscriptList {
    /// Find a track for the first language code that has one.
    ///
    /// Manually created tracks win over generated ones for the same language.
    pub fn find_transcript(&self, language_codes: &[String]) -> Option<&TranscriptTrack> {
        language_codes.iter().find_map(|code| {
            self.manually_created
                .iter()
                .find(|t| &t.language_code == code)
                .or_else(|| self.generated.iter().find(|t| &t.language_code == code))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.manually_created.is_empty() && self.generated.is_empty()
    }

    /// Language codes of every available track.
    pub fn language_codes(&self) -> Vec<&str> {
        self.manually_created
            .iter()
            .chain(self.generated.iter())
            .map(|t| t.language_code.as_str())
            .collect()
    }
}

/// A complete transcript with segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Video ID this transcript belongs to.
    pub video_id: VideoId,
    /// Segments in provider (chronological) order.
    pub segments: Vec<TranscriptSegment>,
    /// Segment texts joined with single spaces.
    pub full_text: String,
    /// Total duration in seconds.
    pub duration_seconds: f64,
}

impl Transcript {
    /// Create a new transcript from segments.
    pub fn new(video_id: VideoId, segments: Vec<TranscriptSegment>) -> Self {
        let full_text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let duration_seconds = segments.last().map(|s| s.end_seconds).unwrap_or(0.0);

        Self {
            video_id,
            segments,
            full_text,
            duration_seconds,
        }
    }

    /// Start time of the segment covering the given character offset of `full_text`.
    pub fn start_seconds_at(&self, char_offset: usize) -> f64 {
        let mut consumed = 0;
        for segment in &self.segments {
            // +1 for the joining space
            consumed += segment.text.chars().count() + 1;
            if char_offset < consumed {
                return segment.start_seconds;
            }
        }
        self.segments.last().map(|s| s.start_seconds).unwrap_or(0.0)
    }
}

/// A single timed unit of caption text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in seconds.
    pub start_seconds: f64,
    /// End time in seconds.
    pub end_seconds: f64,
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start_seconds: f64, end_seconds: f64, text: impl Into<String>) -> Self {
        Self {
            start_seconds,
            end_seconds,
            text: text.into(),
        }
    }
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
