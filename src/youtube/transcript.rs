//! Transcript retrieval with a closed failure taxonomy.

use super::metadata::{MetadataError, VideoMetadata};
use super::{Transcript, TranscriptList, TranscriptSegment, TranscriptTrack, VideoId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Errors raised by a transcript provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("no transcript found for video {video_id} in {languages:?} (available: {available:?})")]
    NoTranscriptFound {
        video_id: String,
        languages: Vec<String>,
        available: Vec<String>,
    },

    #[error("video {0} is unavailable")]
    VideoUnavailable(String),

    #[error("could not retrieve transcript for {video_id}: {reason}")]
    CouldNotRetrieve { video_id: String, reason: String },

    #[error("{0}")]
    Other(String),
}

/// Lists and downloads caption tracks.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    async fn list_transcripts(&self, video_id: &VideoId) -> Result<TranscriptList, ProviderError>;

    async fn fetch(&self, track: &TranscriptTrack) -> Result<Vec<TranscriptSegment>, ProviderError>;
}

/// Why a transcript could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptFailure {
    /// Captions are turned off for the video.
    Disabled,
    /// No track in an accepted language.
    NotFound,
    /// Deleted, private or blocked.
    Unavailable,
    /// Network or provider failure.
    RetrievalFailure,
    Unknown,
}

impl TranscriptFailure {
    /// User-facing explanation.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Disabled => "Transcripts are disabled for this video. Please try another video.",
            Self::NotFound => "No English transcript found for this video. Please try another video.",
            Self::Unavailable => {
                "The video is unavailable. Please check the URL or try another video."
            }
            Self::RetrievalFailure => {
                "Could not retrieve the transcript due to a network or API issue. Please try again later."
            }
            Self::Unknown => {
                "An unexpected error occurred. Please check the video URL and try again."
            }
        }
    }
}

impl std::fmt::Display for TranscriptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<&ProviderError> for TranscriptFailure {
    fn from(err: &ProviderError) -> Self {
        match err {
            ProviderError::TranscriptsDisabled(_) => Self::Disabled,
            ProviderError::NoTranscriptFound { .. } => Self::NotFound,
            ProviderError::VideoUnavailable(_) => Self::Unavailable,
            ProviderError::CouldNotRetrieve { .. } => Self::RetrievalFailure,
            ProviderError::Other(_) => Self::Unknown,
        }
    }
}

impl From<&MetadataError> for TranscriptFailure {
    fn from(err: &MetadataError) -> Self {
        match err {
            MetadataError::Unavailable(_) => Self::Unavailable,
            _ => Self::Unknown,
        }
    }
}

/// Resolves a URL to its English transcript.
pub struct TranscriptFetcher {
    metadata: Arc<dyn VideoMetadata>,
    provider: Arc<dyn TranscriptProvider>,
    languages: Vec<String>,
}

impl TranscriptFetcher {
    pub fn new(
        metadata: Arc<dyn VideoMetadata>,
        provider: Arc<dyn TranscriptProvider>,
        languages: Vec<String>,
    ) -> Self {
        Self {
            metadata,
            provider,
            languages,
        }
    }

    /// Fetch the transcript for `url`.
    ///
    /// Makes a single attempt. Every provider or metadata error is logged and
    /// collapsed into a [`TranscriptFailure`].
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<Transcript, TranscriptFailure> {
        let video_id = self.metadata.video_id(url).map_err(|e| {
            warn!("Could not resolve video id: {}", e);
            TranscriptFailure::from(&e)
        })?;

        let list = self
            .provider
            .list_transcripts(&video_id)
            .await
            .map_err(|e| log_provider_error(&video_id, e))?;

        debug!("Available transcripts: {:?}", list.language_codes());

        let track = list.find_transcript(&self.languages).ok_or_else(|| {
            log_provider_error(
                &video_id,
                ProviderError::NoTranscriptFound {
                    video_id: video_id.to_string(),
                    languages: self.languages.clone(),
                    available: list.language_codes().iter().map(|c| c.to_string()).collect(),
                },
            )
        })?;

        debug!(
            "Using {} track '{}'",
            if track.is_generated { "generated" } else { "manual" },
            track.language
        );

        let segments = self
            .provider
            .fetch(track)
            .await
            .map_err(|e| log_provider_error(&video_id, e))?;

        let transcript = Transcript::new(video_id, segments);
        info!(
            "Fetched transcript for {}: {} segments, {} chars",
            transcript.video_id,
            transcript.segments.len(),
            transcript.full_text.len()
        );

        Ok(transcript)
    }
}

fn log_provider_error(video_id: &VideoId, err: ProviderError) -> TranscriptFailure {
    let failure = TranscriptFailure::from(&err);
    warn!("Transcript unavailable for {} ({:?}): {}", video_id, failure, err);
    failure
}
