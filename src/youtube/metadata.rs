//! Video metadata collaborator.

use super::VideoId;
use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by a metadata source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    #[error("could not find a video id in '{0}'")]
    InvalidUrl(String),

    #[error("video {0} is unavailable")]
    Unavailable(String),

    #[error("metadata request failed: {0}")]
    Request(String),

    #[error("unexpected metadata response: {0}")]
    Parse(String),
}

/// Resolves a URL to the provider's video ID and title.
#[async_trait]
pub trait VideoMetadata: Send + Sync {
    /// Extract the provider-native video ID. May accept inputs the strict URL parser rejects.
    fn video_id(&self, url: &str) -> Result<VideoId, MetadataError>;

    /// Look up the video's title.
    async fn title(&self, url: &str) -> Result<String, MetadataError>;
}
