//! Retrieval-augmented question answering over one video's transcript.

pub mod context;
mod llm;
mod response;

pub use context::ContextBuilder;
pub use llm::{ChatModel, OpenAIChat};
pub use response::{RagEngine, RagResponse, NO_RELEVANT_DOCUMENTS};

use crate::vector_store::SearchResult;

/// A retrieved excerpt, ready for a prompt or for display.
#[derive(Debug, Clone)]
pub struct ContextChunk {
    /// Video title.
    pub video_title: String,
    /// Formatted timestamp (e.g., "02:34").
    pub timestamp: String,
    /// Start time in seconds.
    pub start_seconds: f64,
    /// Text content.
    pub content: String,
    /// Similarity score.
    pub score: f32,
    /// Watch URL starting at this excerpt.
    pub url: String,
}

impl From<SearchResult> for ContextChunk {
    fn from(result: SearchResult) -> Self {
        Self {
            timestamp: result.document.format_timestamp(),
            url: result.document.timestamped_url(),
            video_title: result.document.video_title,
            start_seconds: result.document.start_seconds,
            content: result.document.content,
            score: result.score,
        }
    }
}
