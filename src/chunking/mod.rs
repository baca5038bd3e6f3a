//! Splitting transcripts into overlapping, retrievable chunks.

mod splitter;

pub use splitter::TextSplitter;

use serde::{Deserialize, Serialize};

/// A window of transcript text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentChunk {
    /// Text content of this chunk.
    pub content: String,
    /// Position of this chunk in the transcript.
    pub order: usize,
    /// Start of the segment containing the chunk's first character.
    pub start_seconds: f64,
}

impl ContentChunk {
    pub fn new(content: String, order: usize, start_seconds: f64) -> Self {
        Self {
            content,
            order,
            start_seconds,
        }
    }
}
