//! Vectors for transcript chunks and questions.
//!
//! Both sides of a lookup must come from the same model, so one embedder serves
//! indexing and querying for a video.

mod openai;

pub use openai::OpenAIEmbedder;

use crate::error::Result;
use async_trait::async_trait;

/// Turns text into vectors comparable by cosine similarity.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single question.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed every chunk of a transcript. Output order matches `texts`.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Length of the vectors this embedder returns.
    fn dimensions(&self) -> usize;
}
