//! Context building for RAG responses.

use super::ContextChunk;
use crate::chunking::ContentChunk;
use crate::embedding::Embedder;
use crate::error::{Result, TutorError};
use crate::vector_store::{Document, VectorStore};
use crate::youtube::VideoId;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Embeds transcript chunks and retrieves the ones closest to a query.
pub struct ContextBuilder {
    vector_store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    max_chunks: usize,
    min_score: Option<f32>,
}

impl ContextBuilder {
    pub fn new(vector_store: Arc<dyn VectorStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            vector_store,
            embedder,
            max_chunks: 4,
            min_score: None,
        }
    }

    /// Set the maximum number of context chunks.
    pub fn with_max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = max_chunks;
        self
    }

    /// Set the minimum similarity score threshold.
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = Some(min_score);
        self
    }

    /// Replace the store's contents with embeddings of `chunks`.
    #[instrument(skip(self, chunks), fields(count = chunks.len()))]
    pub async fn index(&self, video_id: &VideoId, title: &str, chunks: &[ContentChunk]) -> Result<usize> {
        self.vector_store.clear().await?;
        if chunks.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(TutorError::Embedding(format!(
                "Expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        let docs: Vec<Document> = chunks
            .iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| Document::from_chunk(video_id, title, chunk, embedding))
            .collect();

        let stored = self.vector_store.upsert_batch(&docs).await?;
        debug!("Indexed {} chunks", stored);
        Ok(stored)
    }

    /// Build context for a query.
    pub async fn build(&self, query: &str) -> Result<Vec<ContextChunk>> {
        let query_embedding = self.embedder.embed(query).await?;

        let results = match self.min_score {
            Some(min_score) => {
                self.vector_store
                    .search_with_threshold(&query_embedding, self.max_chunks, min_score)
                    .await?
            }
            None => self.vector_store.search(&query_embedding, self.max_chunks).await?,
        };

        Ok(results.into_iter().map(ContextChunk::from).collect())
    }
}

/// Join excerpts for the "stuff" prompt.
pub fn format_context_for_prompt(chunks: &[ContextChunk]) -> String {
    chunks
        .iter()
        .map(|chunk| format!("[{}] {}", chunk.timestamp, chunk.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}
