//! RAG response generation.

use super::context::format_context_for_prompt;
use super::{ChatModel, ContextBuilder, ContextChunk};
use crate::config::{Prompts, RagSettings};
use crate::embedding::Embedder;
use crate::error::Result;
use crate::session::LoadedVideo;
use crate::vector_store::MemoryVectorStore;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Answer given when retrieval finds nothing.
pub const NO_RELEVANT_DOCUMENTS: &str = "No relevant documents found for the question.";

/// Answers questions about a loaded video.
///
/// The index is rebuilt from the video's chunks for every question.
pub struct RagEngine {
    embedder: Arc<dyn Embedder>,
    chat: Arc<dyn ChatModel>,
    prompts: Prompts,
    top_k: usize,
    min_score: Option<f32>,
}

impl RagEngine {
    pub fn new(embedder: Arc<dyn Embedder>, chat: Arc<dyn ChatModel>, settings: &RagSettings) -> Self {
        Self {
            embedder,
            chat,
            prompts: Prompts::default(),
            top_k: settings.top_k,
            min_score: settings.min_score,
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Override the number of excerpts handed to the model.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Answer a question from the video's transcript.
    #[instrument(skip(self, video), fields(video_id = %video.video_id))]
    pub async fn answer(&self, video: &LoadedVideo, question: &str) -> Result<RagResponse> {
        info!("Processing question: {}", question);

        let mut context_builder =
            ContextBuilder::new(Arc::new(MemoryVectorStore::new()), self.embedder.clone())
                .with_max_chunks(self.top_k);
        if let Some(min_score) = self.min_score {
            context_builder = context_builder.with_min_score(min_score);
        }

        context_builder
            .index(&video.video_id, &video.title, &video.chunks)
            .await?;
        let context_chunks = context_builder.build(question).await?;

        if context_chunks.is_empty() {
            debug!("No chunks passed retrieval");
            return Ok(RagResponse {
                answer: NO_RELEVANT_DOCUMENTS.to_string(),
                sources: Vec::new(),
            });
        }

        let mut vars = HashMap::new();
        vars.insert("title".to_string(), video.title.clone());
        vars.insert("question".to_string(), question.to_string());
        vars.insert("context".to_string(), format_context_for_prompt(&context_chunks));

        let system_prompt = self.prompts.render_with_custom(&self.prompts.qa.system, &vars);
        let user_prompt = self.prompts.render_with_custom(&self.prompts.qa.user, &vars);

        let answer = self.chat.complete(&system_prompt, &user_prompt).await?;
        debug!("Generated response with {} sources", context_chunks.len());

        Ok(RagResponse {
            answer,
            sources: context_chunks,
        })
    }
}

/// A RAG response with answer and sources.
#[derive(Debug, Clone)]
pub struct RagResponse {
    /// The generated answer.
    pub answer: String,
    /// Source chunks used for the answer.
    pub sources: Vec<ContextChunk>,
}
