//! Pipeline orchestrator for yt-tutor.
//!
//! Coordinates transcript retrieval, persistence, title lookup, chunking and
//! question answering for one video at a time.

use crate::chunking::TextSplitter;
use crate::config::{ApiKeys, Credentials, Prompts, Settings};
use crate::embedding::OpenAIEmbedder;
use crate::error::{Result, TutorError};
use crate::persist::save_transcript_in;
use crate::rag::{OpenAIChat, RagEngine, RagResponse};
use crate::session::LoadedVideo;
use crate::youtube::{
    InnertubeClient, ReqwestHttp, TitleResolver, TranscriptFailure, TranscriptFetcher,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Result of trying to load a video.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(LoadedVideo),
    /// No transcript could be fetched; nothing was written.
    NoTranscript(TranscriptFailure),
}

/// The main orchestrator.
pub struct Tutor {
    settings: Settings,
    fetcher: TranscriptFetcher,
    titles: TitleResolver,
    splitter: TextSplitter,
    rag: Option<RagEngine>,
    key_env: String,
}

impl Tutor {
    /// Wire up the production collaborators.
    ///
    /// Without both API keys the tutor can still fetch transcripts; asking fails.
    pub fn new(settings: Settings, keys: &ApiKeys) -> Result<Self> {
        let innertube = Arc::new(InnertubeClient::new(&settings.youtube)?);
        let http_client = reqwest::Client::builder()
            .timeout(settings.youtube.http_timeout())
            .build()?;
        let http = Arc::new(ReqwestHttp::with_client(http_client));

        let fetcher = TranscriptFetcher::new(
            innertube.clone(),
            innertube.clone(),
            settings.youtube.languages.clone(),
        );
        let titles = TitleResolver::from_settings(&settings.youtube, innertube, http);

        // Named in the error if a question is asked without a usable key
        let key_env = if keys.llm.is_configured() {
            keys.embedding.env_var()
        } else {
            keys.llm.env_var()
        };

        let rag = if keys.is_configured() {
            Some(Self::build_rag(&settings, keys)?)
        } else {
            warn!("{} not set; questions will be unavailable", key_env);
            None
        };

        Self::with_components(settings, fetcher, titles, rag, key_env)
    }

    /// Create a tutor with custom components.
    pub fn with_components(
        settings: Settings,
        fetcher: TranscriptFetcher,
        titles: TitleResolver,
        rag: Option<RagEngine>,
        key_env: &str,
    ) -> Result<Self> {
        let splitter = TextSplitter::from_settings(&settings.chunking)?;

        Ok(Self {
            settings,
            fetcher,
            titles,
            splitter,
            rag,
            key_env: key_env.to_string(),
        })
    }

    fn build_rag(settings: &Settings, keys: &ApiKeys) -> Result<RagEngine> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let embedder = Arc::new(OpenAIEmbedder::new(
            &keys.embedding,
            &settings.embedding,
            Duration::from_secs(settings.llm.timeout_secs),
        )?);
        let chat = Arc::new(OpenAIChat::new(&keys.llm, &settings.llm)?);

        Ok(RagEngine::new(embedder, chat, &settings.rag).with_prompts(prompts))
    }

    /// Directory the transcript file is written to.
    pub fn output_dir(&self) -> PathBuf {
        self.settings.output_dir()
    }

    /// Whether questions can be answered (an API key was available).
    pub fn can_answer(&self) -> bool {
        self.rag.is_some()
    }

    /// Fetch, persist, title and chunk a video.
    ///
    /// A missing transcript is a normal outcome, not an error. Only a failure to
    /// write the transcript file is returned as `Err`.
    #[instrument(skip(self))]
    pub async fn load_video(&self, url: &str) -> Result<LoadOutcome> {
        let transcript = match self.fetcher.fetch(url).await {
            Ok(t) => t,
            Err(failure) => {
                info!("No transcript: {:?}", failure);
                return Ok(LoadOutcome::NoTranscript(failure));
            }
        };

        let output_dir = self.output_dir();
        std::fs::create_dir_all(&output_dir)?;
        let transcript_path = save_transcript_in(
            &output_dir,
            &transcript.full_text,
            Some(&self.settings.general.transcript_file),
        )?;

        let title = self.titles.resolve(url).await;
        let chunks = self.splitter.split_transcript(&transcript);

        info!(
            "Loaded '{}' ({} chars, {} chunks)",
            title,
            transcript.full_text.len(),
            chunks.len()
        );

        Ok(LoadOutcome::Loaded(LoadedVideo {
            url: url.to_string(),
            video_id: transcript.video_id.clone(),
            title,
            transcript,
            chunks,
            transcript_path,
        }))
    }

    /// Answer a question about a loaded video.
    pub async fn ask(&self, video: &LoadedVideo, question: &str) -> Result<RagResponse> {
        let question = question.trim();
        if question.is_empty() {
            return Err(TutorError::InvalidInput("Question is empty".to_string()));
        }

        let rag = self
            .rag
            .as_ref()
            .ok_or_else(|| Credentials::missing_key_error(&self.key_env))?;
        rag.answer(video, question).await
    }
}
