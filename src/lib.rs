//! yt-tutor - chat with a YouTube video
//!
//! Fetches the English transcript of a YouTube video, saves it to a text file
//! and answers questions about it with retrieval-augmented generation over a
//! hosted LLM.
//!
//! # Architecture
//!
//! - `youtube` - URL parsing, transcript fetching and title resolution
//! - `persist` - Writing the transcript file
//! - `chunking` - Splitting the transcript into overlapping chunks
//! - `embedding` - Embedding generation
//! - `vector_store` - In-memory similarity search
//! - `rag` - Context building and answer generation
//! - `orchestrator` / `session` - Loading a video and asking about it
//! - `config` - Settings, prompts and credentials
//!
//! # Example
//!
//! ```rust,no_run
//! use yt_tutor::config::{ApiKeys, Settings};
//! use yt_tutor::orchestrator::{LoadOutcome, Tutor};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load_from(None)?;
//!     let keys = ApiKeys::from_env(&settings);
//!     let tutor = Tutor::new(settings, &keys)?;
//!
//!     match tutor.load_video("https://youtu.be/dQw4w9WgXcQ").await? {
//!         LoadOutcome::Loaded(video) => {
//!             let response = tutor.ask(&video, "What is this video about?").await?;
//!             println!("{}", response.answer);
//!         }
//!         LoadOutcome::NoTranscript(failure) => println!("{}", failure),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod persist;
pub mod rag;
pub mod session;
pub mod vector_store;
pub mod youtube;

pub use error::{Result, TutorError};
