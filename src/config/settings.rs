//! Configuration settings for yt-tutor.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub chunking: ChunkingSettings,
    pub embedding: EmbeddingSettings,
    pub llm: LlmSettings,
    pub rag: RagSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory the transcript file is written to.
    pub output_dir: String,
    /// Name of the transcript file (must end in `.txt`).
    pub transcript_file: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            transcript_file: "transcript.txt".to_string(),
        }
    }
}

/// YouTube access settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Transcript language codes, in order of preference.
    pub languages: Vec<String>,
    /// Timeout for every request made to YouTube.
    pub http_timeout_secs: u64,
    /// oEmbed endpoint used as the second title source.
    pub oembed_endpoint: String,
    /// Base URL for watch pages and the InnerTube API.
    pub base_url: String,
    /// Browser User-Agent sent when scraping the watch page.
    pub user_agent: String,
    /// Scrape the watch page as the last title source.
    pub scrape_title_fallback: bool,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
            http_timeout_secs: 10,
            oembed_endpoint: "https://www.youtube.com/oembed".to_string(),
            base_url: "https://www.youtube.com".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            scrape_title_fallback: true,
        }
    }
}

impl YoutubeSettings {
    /// Request timeout as a `Duration`.
    pub fn http_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.http_timeout_secs)
    }
}

/// Transcript chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks.
    pub chunk_overlap: usize,
    /// Separators tried in order, coarsest first. The empty string splits per character.
    pub separators: Vec<String>,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 100,
            separators: vec!["\n".to_string(), " ".to_string(), String::new()],
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: String,
    /// Requested embedding size. Only sent when set; many compatible servers reject it.
    pub dimensions: Option<u32>,
    /// OpenAI-compatible base URL. `None` uses the OpenAI default.
    pub api_base: Option<String>,
    /// Environment variable holding the embedding key. `None` reuses `llm.api_key_env`.
    pub api_key_env: Option<String>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimensions: None,
            api_base: None,
            api_key_env: None,
        }
    }
}

/// Hosted LLM settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Chat model used to compose answers.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// OpenAI-compatible base URL (e.g. https://api.groq.com/openai/v1).
    pub api_base: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            api_base: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: crate::openai::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    /// Number of chunks handed to the LLM.
    pub top_k: usize,
    /// When set, chunks below this cosine similarity are dropped. Unset keeps
    /// the `top_k` nearest chunks however far they are.
    pub min_score: Option<f32>,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            top_k: 4,
            min_score: None,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TutorError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("yt-tutor")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded transcript output directory.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.general.transcript_file, "transcript.txt");
        assert_eq!(settings.youtube.http_timeout_secs, 10);
        assert_eq!(settings.youtube.languages, vec!["en".to_string()]);
        assert_eq!(settings.chunking.chunk_size, 1000);
        assert_eq!(settings.chunking.chunk_overlap, 100);
        assert_eq!(settings.rag.top_k, 4);
        assert!(settings.rag.min_score.is_none());
        assert_eq!(settings.llm.temperature, 0.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [llm]
            model = "llama-3.1-8b-instant"
            api_base = "https://api.groq.com/openai/v1"
            api_key_env = "GROQ_API_KEY"
            "#,
        )
        .unwrap();

        assert_eq!(settings.llm.model, "llama-3.1-8b-instant");
        assert_eq!(settings.llm.api_key_env, "GROQ_API_KEY");
        assert_eq!(settings.llm.timeout_secs, 300);
        assert_eq!(settings.chunking.chunk_size, 1000);
        assert!(settings.embedding.api_key_env.is_none());
    }

    #[test]
    fn test_groq_llm_with_openai_embeddings() {
        let settings: Settings = toml::from_str(
            r#"
            [llm]
            api_base = "https://api.groq.com/openai/v1"
            api_key_env = "GROQ_API_KEY"

            [embedding]
            api_key_env = "OPENAI_API_KEY"
            dimensions = 512
            "#,
        )
        .unwrap();

        assert_eq!(settings.embedding.api_key_env.as_deref(), Some("OPENAI_API_KEY"));
        assert!(settings.embedding.api_base.is_none());
        assert_eq!(settings.embedding.dimensions, Some(512));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.rag.top_k = 7;
        settings.youtube.scrape_title_fallback = false;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.rag.top_k, 7);
        assert!(!loaded.youtube.scrape_title_fallback);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.general.output_dir, ".");
    }
}
