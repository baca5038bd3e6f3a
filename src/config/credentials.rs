//! API credentials, read once at process start.

use super::Settings;
use crate::error::{Result, TutorError};

/// Credentials for the hosted LLM and embedding endpoints.
///
/// Built once in `main` and passed by reference to whatever needs it.
#[derive(Clone, Default)]
pub struct Credentials {
    env_var: String,
    api_key: Option<String>,
}

impl Credentials {
    /// Read the key from the named environment variable. Empty values count as missing.
    pub fn from_env(env_var: &str) -> Self {
        let api_key = std::env::var(env_var).ok().filter(|k| !k.trim().is_empty());
        Self {
            env_var: env_var.to_string(),
            api_key,
        }
    }

    /// Build credentials from an explicit key.
    pub fn with_key(env_var: &str, api_key: impl Into<String>) -> Self {
        Self {
            env_var: env_var.to_string(),
            api_key: Some(api_key.into()),
        }
    }

    /// Name of the environment variable the key comes from.
    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// The API key, or a configuration error naming the missing variable.
    pub fn require(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Self::missing_key_error(&self.env_var))
    }

    /// The error reported when the key in `env_var` is absent.
    pub fn missing_key_error(env_var: &str) -> TutorError {
        TutorError::Config(format!(
            "{} not set. Set it with: export {}='...' or add it to .env",
            env_var, env_var
        ))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("env_var", &self.env_var)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Keys for the chat model and the embedder, which may come from different providers.
#[derive(Clone, Debug)]
pub struct ApiKeys {
    pub llm: Credentials,
    pub embedding: Credentials,
}

impl ApiKeys {
    pub fn new(llm: Credentials, embedding: Credentials) -> Self {
        Self { llm, embedding }
    }

    /// Read both keys. Without `embedding.api_key_env` the embedder shares the LLM key.
    pub fn from_env(settings: &Settings) -> Self {
        let llm = Credentials::from_env(&settings.llm.api_key_env);
        let embedding = match settings.embedding.api_key_env.as_deref() {
            Some(var) if var != settings.llm.api_key_env => Credentials::from_env(var),
            _ => llm.clone(),
        };
        Self { llm, embedding }
    }

    pub fn is_configured(&self) -> bool {
        self.llm.is_configured() && self.embedding.is_configured()
    }

    /// Fails with the first missing key.
    pub fn require(&self) -> Result<()> {
        self.llm.require()?;
        self.embedding.require()?;
        Ok(())
    }

    /// Whether the embedder reads a different variable than the chat model.
    pub fn is_split(&self) -> bool {
        self.llm.env_var() != self.embedding.env_var()
    }
}
