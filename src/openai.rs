//! OpenAI-compatible client construction.

use crate::config::Credentials;
use crate::error::Result;
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for LLM and embedding requests (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create a client for an OpenAI-compatible endpoint.
///
/// `api_base` of `None` keeps the OpenAI default; anything else (Groq, a local
/// server) must speak the same API.
pub fn create_client(
    credentials: &Credentials,
    api_base: Option<&str>,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let mut config = OpenAIConfig::new().with_api_key(credentials.require()?);
    if let Some(base) = api_base {
        config = config.with_api_base(base);
    }

    let http_client = reqwest::Client::builder().timeout(timeout).build()?;

    Ok(Client::with_config(config).with_http_client(http_client))
}
