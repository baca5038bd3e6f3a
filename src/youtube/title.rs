//! Best-effort title resolution through an ordered list of strategies.

use super::http::HttpFetch;
use super::metadata::VideoMetadata;
use super::url::parse_video_id;
use crate::config::YoutubeSettings;
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Returned when no strategy produces a title.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// One way of looking up a video's title.
#[async_trait]
pub trait TitleStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` means "try the next strategy".
    async fn lookup(&self, url: &str) -> Option<String>;
}

/// Asks the metadata collaborator.
pub struct MetadataTitle {
    metadata: Arc<dyn VideoMetadata>,
}

impl MetadataTitle {
    pub fn new(metadata: Arc<dyn VideoMetadata>) -> Self {
        Self { metadata }
    }
}

#[async_trait]
impl TitleStrategy for MetadataTitle {
    fn name(&self) -> &'static str {
        "metadata"
    }

    async fn lookup(&self, url: &str) -> Option<String> {
        match self.metadata.title(url).await {
            Ok(title) => Some(title),
            Err(e) => {
                debug!("Metadata title lookup failed: {}", e);
                None
            }
        }
    }
}

#[derive(Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
}

/// Queries the public oEmbed endpoint.
pub struct OEmbedTitle {
    http: Arc<dyn HttpFetch>,
    endpoint: String,
    timeout: Duration,
}

impl OEmbedTitle {
    pub fn new(http: Arc<dyn HttpFetch>, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

#[async_trait]
impl TitleStrategy for OEmbedTitle {
    fn name(&self) -> &'static str {
        "oembed"
    }

    async fn lookup(&self, url: &str) -> Option<String> {
        let video_id = parse_video_id(url)?;

        let request_url = match url::Url::parse_with_params(
            &self.endpoint,
            &[("url", video_id.watch_url()), ("format", "json".to_string())],
        ) {
            Ok(u) => u,
            Err(e) => {
                warn!("Invalid oEmbed endpoint '{}': {}", self.endpoint, e);
                return None;
            }
        };

        let response = match self.http.get(request_url.as_str(), &[], self.timeout).await {
            Ok(r) => r,
            Err(e) => {
                debug!("oEmbed request failed: {}", e);
                return None;
            }
        };

        if !response.is_ok() {
            debug!("oEmbed returned HTTP {}", response.status);
            return None;
        }

        match response.json::<OEmbedResponse>() {
            Ok(body) => body.title,
            Err(e) => {
                debug!("oEmbed body was not JSON: {}", e);
                None
            }
        }
    }
}

/// Scrapes the watch page for the first embedded `"title":"..."`.
pub struct PageScrapeTitle {
    http: Arc<dyn HttpFetch>,
    user_agent: String,
    timeout: Duration,
    pattern: Regex,
}

impl PageScrapeTitle {
    pub fn new(http: Arc<dyn HttpFetch>, user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            user_agent: user_agent.into(),
            timeout,
            pattern: Regex::new(r#""title":"([^"]+)""#).expect("Invalid regex"),
        }
    }

    /// Swap the extraction pattern. Group 1 must capture the title.
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = pattern;
        self
    }
}

#[async_trait]
impl TitleStrategy for PageScrapeTitle {
    fn name(&self) -> &'static str {
        "page-scrape"
    }

    async fn lookup(&self, url: &str) -> Option<String> {
        let headers = [("User-Agent", self.user_agent.as_str())];
        let response = match self.http.get(url, &headers, self.timeout).await {
            Ok(r) => r,
            Err(e) => {
                debug!("Watch page request failed: {}", e);
                return None;
            }
        };

        if !response.is_ok() {
            debug!("Watch page returned HTTP {}", response.status);
            return None;
        }

        let raw = self.pattern.captures(&response.body)?.get(1)?.as_str();
        Some(decode_json_escapes(raw))
    }
}

/// Decode `\uXXXX` and friends; falls back to the raw text when it isn't valid JSON.
fn decode_json_escapes(raw: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{}\"", raw)).unwrap_or_else(|_| raw.to_string())
}

/// Runs title strategies in order until one yields a non-empty title.
pub struct TitleResolver {
    strategies: Vec<Box<dyn TitleStrategy>>,
}

impl TitleResolver {
    pub fn new(strategies: Vec<Box<dyn TitleStrategy>>) -> Self {
        Self { strategies }
    }

    /// Metadata, then oEmbed, then (optionally) the watch page.
    pub fn from_settings(
        settings: &YoutubeSettings,
        metadata: Arc<dyn VideoMetadata>,
        http: Arc<dyn HttpFetch>,
    ) -> Self {
        let timeout = settings.http_timeout();
        let mut strategies: Vec<Box<dyn TitleStrategy>> = vec![
            Box::new(MetadataTitle::new(metadata)),
            Box::new(OEmbedTitle::new(
                http.clone(),
                settings.oembed_endpoint.clone(),
                timeout,
            )),
        ];
        if settings.scrape_title_fallback {
            strategies.push(Box::new(PageScrapeTitle::new(
                http,
                settings.user_agent.clone(),
                timeout,
            )));
        }
        Self::new(strategies)
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolve a title. Never fails; falls back to [`UNKNOWN_TITLE`].
    #[instrument(skip(self))]
    pub async fn resolve(&self, url: &str) -> String {
        for strategy in &self.strategies {
            match strategy.lookup(url).await {
                Some(title) if !title.trim().is_empty() => {
                    info!("Title resolved via {}: {}", strategy.name(), title);
                    return title;
                }
                _ => debug!("Title strategy {} produced nothing", strategy.name()),
            }
        }

        warn!("Could not resolve a title for {}", url);
        UNKNOWN_TITLE.to_string()
    }
}
