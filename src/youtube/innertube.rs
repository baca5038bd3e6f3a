//! YouTube InnerTube client: video metadata and caption tracks.

use super::metadata::{MetadataError, VideoMetadata};
use super::transcript::{ProviderError, TranscriptProvider};
use super::{TranscriptList, TranscriptSegment, TranscriptTrack, VideoId};
use crate::config::YoutubeSettings;
use crate::error::Result;
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument};

const ANDROID_CLIENT_VERSION: &str = "20.10.38";
const RECAPTCHA_MARKER: &str = "class=\"g-recaptcha\"";
const PO_TOKEN_MARKER: &str = "&exp=xpe";

/// Talks to the watch page and the InnerTube player endpoint.
pub struct InnertubeClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
    video_id_regex: Regex,
    api_key_regex: Regex,
}

impl InnertubeClient {
    pub fn new(settings: &YoutubeSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.http_timeout())
            .build()?;

        // URL formats plus bare 11-character IDs
        let video_id_regex = Regex::new(
            r"(?x)
            (?:
                (?:https?://)?
                (?:www\.|m\.)?
                (?:
                    youtube\.com/watch\?(?:[^\#\s]*&)?v=
                    |youtu\.be/
                    |youtube\.com/(?:embed|v|shorts|live)/
                )
                ([a-zA-Z0-9_-]{11})
            )
            |
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex");

        let api_key_regex =
            Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).expect("Invalid regex");

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            user_agent: settings.user_agent.clone(),
            video_id_regex,
            api_key_regex,
        })
    }

    fn extract_video_id(&self, input: &str) -> Option<VideoId> {
        let caps = self.video_id_regex.captures(input.trim())?;

        // Group 1 is the URL form, group 2 the bare ID
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| VideoId::new(m.as_str()))
    }

    /// Fetch the player response for a video.
    #[instrument(skip(self), fields(video_id = %video_id))]
    async fn player_response(&self, video_id: &VideoId) -> std::result::Result<Value, ProviderError> {
        let watch_url = format!("{}/watch?v={}", self.base_url, video_id);
        let response = self
            .client
            .get(&watch_url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| retrieval(video_id, e.to_string()))?;
        check_status(video_id, response.status())?;

        let html = response
            .text()
            .await
            .map_err(|e| retrieval(video_id, e.to_string()))?;

        let api_key = match self.api_key_regex.captures(&html).and_then(|c| c.get(1)) {
            Some(key) => key.as_str().to_string(),
            None if html.contains(RECAPTCHA_MARKER) => {
                return Err(retrieval(video_id, "request blocked by YouTube (recaptcha)"));
            }
            None => {
                return Err(retrieval(video_id, "could not find INNERTUBE_API_KEY on watch page"));
            }
        };
        debug!("Found InnerTube API key");

        let player_url = format!("{}/youtubei/v1/player?key={}", self.base_url, api_key);
        let body = json!({
            "context": {
                "client": {
                    "clientName": "ANDROID",
                    "clientVersion": ANDROID_CLIENT_VERSION,
                }
            },
            "videoId": video_id.as_str(),
        });

        let response = self
            .client
            .post(&player_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| retrieval(video_id, e.to_string()))?;
        check_status(video_id, response.status())?;

        response
            .json::<Value>()
            .await
            .map_err(|e| retrieval(video_id, format!("unparsable player response: {}", e)))
    }
}

#[async_trait]
impl VideoMetadata for InnertubeClient {
    fn video_id(&self, url: &str) -> std::result::Result<VideoId, MetadataError> {
        self.extract_video_id(url)
            .ok_or_else(|| MetadataError::InvalidUrl(url.to_string()))
    }

    async fn title(&self, url: &str) -> std::result::Result<String, MetadataError> {
        let video_id = self.video_id(url)?;
        let player = self
            .player_response(&video_id)
            .await
            .map_err(metadata_error)?;
        check_playability(&video_id, &player).map_err(metadata_error)?;

        player["videoDetails"]["title"]
            .as_str()
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or_else(|| MetadataError::Parse("missing videoDetails.title".to_string()))
    }
}

#[async_trait]
impl TranscriptProvider for InnertubeClient {
    async fn list_transcripts(
        &self,
        video_id: &VideoId,
    ) -> std::result::Result<TranscriptList, ProviderError> {
        let player = self.player_response(video_id).await?;
        check_playability(video_id, &player)?;
        parse_caption_tracks(video_id, &player)
    }

    #[instrument(skip(self, track), fields(video_id = %track.video_id, lang = %track.language_code))]
    async fn fetch(
        &self,
        track: &TranscriptTrack,
    ) -> std::result::Result<Vec<TranscriptSegment>, ProviderError> {
        let video_id = &track.video_id;
        if track.base_url.contains(PO_TOKEN_MARKER) {
            return Err(retrieval(video_id, "track requires a PO token"));
        }

        let url = format!("{}&fmt=json3", track.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| retrieval(video_id, e.to_string()))?;
        check_status(video_id, response.status())?;

        let body = response
            .text()
            .await
            .map_err(|e| retrieval(video_id, e.to_string()))?;

        parse_json3(video_id, &body)
    }
}

fn retrieval(video_id: &VideoId, reason: impl Into<String>) -> ProviderError {
    ProviderError::CouldNotRetrieve {
        video_id: video_id.to_string(),
        reason: reason.into(),
    }
}

fn metadata_error(err: ProviderError) -> MetadataError {
    match err {
        ProviderError::VideoUnavailable(id) => MetadataError::Unavailable(id),
        other => MetadataError::Request(other.to_string()),
    }
}

fn check_status(video_id: &VideoId, status: StatusCode) -> std::result::Result<(), ProviderError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        Err(retrieval(video_id, "too many requests (HTTP 429)"))
    } else if !status.is_success() {
        Err(retrieval(video_id, format!("HTTP {}", status)))
    } else {
        Ok(())
    }
}

/// Inspect `playabilityStatus`; anything other than `OK` is an error.
fn check_playability(video_id: &VideoId, player: &Value) -> std::result::Result<(), ProviderError> {
    let playability = &player["playabilityStatus"];
    let status = playability["status"].as_str().unwrap_or("OK");
    if status == "OK" {
        return Ok(());
    }

    let reason = playability["reason"].as_str().unwrap_or_default();
    match status {
        "ERROR" if reason.to_lowercase().contains("unavailable") => {
            Err(ProviderError::VideoUnavailable(video_id.to_string()))
        }
        "LOGIN_REQUIRED" if reason.contains("not a bot") => {
            Err(retrieval(video_id, "request blocked by YouTube (bot check)"))
        }
        "LOGIN_REQUIRED" if reason.contains("inappropriate") => {
            Err(retrieval(video_id, "video is age restricted"))
        }
        _ => Err(retrieval(
            video_id,
            format!("video is unplayable ({}): {}", status, reason),
        )),
    }
}

/// Read the caption tracks out of a player response.
fn parse_caption_tracks(
    video_id: &VideoId,
    player: &Value,
) -> std::result::Result<TranscriptList, ProviderError> {
    let tracks = player["captions"]["playerCaptionsTracklistRenderer"]["captionTracks"]
        .as_array()
        .filter(|tracks| !tracks.is_empty())
        .ok_or_else(|| ProviderError::TranscriptsDisabled(video_id.to_string()))?;

    let mut list = TranscriptList::default();
    for track in tracks {
        let Some(base_url) = track["baseUrl"].as_str() else {
            continue;
        };
        let language_code = track["languageCode"].as_str().unwrap_or_default().to_string();
        let language = track["name"]["runs"][0]["text"]
            .as_str()
            .or_else(|| track["name"]["simpleText"].as_str())
            .unwrap_or(&language_code)
            .to_string();
        let is_generated = track["kind"].as_str() == Some("asr");

        let track = TranscriptTrack {
            video_id: video_id.clone(),
            language_code,
            language,
            is_generated,
            base_url: base_url.replace("&fmt=srv3", ""),
        };

        if is_generated {
            list.generated.push(track);
        } else {
            list.manually_created.push(track);
        }
    }

    if list.is_empty() {
        return Err(ProviderError::TranscriptsDisabled(video_id.to_string()));
    }
    Ok(list)
}

#[derive(Deserialize)]
struct Json3 {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Convert a json3 timed-text body into segments. Whitespace-only events are dropped.
fn parse_json3(
    video_id: &VideoId,
    body: &str,
) -> std::result::Result<Vec<TranscriptSegment>, ProviderError> {
    let timed_text: Json3 = serde_json::from_str(body)
        .map_err(|e| retrieval(video_id, format!("unparsable timed text: {}", e)))?;

    let segments = timed_text
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs?.into_iter().map(|s| s.utf8).collect();
            let text = text.replace('\n', " ").trim().to_string();
            if text.is_empty() {
                return None;
            }
            let start = event.t_start_ms as f64 / 1000.0;
            let end = (event.t_start_ms + event.d_duration_ms) as f64 / 1000.0;
            Some(TranscriptSegment::new(start, end, text))
        })
        .collect();

    Ok(segments)
}
