//! YouTube access: URL parsing, titles and transcripts.

pub mod http;
pub mod innertube;
pub mod metadata;
mod models;
pub mod title;
pub mod transcript;
pub mod url;

pub use self::http::{HttpFetch, HttpResponse, ReqwestHttp};
pub use innertube::InnertubeClient;
pub use metadata::{MetadataError, VideoMetadata};
pub use models::{
    format_timestamp, Transcript, TranscriptList, TranscriptSegment, TranscriptTrack, VideoId,
};
pub use title::{TitleResolver, TitleStrategy, UNKNOWN_TITLE};
pub use transcript::{ProviderError, TranscriptFailure, TranscriptFetcher, TranscriptProvider};
pub use self::url::parse_video_id;
