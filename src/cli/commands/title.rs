//! Title command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::youtube::{InnertubeClient, ReqwestHttp, TitleResolver, UNKNOWN_TITLE};
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

/// Resolve and print a video's title.
pub async fn run_title(url: &str, settings: &Settings) -> Result<()> {
    let innertube = Arc::new(InnertubeClient::new(&settings.youtube)?);
    let http = Arc::new(ReqwestHttp::new());
    let resolver = TitleResolver::from_settings(&settings.youtube, innertube, http);
    debug!("Title sources: {}", resolver.strategy_names().join(", "));

    let spinner = Output::spinner("Looking up title...");
    let title = resolver.resolve(url).await;
    spinner.finish_and_clear();

    if title == UNKNOWN_TITLE {
        Output::warning("Could not determine the title from any source.");
    }
    println!("{}", title);

    Ok(())
}
