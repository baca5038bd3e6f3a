//! Fetch command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{ApiKeys, Settings};
use crate::orchestrator::{LoadOutcome, Tutor};
use anyhow::Result;

/// Fetch a transcript, save it and report what was loaded.
pub async fn run_fetch(
    url: &str,
    output: Option<String>,
    mut settings: Settings,
    keys: &ApiKeys,
) -> Result<()> {
    if let Some(file) = output {
        settings.general.transcript_file = file;
    }

    if let Err(e) = preflight::check(Operation::Fetch, &settings, keys) {
        Output::error(&format!("{}", e));
        Output::info("Run 'yt-tutor doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let tutor = Tutor::new(settings, keys)?;

    let spinner = Output::spinner("Fetching transcript...");
    let outcome = tutor.load_video(url).await;
    spinner.finish_and_clear();

    match outcome? {
        LoadOutcome::Loaded(video) => {
            Output::success(&format!(
                "Transcript saved to {}",
                video.transcript_path.display()
            ));
            Output::video_info(
                &video.title,
                video.video_id.as_str(),
                video.transcript.full_text.chars().count(),
                video.chunks.len(),
                video.transcript.duration_seconds,
            );
            Ok(())
        }
        LoadOutcome::NoTranscript(failure) => {
            Output::error(failure.message());
            Err(anyhow::anyhow!("{}", failure.message()))
        }
    }
}
