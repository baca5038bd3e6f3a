//! Ask command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{ApiKeys, Settings};
use crate::orchestrator::{LoadOutcome, Tutor};
use crate::rag::RagResponse;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    url: &str,
    question: &str,
    top_k: Option<usize>,
    model: Option<String>,
    mut settings: Settings,
    keys: &ApiKeys,
) -> Result<()> {
    if let Some(k) = top_k {
        settings.rag.top_k = k;
    }
    if let Some(m) = model {
        settings.llm.model = m;
    }

    if let Err(e) = preflight::check(Operation::Ask, &settings, keys) {
        Output::error(&format!("{}", e));
        Output::info("Run 'yt-tutor doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let tutor = Tutor::new(settings, keys)?;

    let spinner = Output::spinner("Fetching transcript...");
    let outcome = tutor.load_video(url).await;
    spinner.finish_and_clear();

    let video = match outcome? {
        LoadOutcome::Loaded(video) => video,
        LoadOutcome::NoTranscript(failure) => {
            Output::error(failure.message());
            return Err(anyhow::anyhow!("{}", failure.message()));
        }
    };
    Output::info(&format!("Loaded \"{}\"", video.title));

    let spinner = Output::spinner("Thinking...");
    let result = tutor.ask(&video, question).await;
    spinner.finish_and_clear();

    match result {
        Ok(response) => {
            print_response(&response);
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Failed to generate answer: {}", e));
            Err(e.into())
        }
    }
}

/// Print an answer followed by its sources.
pub(crate) fn print_response(response: &RagResponse) {
    println!("\n{}\n", response.answer);

    if !response.sources.is_empty() {
        Output::header("Sources");
        for source in &response.sources {
            Output::source(&source.timestamp, source.score, &source.content, &source.url);
        }
        println!();
    }
}
