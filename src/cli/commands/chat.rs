//! Interactive chat command.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{ApiKeys, Settings};
use crate::orchestrator::{LoadOutcome, Tutor};
use crate::session::Session;
use console::style;
use std::io::{self, BufRead, Write};
use tracing::debug;

use super::ask::print_response;

/// One line of chat input.
#[derive(Debug, PartialEq)]
enum ChatInput<'a> {
    Empty,
    Exit,
    Clear,
    Load(&'a str),
    Question(&'a str),
}

impl<'a> ChatInput<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            return Self::Exit;
        }
        if line.eq_ignore_ascii_case("clear") {
            return Self::Clear;
        }

        match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) if cmd.eq_ignore_ascii_case("load") && !rest.trim().is_empty() => {
                Self::Load(rest.trim())
            }
            _ => Self::Question(line),
        }
    }
}

/// Run the interactive chat command.
pub async fn run_chat(
    url: Option<String>,
    model: Option<String>,
    mut settings: Settings,
    keys: &ApiKeys,
) -> anyhow::Result<()> {
    if let Some(m) = model {
        settings.llm.model = m;
    }

    if let Err(e) = preflight::check(Operation::Fetch, &settings, keys) {
        Output::error(&format!("{}", e));
        Output::info("Run 'yt-tutor doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let tutor = Tutor::new(settings, keys)?;
    if !tutor.can_answer() {
        Output::warning("API key missing. Transcripts can be loaded but questions will fail.");
        Output::info("Run 'yt-tutor doctor' to see which key.");
    }

    let mut session = Session::new();

    println!("\n{}", style("yt-tutor chat").bold().cyan());
    println!(
        "{}\n",
        style("Type 'load <url>' to load a video, then ask questions. 'clear' unloads it, 'exit' quits.")
            .dim()
    );

    if let Some(url) = url {
        load(&tutor, &mut session, &url).await?;
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match ChatInput::parse(&line) {
            ChatInput::Empty => continue,
            ChatInput::Exit => {
                Output::info("Goodbye!");
                break;
            }
            ChatInput::Clear => {
                if session.clear().is_some() {
                    Output::info("Video unloaded.");
                } else {
                    Output::info("No video loaded.");
                }
            }
            ChatInput::Load(url) => load(&tutor, &mut session, url).await?,
            ChatInput::Question(question) => {
                let Some(video) = session.current() else {
                    Output::warning("Load a video first with 'load <url>'.");
                    continue;
                };

                let spinner = Output::spinner("Thinking...");
                let result = tutor.ask(video, question).await;
                spinner.finish_and_clear();

                match result {
                    Ok(response) => {
                        print_response(&response);
                        session.record_question();
                        debug!("{} question(s) asked", session.questions_asked());
                    }
                    Err(e) => Output::error(&format!("Error: {}", e)),
                }
            }
        }
    }

    Ok(())
}

/// Load `url` into the session. A missing transcript leaves the session untouched.
async fn load(tutor: &Tutor, session: &mut Session, url: &str) -> anyhow::Result<()> {
    let spinner = Output::spinner("Fetching transcript...");
    let outcome = tutor.load_video(url).await;
    spinner.finish_and_clear();

    match outcome? {
        LoadOutcome::Loaded(video) => {
            Output::success(&format!(
                "Loaded \"{}\" (saved to {})",
                video.title,
                video.transcript_path.display()
            ));
            Output::video_info(
                &video.title,
                video.video_id.as_str(),
                video.transcript.full_text.chars().count(),
                video.chunks.len(),
                video.transcript.duration_seconds,
            );
            session.replace(video);
        }
        LoadOutcome::NoTranscript(failure) => Output::error(failure.message()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ChatInput::parse("   \n"), ChatInput::Empty);
        assert_eq!(ChatInput::parse("exit\n"), ChatInput::Exit);
        assert_eq!(ChatInput::parse("QUIT"), ChatInput::Exit);
        assert_eq!(ChatInput::parse("clear"), ChatInput::Clear);
        assert_eq!(
            ChatInput::parse("load https://youtu.be/abc123\n"),
            ChatInput::Load("https://youtu.be/abc123")
        );
    }

    #[test]
    fn test_parse_questions() {
        assert_eq!(
            ChatInput::parse("What is said at the start?"),
            ChatInput::Question("What is said at the start?")
        );
        // A bare "load" has nothing to load
        assert_eq!(ChatInput::parse("load"), ChatInput::Question("load"));
        assert_eq!(
            ChatInput::parse("loading times matter?"),
            ChatInput::Question("loading times matter?")
        );
    }
}
