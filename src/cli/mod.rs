//! CLI module for yt-tutor.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// yt-tutor - chat with a YouTube video
///
/// Fetches a video's English transcript, saves it to a text file and answers
/// questions about it with a hosted LLM.
#[derive(Parser, Debug)]
#[command(name = "yt-tutor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the video ID found in a YouTube URL
    Id {
        /// YouTube URL (watch, youtu.be, embed or /v/ form)
        url: String,
    },

    /// Look up a video's title
    Title {
        /// YouTube URL
        url: String,
    },

    /// Fetch the English transcript and save it to a text file
    Fetch {
        /// YouTube URL
        url: String,

        /// Transcript file name (must end in .txt)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Ask a single question about a video
    Ask {
        /// YouTube URL
        url: String,

        /// The question to ask
        question: String,

        /// Number of transcript excerpts handed to the model
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// LLM model to use for response generation
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Start an interactive session about one video at a time
    Chat {
        /// Video to load at startup
        url: Option<String>,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Check API key, configuration and output directory
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the current configuration to the config file
    Save,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::parse_from([
            "yt-tutor",
            "-vv",
            "ask",
            "https://youtu.be/dQw4w9WgXcQ",
            "What is this about?",
            "-k",
            "6",
        ]);

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Ask {
                url,
                question,
                top_k,
                model,
            } => {
                assert_eq!(url, "https://youtu.be/dQw4w9WgXcQ");
                assert_eq!(question, "What is this about?");
                assert_eq!(top_k, Some(6));
                assert!(model.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_fetch_with_global_config() {
        let cli = Cli::parse_from([
            "yt-tutor",
            "fetch",
            "https://youtu.be/dQw4w9WgXcQ",
            "-o",
            "notes.txt",
            "--config",
            "/tmp/tutor.toml",
        ]);

        assert_eq!(cli.config.as_deref(), Some("/tmp/tutor.toml"));
        assert!(matches!(
            cli.command,
            Commands::Fetch { output: Some(ref o), .. } if o == "notes.txt"
        ));
    }

    #[test]
    fn test_chat_url_optional() {
        let cli = Cli::parse_from(["yt-tutor", "chat"]);
        assert!(matches!(cli.command, Commands::Chat { url: None, .. }));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
