//! yt-tutor CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use yt_tutor::cli::{commands, Cli, Commands};
use yt_tutor::config::{ApiKeys, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("yt_tutor={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config_path = cli.config.as_ref().map(PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;
    let keys = ApiKeys::from_env(&settings);

    match cli.command {
        Commands::Id { url } => {
            commands::run_id(&url)?;
        }

        Commands::Title { url } => {
            commands::run_title(&url, &settings).await?;
        }

        Commands::Fetch { url, output } => {
            commands::run_fetch(&url, output, settings, &keys).await?;
        }

        Commands::Ask {
            url,
            question,
            top_k,
            model,
        } => {
            commands::run_ask(&url, &question, top_k, model, settings, &keys).await?;
        }

        Commands::Chat { url, model } => {
            commands::run_chat(url, model, settings, &keys).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, &keys, config_path.as_ref())?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, &settings, config_path.as_ref())?;
        }
    }

    Ok(())
}
