//! medassist - Structured clinical summaries from doctor-patient conversations
//!
//! Entry point for the medassist CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{
    layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

use medassist::cli::{Cli, Commands};
use medassist::config::Settings;

/// `RUST_LOG` wins over the configured level.
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Start logging at `info` so config loading is visible; the returned handle
/// swaps in the configured level once settings are known.
fn init_logging() -> reload::Handle<EnvFilter, Registry> {
    let (filter, handle) = reload::Layer::new(env_filter("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
    handle
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let log_filter = init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            medassist::cli::completions::print(shell);
        }
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load()?;

            let level = if cli.verbose {
                "debug"
            } else {
                settings.general.log_level.as_str()
            };
            log_filter.reload(env_filter(level))?;

            // Execute command
            match command {
                Commands::Analyze {
                    input,
                    model,
                    strategy,
                    json,
                } => {
                    medassist::cli::commands::analyze_conversation(
                        &settings, input, model, strategy, json,
                    )
                    .await?;
                }
                Commands::Validate { input, json } => {
                    medassist::cli::commands::validate_reply(input, json)?;
                }
                Commands::Prompt { input, strategy } => {
                    medassist::cli::commands::show_prompt(&settings, input, strategy)?;
                }
                Commands::Models { json } => {
                    medassist::cli::commands::list_models(&settings, json)?;
                }
                Commands::Config(config_cmd) => {
                    medassist::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}
