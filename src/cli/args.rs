//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// medassist - Structured clinical summaries from doctor-patient conversations
#[derive(Parser, Debug)]
#[command(name = "medassist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a conversation and print the clinical assessment
    Analyze {
        /// Conversation transcript file (reads stdin if omitted or "-")
        input: Option<PathBuf>,

        /// Model to use (gemini-2.5-flash, llama-3.3-70b)
        #[arg(short, long)]
        model: Option<String>,

        /// Prompting strategy (few-shot, chain-of-thought)
        #[arg(short, long)]
        strategy: Option<String>,

        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a raw model reply against the assessment schema
    Validate {
        /// File holding the model reply (reads stdin if omitted or "-")
        input: Option<PathBuf>,

        /// Print the result or the failures as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the assembled prompt without calling any model
    Prompt {
        /// Conversation transcript file (reads stdin if omitted or "-")
        input: Option<PathBuf>,

        /// Prompting strategy (few-shot, chain-of-thought)
        #[arg(short, long)]
        strategy: Option<String>,
    },

    /// List supported models and strategies
    Models {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate a shell completion script
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration (API keys masked)
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
