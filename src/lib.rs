//! medassist - Turn doctor-patient conversation transcripts into structured clinical summaries
//!
//! A conversation is sent to a hosted LLM with one of two prompting strategies,
//! and the reply is coerced and validated into a [`schema::ClinicalAssessment`].

pub mod cli;
pub mod config;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod render;
pub mod schema;

use thiserror::Error;

/// Main error type for medassist
///
/// Every kind is terminal for the current invocation; nothing is retried.
#[derive(Error, Debug)]
pub enum AssistError {
    /// Unknown model or strategy, or a missing credential. Raised before any network call.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The text-generation call failed.
    #[error("Provider error: {0:#}")]
    Provider(#[source] anyhow::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] schema::ValidationError),
}

pub type Result<T> = std::result::Result<T, AssistError>;
