//! CLI command implementations

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cli::args::ConfigCommand;
use crate::config::{ProviderCredentials, Settings, GEMINI_API_KEY_ENV, GROQ_API_KEY_ENV};
use crate::llm::ModelId;
use crate::pipeline::AssessmentPipeline;
use crate::prompt::{build_prompt, Strategy};
use crate::render::{render_json, render_text};
use crate::schema::{parse_response, ClinicalAssessment, FieldFailure};
use crate::AssistError;

/// Analyze a conversation and print the assessment
pub async fn analyze_conversation(
    settings: &Settings,
    input: Option<PathBuf>,
    model: Option<String>,
    strategy: Option<String>,
    json: bool,
) -> Result<()> {
    let model: ModelId = model
        .as_deref()
        .unwrap_or(&settings.llm.default_model)
        .parse()?;
    let strategy = resolve_strategy(settings, strategy.as_deref())?;

    // Credentials are checked before the transcript is even read.
    let pipeline = AssessmentPipeline::new(settings, model, strategy)?;

    let conversation = read_input(input.as_deref())?;

    let assessment = pipeline.run(&conversation).await?;

    if json {
        println!("{}", render_json(&assessment)?);
        return Ok(());
    }

    println!(
        "Clinical assessment ({} / {}, {})",
        model,
        strategy,
        Local::now().format("%Y-%m-%d %H:%M")
    );
    println!();
    print!("{}", render_text(&assessment));

    Ok(())
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    assessment: Option<&'a ClinicalAssessment>,
    failures: &'a [FieldFailure],
}

/// Validate a raw model reply offline
pub fn validate_reply(input: Option<PathBuf>, json: bool) -> Result<()> {
    let reply = read_input(input.as_deref())?;

    match parse_response(&reply) {
        Ok(assessment) => {
            if json {
                let report = ValidationReport {
                    valid: true,
                    assessment: Some(&assessment),
                    failures: &[],
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Reply is valid.");
                println!();
                print!("{}", render_text(&assessment));
            }
            Ok(())
        }
        Err(e) => {
            if json {
                let report = ValidationReport {
                    valid: false,
                    assessment: None,
                    failures: &e.failures,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            Err(AssistError::Validation(e).into())
        }
    }
}

/// Print the assembled prompt for a conversation
pub fn show_prompt(
    settings: &Settings,
    input: Option<PathBuf>,
    strategy: Option<String>,
) -> Result<()> {
    let strategy = resolve_strategy(settings, strategy.as_deref())?;
    let conversation = read_input(input.as_deref())?;
    let prompt = build_prompt(strategy, conversation.trim_end());

    println!("=== system ({}) ===", strategy);
    println!("{}", prompt.system);
    println!();
    println!("=== human ===");
    println!("{}", prompt.human);

    Ok(())
}

#[derive(Serialize)]
struct ModelStatus {
    id: &'static str,
    provider: &'static str,
    api_model: &'static str,
    credential: &'static str,
    env_var: &'static str,
}

#[derive(Serialize)]
struct ModelsReport {
    default_model: String,
    default_strategy: String,
    models: Vec<ModelStatus>,
    strategies: Vec<&'static str>,
}

/// List supported models and whether their credentials are configured
pub fn list_models(settings: &Settings, json: bool) -> Result<()> {
    let report = collect_models_report(settings);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Models:");
    for model in &report.models {
        let marker = if model.id == report.default_model { "*" } else { " " };
        println!(
            "{} {:<18} {:<8} {:<10} ({})",
            marker, model.id, model.provider, model.credential, model.env_var
        );
    }
    println!();
    println!("Strategies:");
    for strategy in &report.strategies {
        let marker = if *strategy == report.default_strategy { "*" } else { " " };
        println!("{} {}", marker, strategy);
    }

    Ok(())
}

fn collect_models_report(settings: &Settings) -> ModelsReport {
    let models = ModelId::ALL
        .into_iter()
        .map(|model| {
            let (credentials, env_var) = provider_credentials(settings, model);
            ModelStatus {
                id: model.as_str(),
                provider: model.provider_name(),
                api_model: model.api_model(),
                credential: if credentials.has_api_key() {
                    "configured"
                } else {
                    "missing"
                },
                env_var,
            }
        })
        .collect();

    ModelsReport {
        default_model: settings.llm.default_model.clone(),
        default_strategy: settings.llm.default_strategy.clone(),
        models,
        strategies: Strategy::ALL.into_iter().map(Strategy::as_str).collect(),
    }
}

fn provider_credentials(
    settings: &Settings,
    model: ModelId,
) -> (&ProviderCredentials, &'static str) {
    match model {
        ModelId::Gemini25Flash => (&settings.providers.gemini, GEMINI_API_KEY_ENV),
        ModelId::Llama33_70b => (&settings.providers.groq, GROQ_API_KEY_ENV),
    }
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(&masked(settings))?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

// Helper functions

fn resolve_strategy(settings: &Settings, strategy: Option<&str>) -> Result<Strategy> {
    let strategy = strategy
        .unwrap_or(&settings.llm.default_strategy)
        .parse::<Strategy>()?;
    Ok(strategy)
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

fn masked(settings: &Settings) -> Settings {
    let mut settings = settings.clone();
    for credentials in [
        &mut settings.providers.gemini,
        &mut settings.providers.groq,
    ] {
        if credentials.has_api_key() {
            credentials.api_key = "********".to_string();
        }
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn models_report_tracks_credentials() {
        let mut settings = Settings::default();
        settings.providers.groq.api_key = "gsk-key".to_string();

        let report = collect_models_report(&settings);
        assert_eq!(report.models.len(), 2);
        assert_eq!(report.models[0].id, "gemini-2.5-flash");
        assert_eq!(report.models[0].credential, "missing");
        assert_eq!(report.models[1].credential, "configured");
        assert_eq!(report.models[1].env_var, "GROQ_API_KEY");
        assert_eq!(report.strategies, vec!["few-shot", "chain-of-thought"]);
    }

    #[test]
    fn masked_settings_hide_api_keys() {
        let mut settings = Settings::default();
        settings.providers.gemini.api_key = "secret".to_string();

        let shown = toml::to_string_pretty(&masked(&settings)).unwrap();
        assert!(!shown.contains("secret"));
        assert!(shown.contains("********"));
        assert_eq!(settings.providers.gemini.api_key, "secret");
    }

    #[test]
    fn strategy_falls_back_to_config_default() {
        let mut settings = Settings::default();
        settings.llm.default_strategy = "chain-of-thought".to_string();

        assert_eq!(
            resolve_strategy(&settings, None).unwrap(),
            Strategy::ChainOfThought
        );
        assert_eq!(
            resolve_strategy(&settings, Some("few-shot")).unwrap(),
            Strategy::FewShot
        );
        assert!(resolve_strategy(&settings, Some("socratic")).is_err());
    }

    #[test]
    fn read_input_reports_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/conversation.txt"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
