use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;
use crate::llm::groq::GroqClient;
use crate::prompt::PromptPair;
use crate::AssistError;

/// Hosted text-generation service.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name used in logs.
    fn name(&self) -> &'static str;

    /// Send one prompt and return the raw text of the reply.
    async fn complete(&self, prompt: &PromptPair) -> Result<String>;
}

/// Supported models, selected by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelId {
    /// Google Gemini 2.5 Flash
    Gemini25Flash,
    /// Meta Llama 3.3 70B served by Groq
    Llama33_70b,
}

impl ModelId {
    pub const ALL: [ModelId; 2] = [ModelId::Gemini25Flash, ModelId::Llama33_70b];

    /// Identifier accepted on the command line and in config.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gemini25Flash => "gemini-2.5-flash",
            Self::Llama33_70b => "llama-3.3-70b",
        }
    }

    /// Model name sent to the provider API.
    pub fn api_model(self) -> &'static str {
        match self {
            Self::Gemini25Flash => "gemini-2.5-flash",
            Self::Llama33_70b => "llama-3.3-70b-versatile",
        }
    }

    pub fn provider_name(self) -> &'static str {
        match self {
            Self::Gemini25Flash => "gemini",
            Self::Llama33_70b => "groq",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = AssistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|model| model.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                AssistError::Config(format!(
                    "Unsupported model '{}'. Supported models: gemini-2.5-flash, llama-3.3-70b",
                    s
                ))
            })
    }
}

/// Build the provider for a model from runtime settings.
///
/// Fails with a configuration error when the provider's API key is missing, so
/// that no request is attempted without credentials.
pub fn build_provider(
    model: ModelId,
    settings: &Settings,
) -> crate::Result<Box<dyn LlmProvider>> {
    let provider: Box<dyn LlmProvider> = match model {
        ModelId::Gemini25Flash => Box::new(GeminiClient::from_settings(model, settings)?),
        ModelId::Llama33_70b => Box::new(GroqClient::from_settings(model, settings)?),
    };
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn model_identifiers_parse() {
        assert_eq!(
            "gemini-2.5-flash".parse::<ModelId>().unwrap(),
            ModelId::Gemini25Flash
        );
        assert_eq!(
            "llama-3.3-70b".parse::<ModelId>().unwrap(),
            ModelId::Llama33_70b
        );
        assert_eq!(ModelId::Llama33_70b.api_model(), "llama-3.3-70b-versatile");
    }

    #[test]
    fn unsupported_model_returns_config_error() {
        let err = "gpt-4o".parse::<ModelId>().unwrap_err();
        assert!(matches!(err, AssistError::Config(_)));
        assert!(err.to_string().contains("Unsupported model 'gpt-4o'"));
    }

    #[test]
    fn gemini_provider_requires_api_key() {
        let settings = Settings::default();

        let err = match build_provider(ModelId::Gemini25Flash, &settings) {
            Ok(_) => panic!("expected provider creation to fail"),
            Err(e) => e,
        };
        assert!(matches!(err, AssistError::Config(_)));
        assert!(err.to_string().contains("GOOGLE_API_KEY is required"));
    }

    #[test]
    fn groq_provider_requires_api_key() {
        let settings = Settings::default();

        let err = match build_provider(ModelId::Llama33_70b, &settings) {
            Ok(_) => panic!("expected provider creation to fail"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("GROQ_API_KEY is required"));
    }

    #[test]
    fn providers_build_with_keys() {
        let mut settings = Settings::default();
        settings.providers.gemini.api_key = "g-key".to_string();
        settings.providers.groq.api_key = "gsk-key".to_string();

        let gemini = build_provider(ModelId::Gemini25Flash, &settings).unwrap();
        assert_eq!(gemini.name(), "gemini");
        let groq = build_provider(ModelId::Llama33_70b, &settings).unwrap();
        assert_eq!(groq.name(), "groq");
    }
}
