use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{Settings, GEMINI_API_KEY_ENV};
use crate::llm::client::{LlmProvider, ModelId};
use crate::prompt::PromptPair;
use crate::AssistError;

const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
    temperature: f32,
    max_tokens: u32,
}

impl GeminiClient {
    pub fn from_settings(model: ModelId, settings: &Settings) -> crate::Result<Self> {
        let credentials = &settings.providers.gemini;
        let api_key = credentials.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(AssistError::Config(format!(
                "{GEMINI_API_KEY_ENV} is required for Gemini. Set providers.gemini.api_key in config or {GEMINI_API_KEY_ENV}."
            )));
        }

        let endpoint = if credentials.endpoint.trim().is_empty() {
            DEFAULT_GEMINI_ENDPOINT.to_string()
        } else {
            credentials.endpoint.trim().trim_end_matches('/').to_string()
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.llm.timeout_secs))
            .build()
            .context("Failed to build Gemini HTTP client")
            .map_err(AssistError::Provider)?;

        Ok(Self {
            http,
            api_key,
            model: model.api_model().to_string(),
            endpoint,
            temperature: settings.llm.temperature,
            max_tokens: settings.llm.max_tokens,
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint, self.model
        )
    }

    fn request_body(&self, prompt: &PromptPair) -> GeminiGenerateContentRequest {
        GeminiGenerateContentRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: prompt.system.clone(),
                }],
            },
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: prompt.human.clone(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
                response_mime_type: "application/json",
            },
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, prompt: &PromptPair) -> Result<String> {
        let body = self.request_body(prompt);

        let response = self
            .http
            .post(self.request_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .context("Gemini request failed")?;

        let response = response
            .error_for_status()
            .context("Gemini returned an error status")?;

        let payload: GeminiGenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        payload
            .text()
            .context("Gemini response did not contain any text")
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerateContentRequest {
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiGenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

impl GeminiGenerateContentResponse {
    /// Concatenated text of the first candidate that has any.
    fn text(&self) -> Option<String> {
        self.candidates
            .iter()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .map(|text| text.trim().to_string())
            .find(|text| !text.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContentResponse,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}
