use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{Settings, GROQ_API_KEY_ENV};
use crate::llm::client::{LlmProvider, ModelId};
use crate::prompt::PromptPair;
use crate::AssistError;

const DEFAULT_GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1";

/// Groq chat completions client (OpenAI-compatible API).
pub struct GroqClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
    temperature: f32,
    max_tokens: u32,
}

impl GroqClient {
    pub fn from_settings(model: ModelId, settings: &Settings) -> crate::Result<Self> {
        let credentials = &settings.providers.groq;
        let api_key = credentials.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(AssistError::Config(format!(
                "{GROQ_API_KEY_ENV} is required for Llama 3.3. Set providers.groq.api_key in config or {GROQ_API_KEY_ENV}."
            )));
        }

        let endpoint = if credentials.endpoint.trim().is_empty() {
            DEFAULT_GROQ_ENDPOINT.to_string()
        } else {
            credentials.endpoint.trim().trim_end_matches('/').to_string()
        };

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.llm.timeout_secs))
            .build()
            .context("Failed to build Groq HTTP client")
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
        format!("{}/chat/completions", self.endpoint)
    }

    fn request_body<'a>(&'a self, prompt: &'a PromptPair) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.human,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }
}

#[async_trait]
impl LlmProvider for GroqClient {
    fn name(&self) -> &'static str {
        "groq"
    }

    async fn complete(&self, prompt: &PromptPair) -> Result<String> {
        let body = self.request_body(prompt);

        let response = self
            .http
            .post(self.request_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Groq request failed")?;

        let response = response
            .error_for_status()
            .context("Groq returned an error status")?;

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse Groq response")?;

        payload
            .text()
            .context("Groq response did not contain any text")
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    fn text(&self) -> Option<String> {
        self.choices
            .iter()
            .filter_map(|c| c.message.content.as_deref())
            .map(str::trim)
            .find(|t| !t.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{build_prompt, Strategy};

    fn client() -> GroqClient {
        let mut settings = Settings::default();
        settings.providers.groq.api_key = "gsk-key".to_string();
        GroqClient::from_settings(ModelId::Llama33_70b, &settings).unwrap()
    }

    #[test]
    fn request_targets_chat_completions() {
        assert_eq!(
            client().request_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn request_body_is_openai_compatible() {
        let prompt = build_prompt(Strategy::ChainOfThought, "Doctor: Hello.");
        let client = client();
        let body = serde_json::to_value(client.request_body(&prompt)).unwrap();

        assert_eq!(body["model"], "llama-3.3-70b-versatile");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], prompt.system);
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], prompt.human);
        assert_eq!(body["max_tokens"], 2048);
        assert_eq!(body["response_format"]["type"], "json_object");
    }

    #[test]
    fn response_text_skips_empty_choices() {
        let payload: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [
                { "message": { "content": null } },
                { "message": { "content": " {\"summary\": \"ok\"} " } }
            ]
        }))
        .unwrap();
        assert_eq!(payload.text().unwrap(), "{\"summary\": \"ok\"}");
    }
}
