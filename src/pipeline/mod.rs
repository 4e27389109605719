//! Invocation pipeline: prompt -> model -> validator
//!
//! Each run is one independent round trip. Nothing is cached, retried or
//! carried over between runs.

use tracing::Instrument;
use uuid::Uuid;

use crate::config::Settings;
use crate::llm::{build_provider, LlmProvider, ModelId};
use crate::prompt::{build_prompt, Strategy};
use crate::schema::{parse_response, ClinicalAssessment};
use crate::{AssistError, Result};

pub struct AssessmentPipeline {
    provider: Box<dyn LlmProvider>,
    strategy: Strategy,
}

impl AssessmentPipeline {
    /// Resolve the provider for `model` up front.
    ///
    /// Missing credentials surface here as [`AssistError::Config`], before any
    /// request is made.
    pub fn new(settings: &Settings, model: ModelId, strategy: Strategy) -> Result<Self> {
        let provider = build_provider(model, settings)?;
        Ok(Self::with_provider(provider, strategy))
    }

    pub fn with_provider(provider: Box<dyn LlmProvider>, strategy: Strategy) -> Self {
        Self { provider, strategy }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Analyze one conversation.
    pub async fn run(&self, conversation: &str) -> Result<ClinicalAssessment> {
        if conversation.trim().is_empty() {
            return Err(AssistError::InvalidInput(
                "conversation is empty".to_string(),
            ));
        }

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "assessment",
            %request_id,
            provider = self.provider.name(),
            strategy = %self.strategy
        );

        async move {
            let prompt = build_prompt(self.strategy, conversation);
            tracing::info!("Requesting clinical assessment");
            tracing::debug!(
                system_chars = prompt.system.len(),
                human_chars = prompt.human.len(),
                "Prompt assembled"
            );

            let reply = self
                .provider
                .complete(&prompt)
                .await
                .map_err(AssistError::Provider)?;
            tracing::debug!(reply_chars = reply.len(), "Received model reply");

            match parse_response(&reply) {
                Ok(assessment) => {
                    tracing::info!("Assessment validated");
                    Ok(assessment)
                }
                Err(e) => {
                    tracing::warn!(failures = e.failures.len(), "Model reply failed validation");
                    Err(AssistError::Validation(e))
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// Resolve identifiers, build the pipeline and analyze one conversation.
pub async fn run(
    settings: &Settings,
    model_id: &str,
    strategy_id: &str,
    conversation: &str,
) -> Result<ClinicalAssessment> {
    let model: ModelId = model_id.parse()?;
    let strategy: Strategy = strategy_id.parse()?;
    let pipeline = AssessmentPipeline::new(settings, model, strategy)?;
    pipeline.run(conversation).await
}
