//! Prompt assembly for the two prompting strategies
//!
//! Pure and deterministic: a strategy plus a conversation always yields the same
//! system and human messages.

mod few_shot;

pub use few_shot::{example_assessment, EXAMPLE_CONVERSATION};

use std::fmt;
use std::str::FromStr;

use crate::schema::format_instructions;
use crate::AssistError;

/// Prompting approach used to steer the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Worked-example based.
    FewShot,
    /// Step-by-step grading instructions plus the schema description.
    ChainOfThought,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::FewShot, Strategy::ChainOfThought];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FewShot => "few-shot",
            Self::ChainOfThought => "chain-of-thought",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = AssistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                AssistError::Config(format!(
                    "Unsupported strategy '{}'. Supported strategies: few-shot, chain-of-thought",
                    s
                ))
            })
    }
}

/// A ready-to-send system + human message pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub human: String,
}

/// Build the prompt for a conversation using the given strategy.
pub fn build_prompt(strategy: Strategy, conversation: &str) -> PromptPair {
    PromptPair {
        system: system_message(strategy),
        human: human_message(conversation),
    }
}

/// System instructions for a strategy.
pub fn system_message(strategy: Strategy) -> String {
    match strategy {
        Strategy::FewShot => few_shot_system_message(),
        Strategy::ChainOfThought => chain_of_thought_system_message(),
    }
}

fn human_message(conversation: &str) -> String {
    format!("Conversation:\n{conversation}")
}

fn few_shot_system_message() -> String {
    let example_output = match serde_json::to_string_pretty(&example_assessment()) {
        Ok(json) => json,
        Err(e) => {
            tracing::debug!("Failed to serialize few-shot example: {}", e);
            String::from("{}")
        }
    };

    format!(
        "You are an expert medical assistant. Analyze the doctor-patient conversation and generate a complete clinical assessment.\n\
\n\
Use this example to guide your output format and clinical reasoning:\n\
\n\
EXAMPLE INPUT:\n\
{EXAMPLE_CONVERSATION}\n\
\n\
EXAMPLE OUTPUT:\n\
{example_output}\n\
\n\
Now process the new conversation below. Output ONLY a valid JSON object that strictly matches the required structure. \
Do not include any other text, explanations, or markdown."
    )
}

fn chain_of_thought_system_message() -> String {
    let format_instructions = format_instructions();

    format!(
        "You are a senior clinical assistant. Perform a step-by-step analysis of the conversation to generate a comprehensive medical assessment.\n\
\n\
Reason through each component:\n\
\n\
1. **Summary**: Write a concise 2–3 sentence narrative of the consultation.\n\
\n\
2. **Medical Report**: Extract:\n\
\x20\x20- Chief complaint\n\
\x20\x20- Symptoms (as a list of strings)\n\
\x20\x20- Medical history (past illnesses, surgeries)\n\
\x20\x20- Social history (alcohol, tobacco, drugs)\n\
\x20\x20- Duration of current symptoms\n\
\x20\x20- Whether prior similar episodes occurred (true/false)\n\
\n\
3. **Disease Prediction**: Based on ALL findings, state the single most likely diagnosis and assign a confidence score (0.0 to 1.0) using these guidelines:\n\
\x20\x20- 0.9–1.0: Classic presentation with clear diagnostic criteria\n\
\x20\x20- 0.7–0.89: Strong clinical evidence, but confirmation (e.g., labs/imaging) needed\n\
\x20\x20- 0.5–0.69: Likely diagnosis, but significant differentials exist\n\
\x20\x20- <0.5: Suspicion only — insufficient evidence\n\
\n\
The `confidence_score` MUST be a decimal number (e.g., 0.85), NOT a string or null.\n\
\n\
4. **Medications**: Suggest general, safe intervention classes (e.g., \"diuretics\", \"alcohol cessation support\"). Avoid brand names. Use an empty list `[]` if none.\n\
\n\
5. **Follow-up Questions**: Propose 3 targeted questions to narrow differentials or assess severity. Use an empty list if none.\n\
\n\
FINAL INSTRUCTIONS:\n\
- Output ONLY a valid JSON object.\n\
- Do NOT include any explanations, markdown, code blocks (```), or extra text.\n\
- If a field cannot be determined, use `null` for objects or `[]` for lists — but NEVER omit required structure.\n\
- Ensure `confidence_score` is always a number between 0.0 and 1.0.\n\
\n\
Output JSON now matching this structure:\n\
{format_instructions}"
    )
}
