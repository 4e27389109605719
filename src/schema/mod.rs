//! Clinical assessment schema
//!
//! Typed records for the structured result of one conversation analysis, plus
//! the two-phase pipeline that turns a raw model reply into them: a pure
//! coercion pass over untyped JSON ([`coerce`]) followed by strict whole-input
//! validation ([`validate`]).

mod coerce;
mod validate;

pub use coerce::{coerce, parse_yes_no};
pub use validate::{parse_response, validate, FieldFailure, ValidationError, ROOT_PATH};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured result of analyzing one doctor-patient conversation.
///
/// Every section is independently optional; a partial assessment is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClinicalAssessment {
    /// Concise 2-3 sentence narrative of the consultation.
    #[serde(default)]
    pub summary: Option<String>,

    /// Findings extracted from the conversation.
    #[serde(default)]
    pub medical_report: Option<MedicalReport>,

    /// Most likely diagnosis with a confidence score.
    #[serde(default)]
    pub disease_prediction: Option<DiseasePrediction>,

    /// General intervention classes worth considering.
    #[serde(default)]
    pub medication_suggestions: Option<MedicationSuggestions>,

    /// Questions that would narrow the differential.
    #[serde(default)]
    pub follow_up_questions: Option<FollowUpQuestions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MedicalReport {
    /// Main reason for the visit.
    #[serde(default)]
    pub chief_complaint: Option<String>,

    /// Reported symptoms, one per entry.
    #[serde(default)]
    pub symptoms: Option<Vec<String>>,

    /// Past illnesses and surgeries.
    #[serde(default)]
    pub medical_history: Option<String>,

    /// Alcohol, tobacco, drug use and similar.
    #[serde(default)]
    pub social_history: Option<String>,

    /// How long the current symptoms have lasted.
    #[serde(default)]
    pub duration_of_symptoms: Option<String>,

    /// Whether similar episodes occurred before (true/false, null if not determined).
    #[serde(default)]
    #[schemars(with = "Option<bool>")]
    pub prior_episodes: PriorEpisodes,
}

/// Tri-state answer to "did this happen before?".
///
/// Serialized as `true`, `false` or `null`. `Unknown` means the conversation did
/// not settle the question and must never be read as `No`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum PriorEpisodes {
    Yes,
    No,
    #[default]
    Unknown,
}

impl PriorEpisodes {
    pub fn as_bool(self) -> Option<bool> {
        self.into()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<bool> for PriorEpisodes {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl From<Option<bool>> for PriorEpisodes {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unknown, Self::from)
    }
}

impl From<PriorEpisodes> for Option<bool> {
    fn from(value: PriorEpisodes) -> Self {
        match value {
            PriorEpisodes::Yes => Some(true),
            PriorEpisodes::No => Some(false),
            PriorEpisodes::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DiseasePrediction {
    /// Single most likely diagnosis.
    #[serde(default)]
    pub disease: Option<String>,

    /// Confidence in the diagnosis, between 0.0 and 1.0 inclusive.
    #[serde(default)]
    #[schemars(range(min = 0.0, max = 1.0))]
    pub confidence_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MedicationSuggestions {
    /// Intervention classes, no brand names. Empty if none.
    #[serde(default)]
    pub medications: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FollowUpQuestions {
    /// Targeted follow-up questions. Empty if none.
    pub questions: Vec<String>,
}

/// Describe the expected reply shape for inclusion in a prompt.
pub fn format_instructions() -> String {
    let schema = schemars::schema_for!(ClinicalAssessment);
    let schema = match serde_json::to_string_pretty(&schema) {
        Ok(schema) => schema,
        Err(e) => {
            tracing::debug!("Failed to serialize assessment schema: {}", e);
            "{ \"error\": \"Failed to serialize schema\" }".to_string()
        }
    };

    format!(
        "The output should be formatted as a JSON instance that conforms to the JSON schema below.\n\
\n\
As an example, for the schema {{\"properties\": {{\"foo\": {{\"type\": \"array\", \"items\": {{\"type\": \"string\"}}}}}}, \"required\": [\"foo\"]}}\n\
the object {{\"foo\": [\"bar\", \"baz\"]}} is a well-formatted instance of the schema. \
The object {{\"properties\": {{\"foo\": [\"bar\", \"baz\"]}}}} is not well-formatted.\n\
\n\
Here is the output schema:\n\
```\n\
{schema}\n\
```"
    )
}
