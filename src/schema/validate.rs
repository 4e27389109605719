//! Strict whole-input validation of coerced model output

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use super::coerce::coerce;
use super::{
    ClinicalAssessment, DiseasePrediction, FollowUpQuestions, MedicalReport,
    MedicationSuggestions, PriorEpisodes,
};

/// Path used for failures that concern the reply as a whole.
pub const ROOT_PATH: &str = "$";

/// One field that failed to validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFailure {
    /// Dotted field path, e.g. `disease_prediction.confidence_score` or
    /// `medical_report.symptoms[1]`.
    pub path: String,
    pub message: String,
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every failure found in one reply, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub failures: Vec<FieldFailure>,
}

impl ValidationError {
    fn single(path: &str, message: impl Into<String>) -> Self {
        Self {
            failures: vec![FieldFailure {
                path: path.to_string(),
                message: message.into(),
            }],
        }
    }

    /// First failure reported for `path`, if any.
    pub fn failure_at(&self, path: &str) -> Option<&FieldFailure> {
        self.failures.iter().find(|failure| failure.path == path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.failures.len();
        write!(
            f,
            "{} field{} failed validation",
            count,
            if count == 1 { "" } else { "s" }
        )?;
        for failure in &self.failures {
            write!(f, "\n  - {}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Parse a raw model reply into a validated assessment.
///
/// Tolerates surrounding whitespace, prose around a fenced block and Markdown
/// code fences. Text that is not JSON is reported as a failure at [`ROOT_PATH`].
pub fn parse_response(text: &str) -> Result<ClinicalAssessment, ValidationError> {
    let json = extract_json(text);
    let raw: Value = serde_json::from_str(json).map_err(|e| {
        ValidationError::single(ROOT_PATH, format!("response is not valid JSON: {}", e))
    })?;
    validate(&raw)
}

/// Coerce and validate a raw JSON value.
pub fn validate(raw: &Value) -> Result<ClinicalAssessment, ValidationError> {
    let coerced = coerce(raw.clone());
    let Some(root) = coerced.as_object() else {
        return Err(ValidationError::single(
            ROOT_PATH,
            format!("expected a JSON object, got {}", kind(&coerced)),
        ));
    };

    let mut checker = Checker::default();
    let assessment = ClinicalAssessment {
        summary: checker.string(root, "", "summary"),
        medical_report: checker.section(root, "medical_report", medical_report),
        disease_prediction: checker.section(root, "disease_prediction", disease_prediction),
        medication_suggestions: checker.section(
            root,
            "medication_suggestions",
            medication_suggestions,
        ),
        follow_up_questions: checker.section(root, "follow_up_questions", follow_up_questions),
    };

    checker.finish(assessment)
}

fn medical_report(checker: &mut Checker, obj: &Map<String, Value>, path: &str) -> MedicalReport {
    MedicalReport {
        chief_complaint: checker.string(obj, path, "chief_complaint"),
        symptoms: checker.string_list(obj, path, "symptoms"),
        medical_history: checker.string(obj, path, "medical_history"),
        social_history: checker.string(obj, path, "social_history"),
        duration_of_symptoms: checker.string(obj, path, "duration_of_symptoms"),
        prior_episodes: checker.prior_episodes(obj, path),
    }
}

fn disease_prediction(
    checker: &mut Checker,
    obj: &Map<String, Value>,
    path: &str,
) -> DiseasePrediction {
    DiseasePrediction {
        disease: checker.string(obj, path, "disease"),
        confidence_score: checker.confidence_score(obj, path),
    }
}

fn medication_suggestions(
    checker: &mut Checker,
    obj: &Map<String, Value>,
    path: &str,
) -> MedicationSuggestions {
    MedicationSuggestions {
        medications: checker.string_list(obj, path, "medications"),
    }
}

fn follow_up_questions(
    checker: &mut Checker,
    obj: &Map<String, Value>,
    path: &str,
) -> FollowUpQuestions {
    let questions = match obj.get("questions") {
        None => {
            checker.fail(&join(path, "questions"), "field is required");
            Vec::new()
        }
        Some(Value::Null) => {
            checker.fail(&join(path, "questions"), "expected a list of strings, got null");
            Vec::new()
        }
        Some(_) => checker.string_list(obj, path, "questions").unwrap_or_default(),
    };
    FollowUpQuestions { questions }
}

/// Accumulates failures while building typed records.
#[derive(Default)]
struct Checker {
    failures: Vec<FieldFailure>,
}

impl Checker {
    fn fail(&mut self, path: &str, message: impl Into<String>) {
        self.failures.push(FieldFailure {
            path: path.to_string(),
            message: message.into(),
        });
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.failures.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError {
                failures: self.failures,
            })
        }
    }

    fn section<T>(
        &mut self,
        root: &Map<String, Value>,
        key: &str,
        build: fn(&mut Checker, &Map<String, Value>, &str) -> T,
    ) -> Option<T> {
        match root.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::Object(obj)) => Some(build(self, obj, key)),
            Some(other) => {
                self.fail(key, format!("expected an object, got {}", kind(other)));
                None
            }
        }
    }

    fn string(&mut self, obj: &Map<String, Value>, path: &str, key: &str) -> Option<String> {
        match obj.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => {
                self.fail(
                    &join(path, key),
                    format!("expected a string, got {}", kind(other)),
                );
                None
            }
        }
    }

    fn string_list(
        &mut self,
        obj: &Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<Vec<String>> {
        let path = join(path, key);
        match obj.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => {
                let mut list = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    match item {
                        Value::String(text) => list.push(text.clone()),
                        other => self.fail(
                            &format!("{}[{}]", path, index),
                            format!("expected a string, got {}", kind(other)),
                        ),
                    }
                }
                Some(list)
            }
            Some(other) => {
                self.fail(
                    &path,
                    format!("expected a list of strings, got {}", kind(other)),
                );
                None
            }
        }
    }

    fn prior_episodes(&mut self, obj: &Map<String, Value>, path: &str) -> PriorEpisodes {
        match obj.get("prior_episodes") {
            None | Some(Value::Null) => PriorEpisodes::Unknown,
            Some(Value::Bool(flag)) => PriorEpisodes::from(*flag),
            Some(Value::Number(n)) if n.as_f64() == Some(1.0) => PriorEpisodes::Yes,
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => PriorEpisodes::No,
            Some(other) => {
                self.fail(
                    &join(path, "prior_episodes"),
                    format!("expected a boolean, got {}", kind(other)),
                );
                PriorEpisodes::Unknown
            }
        }
    }

    fn confidence_score(&mut self, obj: &Map<String, Value>, path: &str) -> Option<f64> {
        let path = join(path, "confidence_score");
        let score = match obj.get("confidence_score") {
            None | Some(Value::Null) => return None,
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
            Some(other) => {
                self.fail(&path, format!("expected a number, got {}", kind(other)));
                return None;
            }
        };

        match score {
            Some(value) if !value.is_finite() => {
                self.fail(&path, "expected a finite number");
                None
            }
            Some(value) if (0.0..=1.0).contains(&value) => Some(value),
            Some(value) => {
                self.fail(
                    &path,
                    format!("value {} is out of range, must be between 0.0 and 1.0", value),
                );
                None
            }
            None => {
                self.fail(&path, "expected a number, got unparseable text");
                None
            }
        }
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Locate the JSON document inside a model reply.
fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed;
    }

    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        // Skip the language tag line, e.g. ```json
        let body = after.split_once('\n').map_or(after, |(_, body)| body);
        let body = body.find("```").map_or(body, |end| &body[..end]);
        return body.trim();
    }

    trimmed
}
