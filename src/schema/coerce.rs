//! Pre-validation normalization of raw model output

use serde_json::{json, Map, Value};

/// Normalize known model quirks in a raw reply before it is validated.
///
/// - `medical_report.prior_episodes` given as text is mapped to `true`,
///   `false` or `null` (see [`parse_yes_no`]).
/// - `follow_up_questions` given as a bare list is wrapped as
///   `{"questions": [...]}`.
///
/// Anything else passes through untouched, including values of the wrong
/// type, which are left for validation to report.
pub fn coerce(mut raw: Value) -> Value {
    if let Some(root) = raw.as_object_mut() {
        if let Some(Value::Object(report)) = root.get_mut("medical_report") {
            normalize_prior_episodes(report);
        }

        if let Some(questions) = root.get_mut("follow_up_questions") {
            if questions.is_array() {
                let list = questions.take();
                *questions = json!({ "questions": list });
            }
        }
    }

    raw
}

fn normalize_prior_episodes(report: &mut Map<String, Value>) {
    let coerced = match report.get("prior_episodes") {
        Some(Value::String(text)) => parse_yes_no(text).map_or(Value::Null, Value::Bool),
        _ => return,
    };
    report.insert("prior_episodes".to_string(), coerced);
}

/// Interpret free-text yes/no answers.
///
/// Matching ignores case and surrounding whitespace only; inner spacing must
/// be exact. Returns `None` for text that is neither an affirmative nor a
/// negative answer.
pub fn parse_yes_no(text: &str) -> Option<bool> {
    let normalized = text.trim().to_lowercase();

    match normalized.as_str() {
        "yes" | "true" | "1" | "y" => Some(true),
        "no" | "false" | "0" | "n" | "none" | "none mentioned" | "not mentioned" | "" => {
            Some(false)
        }
        _ => None,
    }
}
