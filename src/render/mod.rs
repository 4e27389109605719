//! Terminal presentation of a clinical assessment

use std::fmt::Write;

use crate::schema::ClinicalAssessment;

pub const DISCLAIMER: &str =
    "Disclaimer: This tool is for educational purposes only. Not a substitute for professional medical advice.";

/// Render an assessment as plain text sections.
pub fn render_text(assessment: &ClinicalAssessment) -> String {
    let mut out = String::new();

    section(&mut out, "Summary");
    line(
        &mut out,
        assessment
            .summary
            .as_deref()
            .unwrap_or("No summary generated."),
    );

    section(&mut out, "Medical Report");
    match &assessment.medical_report {
        Some(report) => {
            field(&mut out, "Chief Complaint", or_na(&report.chief_complaint));
            let symptoms = match &report.symptoms {
                Some(symptoms) if !symptoms.is_empty() => symptoms.join(", "),
                _ => "None".to_string(),
            };
            field(&mut out, "Symptoms", &symptoms);
            field(&mut out, "Medical History", or_na(&report.medical_history));
            field(&mut out, "Social History", or_na(&report.social_history));
            field(&mut out, "Duration", or_na(&report.duration_of_symptoms));
            field(&mut out, "Prior Episodes", report.prior_episodes.label());
        }
        None => line(&mut out, "No medical report generated."),
    }

    section(&mut out, "Disease Prediction");
    match &assessment.disease_prediction {
        Some(prediction) => {
            field(
                &mut out,
                "Diagnosis",
                prediction.disease.as_deref().unwrap_or("Unknown"),
            );
            field(
                &mut out,
                "Confidence",
                &format_confidence(prediction.confidence_score),
            );
        }
        None => line(&mut out, "No diagnosis generated."),
    }

    section(&mut out, "Medication Suggestions");
    let medications = assessment
        .medication_suggestions
        .as_ref()
        .and_then(|m| m.medications.as_deref())
        .unwrap_or_default();
    if medications.is_empty() {
        line(&mut out, "No medication suggestions.");
    } else {
        numbered(&mut out, medications);
    }

    section(&mut out, "Follow-up Questions");
    let questions = assessment
        .follow_up_questions
        .as_ref()
        .map(|f| f.questions.as_slice())
        .unwrap_or_default();
    if questions.is_empty() {
        line(&mut out, "No follow-up questions generated.");
    } else {
        numbered(&mut out, questions);
    }

    out.push('\n');
    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

/// Render an assessment as pretty-printed JSON.
pub fn render_json(assessment: &ClinicalAssessment) -> serde_json::Result<String> {
    serde_json::to_string_pretty(assessment)
}

/// Confidence as a percentage with one decimal, or "N/A".
pub fn format_confidence(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{:.1}%", score * 100.0),
        None => "N/A".to_string(),
    }
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "-".repeat(title.len()));
}

fn line(out: &mut String, text: &str) {
    let _ = writeln!(out, "{}", text);
}

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{:<16} {}", format!("{}:", label), value);
}

fn numbered(out: &mut String, items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, item);
    }
}
