//! Worked example embedded in the few-shot strategy

use crate::schema::{
    ClinicalAssessment, DiseasePrediction, FollowUpQuestions, MedicalReport,
    MedicationSuggestions, PriorEpisodes,
};

pub const EXAMPLE_CONVERSATION: &str = "\
Patient [male]: My legs have been inflamed. My tummy gets inflated at evening.
Doctor: Since when is it happening?
Patient [male]: It has been happening for past five days. Five or six days.
Doctor: It did not happen before? Is this the first time?
Patient companion [Female]: It happened before also. He drinks.
Doctor: This tummy inflammation, leg inflammation happened before also?
Patient companion [Female]: Yes.
Doctor: When did it happen first?
Patient companion [Female]: It happened two months ago, approximately.
Doctor: But, he has been drinking till now?
Patient companion [Female]: Yes.
Doctor: When did he take his last drink?
Patient companion [Female]: Just one week ago. Last Monday.
Doctor: Have you done any tests?
Patient companion [Female]: No. We consulted a doctor yesterday, he gave some medicines, but no tests.
Patient: I take tobacco [Khaini].
Doctor: Any other existing disease? High sugar, high BP, thyroid?
Patient: No, No.
Patient Companion [Female]: No, he went through appendicitis operation.
Doctor: When?
Patient Companion [Female]: Ten years ago.";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The assessment the example conversation should produce.
pub fn example_assessment() -> ClinicalAssessment {
    ClinicalAssessment {
        summary: Some(
            "A male patient presents with bilateral leg swelling and evening abdominal \
distension for the past 5–6 days. Symptoms recurred from a similar episode approximately \
two months ago. Patient has a history of chronic alcohol consumption (last drink one week \
ago), tobacco use (khaini), and appendectomy 10 years ago. No diagnostic tests have been \
performed to date."
                .to_string(),
        ),
        medical_report: Some(MedicalReport {
            chief_complaint: Some("Leg swelling and abdominal distension".to_string()),
            symptoms: Some(strings(&[
                "Bilateral leg inflammation",
                "Evening abdominal distension",
            ])),
            medical_history: Some("Appendectomy 10 years ago".to_string()),
            social_history: Some(
                "Chronic alcohol use (last consumed one week ago), tobacco (khaini) use"
                    .to_string(),
            ),
            duration_of_symptoms: Some(
                "5–6 days (current episode); first episode ~2 months ago".to_string(),
            ),
            prior_episodes: PriorEpisodes::Yes,
        }),
        disease_prediction: Some(DiseasePrediction {
            disease: Some(
                "Alcoholic liver disease with possible ascites and peripheral edema".to_string(),
            ),
            confidence_score: Some(0.85),
        }),
        medication_suggestions: Some(MedicationSuggestions {
            medications: Some(strings(&[
                "Alcohol cessation counseling",
                "Diuretics (e.g., spironolactone)",
                "Thiamine and B-complex supplementation",
            ])),
        }),
        follow_up_questions: Some(FollowUpQuestions {
            questions: strings(&[
                "Have you noticed yellowing of your skin or eyes (jaundice)?",
                "Do you experience shortness of breath or reduced urine output?",
                "How many standard drinks of alcohol do you consume per week?",
            ]),
        }),
    }
}
