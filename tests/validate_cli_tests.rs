mod common;

use common::TestEnv;

#[test]
fn valid_reply_is_rendered() {
    let env = TestEnv::new();
    let reply = env.write_file(
        "reply.json",
        r#"```json
{
  "summary": "Week-long dry cough without fever.",
  "medical_report": { "symptoms": ["Dry cough"], "prior_episodes": "Not Mentioned" },
  "disease_prediction": { "disease": "Viral bronchitis", "confidence_score": 0.6 },
  "follow_up_questions": ["Any shortness of breath?"]
}
```"#,
    );

    let output = env.run(&["validate", reply.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "validate should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Reply is valid."));
    assert!(stdout.contains("Prior Episodes:  No"));
    assert!(stdout.contains("Confidence:      60.0%"));
    assert!(stdout.contains("1. Any shortness of breath?"));
    assert!(stdout.contains("No medication suggestions."));
}

#[test]
fn out_of_range_confidence_fails_with_field_name() {
    let env = TestEnv::new();
    let reply = env.write_file(
        "reply.json",
        r#"{"disease_prediction": {"disease": "flu", "confidence_score": 1.2}}"#,
    );

    let output = env.run(&["validate", reply.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("disease_prediction.confidence_score"),
        "stderr:\n{}",
        stderr
    );
    assert!(stderr.contains("out of range"), "stderr:\n{}", stderr);
}

#[test]
fn json_output_lists_every_failure() {
    let env = TestEnv::new();
    let reply = env.write_file(
        "reply.json",
        r#"{"summary": 3, "medical_report": {"symptoms": "cough"}, "disease_prediction": {"confidence_score": -0.1}}"#,
    );

    let output = env.run(&["validate", reply.to_str().unwrap(), "--json"]);

    assert!(!output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("validate --json should print JSON");
    assert_eq!(report["valid"], false);

    let paths: Vec<&str> = report["failures"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["path"].as_str().unwrap())
        .collect();
    assert_eq!(
        paths,
        vec![
            "summary",
            "medical_report.symptoms",
            "disease_prediction.confidence_score"
        ]
    );
}

#[test]
fn malformed_reply_is_a_validation_error() {
    let env = TestEnv::new();
    let reply = env.write_file("reply.json", "{\"summary\": ");

    let output = env.run(&["validate", reply.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("not valid JSON"), "stderr:\n{}", stderr);
}
