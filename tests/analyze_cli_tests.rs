mod common;

use common::TestEnv;

const CONVERSATION: &str = "Patient: I have had a cough for a week.\nDoctor: Any fever?\nPatient: No.\n";

#[test]
fn analyze_subcommand_is_available() {
    let output = TestEnv::new().run(&["analyze", "--help"]);

    assert!(
        output.status.success(),
        "analyze --help should succeed\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn analyze_fails_fast_without_gemini_key() {
    let env = TestEnv::new();
    let transcript = env.write_file("conversation.txt", CONVERSATION);

    let output = env.run(&["analyze", transcript.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("GOOGLE_API_KEY is required"),
        "expected missing credential error, got:\n{}",
        stderr
    );
}

#[test]
fn analyze_checks_credentials_before_reading_input() {
    let env = TestEnv::new();

    let output = env.run(&[
        "analyze",
        "/nonexistent/conversation.txt",
        "--model",
        "llama-3.3-70b",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("GROQ_API_KEY is required"),
        "expected missing credential error, got:\n{}",
        stderr
    );
}

#[test]
fn analyze_uses_default_model_from_config() {
    let env = TestEnv::new();
    env.write_config("[llm]\ndefault_model = \"llama-3.3-70b\"\n");
    let transcript = env.write_file("conversation.txt", CONVERSATION);

    let output = env.run(&["analyze", transcript.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("GROQ_API_KEY is required"), "stderr:\n{}", stderr);
}

#[test]
fn analyze_rejects_unknown_model() {
    let env = TestEnv::new();
    let transcript = env.write_file("conversation.txt", CONVERSATION);

    let output = env.run(&["analyze", transcript.to_str().unwrap(), "--model", "gpt-4o"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Unsupported model 'gpt-4o'"), "stderr:\n{}", stderr);
}

#[test]
fn analyze_rejects_unknown_strategy() {
    let env = TestEnv::new();
    let transcript = env.write_file("conversation.txt", CONVERSATION);

    let output = env.run(&[
        "analyze",
        transcript.to_str().unwrap(),
        "--strategy",
        "zero-shot",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Unsupported strategy 'zero-shot'"),
        "stderr:\n{}",
        stderr
    );
}

#[test]
fn analyze_rejects_empty_conversation_as_invalid_input() {
    let env = TestEnv::new();
    let transcript = env.write_file("conversation.txt", "  \n\t\n");

    let output = env
        .command(&["analyze", transcript.to_str().unwrap()])
        .env("GOOGLE_API_KEY", "test-key")
        .output()
        .expect("failed to execute medassist binary");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Invalid input: conversation is empty"),
        "stderr:\n{}",
        stderr
    );
}
