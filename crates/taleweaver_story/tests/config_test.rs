//! Configuration loading.

use std::io::Write;
use taleweaver_core::SamplingParams;
use taleweaver_story::{RewriteGate, TaleweaverConfig};

#[test]
fn test_defaults_match_bundled_file() {
    let bundled = load_toml(include_str!("../../../taleweaver.toml"));
    assert_eq!(bundled, TaleweaverConfig::default());
}

fn load_toml(contents: &str) -> TaleweaverConfig {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    TaleweaverConfig::from_file(file.path()).unwrap()
}

#[test]
fn test_default_values() {
    let config = TaleweaverConfig::default();

    assert_eq!(config.backend().model(), "gpt-3.5-turbo");
    assert_eq!(config.backend().api_key_env(), "OPENAI_API_KEY");
    assert_eq!(*config.pipeline().max_retry_attempts(), 3);
    assert_eq!(*config.pipeline().rewrite_gate(), RewriteGate::Bypass);
    assert_eq!(*config.retry().max_attempts(), 3);
    assert_eq!(*config.sampling().story(), SamplingParams::new(500, 0.7));
    assert_eq!(*config.sampling().judge(), SamplingParams::new(400, 0.1));
    assert_eq!(*config.sampling().revision(), SamplingParams::new(500, 0.6));
    assert_eq!(*config.sampling().metadata(), SamplingParams::new(200, 0.1));
}

#[test]
fn test_file_overrides_and_defaults() {
    let config = load_toml(
        r#"
[backend]
model = "gpt-4o-mini"

[pipeline]
max_retry_attempts = 5
rewrite_gate = "judged"

[sampling.story]
max_tokens = 650
temperature = 0.9
"#,
    );

    assert_eq!(config.backend().model(), "gpt-4o-mini");
    assert_eq!(
        config.backend().base_url(),
        "https://api.openai.com/v1/chat/completions"
    );
    assert_eq!(*config.pipeline().max_retry_attempts(), 5);
    assert_eq!(*config.pipeline().rewrite_gate(), RewriteGate::Judged);
    assert_eq!(*config.sampling().story(), SamplingParams::new(650, 0.9));
    assert_eq!(*config.sampling().judge(), SamplingParams::new(400, 0.1));
    assert_eq!(*config.retry().initial_delay_ms(), 1000);
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = TaleweaverConfig::from_file(dir.path().join("nope.toml"));
    assert!(result.is_err());
}

#[test]
fn test_invalid_gate_is_error() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[pipeline]\nrewrite_gate = \"sometimes\"").unwrap();

    let err = TaleweaverConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Config error"));
}
