use std::time::Duration;

use clap::Parser;
use form_sense::cli::commands::{CliError, cmd_ask, cmd_classify};
use form_sense::cli::config::{
    AppConfig, Cli, Commands, build_engine_config, load_config, parse_config, try_load_config,
};
use form_sense::engine::engine::FormEngine;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_classify_minimal() {
    let cli = Cli::parse_from(["form-sense", "classify", "--input", "form.json"]);
    match cli.command {
        Commands::Classify { input, threshold } => {
            assert_eq!(input, "form.json");
            assert!(threshold.is_none());
        }
        _ => panic!("Expected Classify command"),
    }
    assert!(!cli.remote);
    assert!(cli.config.is_none());
}

#[test]
fn cli_parse_classify_with_threshold() {
    let cli = Cli::parse_from([
        "form-sense",
        "classify",
        "--input",
        "form.json",
        "--threshold",
        "75",
    ]);
    match cli.command {
        Commands::Classify { threshold, .. } => assert_eq!(threshold, Some(75)),
        _ => panic!("Expected Classify command"),
    }
}

#[test]
fn cli_parse_ask() {
    let cli = Cli::parse_from(["form-sense", "ask", "--input", "question.json", "--remote"]);
    match cli.command {
        Commands::Ask { input } => assert_eq!(input, "question.json"),
        _ => panic!("Expected Ask command"),
    }
    assert!(cli.remote);
}

#[test]
fn cli_parse_global_verbose() {
    let cli = Cli::parse_from(["form-sense", "-v", "ask", "--input", "q.json"]);
    assert_eq!(cli.verbose, 1);

    let cli2 = Cli::parse_from(["form-sense", "-vvv", "ask", "--input", "q.json"]);
    assert_eq!(cli2.verbose, 3);
}

#[test]
fn cli_parse_global_ollama() {
    let cli = Cli::parse_from([
        "form-sense",
        "--ollama-endpoint",
        "http://custom:11434/api/generate",
        "--ollama-model",
        "llama3",
        "ask",
        "--input",
        "q.json",
    ]);
    assert_eq!(
        cli.ollama_endpoint,
        Some("http://custom:11434/api/generate".to_string())
    );
    assert_eq!(cli.ollama_model, Some("llama3".to_string()));
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn config_load_missing_file() {
    let config = load_config(Some("nonexistent_file_that_does_not_exist.yaml"));
    assert_eq!(config, AppConfig::default());
}

#[test]
fn config_try_load_missing_file_is_io_error() {
    let err = try_load_config("nonexistent_file_that_does_not_exist.yaml").unwrap_err();
    assert!(matches!(err, CliError::Io { .. }));
}

#[test]
fn config_default_values() {
    let config = AppConfig::default();
    assert_eq!(config.quality.threshold, 60);
    assert!(!config.inference.enabled);
    assert_eq!(config.inference.endpoint, "http://localhost:11434/api/generate");
    assert_eq!(config.inference.timeout_secs, 5);
}

#[test]
fn config_empty_document_is_default() {
    assert_eq!(parse_config("").unwrap(), AppConfig::default());
    assert_eq!(parse_config("   \n").unwrap(), AppConfig::default());
}

#[test]
fn config_partial_yaml() {
    let yaml = r#"
quality:
  threshold: 70
inference:
  model: "llama3"
"#;
    let config = parse_config(yaml).unwrap();
    assert_eq!(config.quality.threshold, 70);
    assert_eq!(config.inference.model, "llama3");
    // Other inference fields get defaults
    assert!(!config.inference.enabled);
    assert_eq!(config.inference.timeout_secs, 5);
}

#[test]
fn config_invalid_yaml_is_an_error() {
    let err = parse_config("quality: [unclosed").unwrap_err();
    assert!(matches!(err, CliError::Yaml(_)));
}

// ============================================================================
// Builder Tests
// ============================================================================

#[test]
fn build_engine_config_defaults() {
    let engine = build_engine_config(&AppConfig::default(), None, false, None, None);
    assert_eq!(engine.quality_threshold, 60);
    assert!(engine.remote.is_none());
}

#[test]
fn build_engine_config_cli_wins() {
    let config = parse_config(
        r#"
quality:
  threshold: 70
inference:
  enabled: true
  model: "from-file"
  timeout_secs: 2
"#,
    )
    .unwrap();

    let engine = build_engine_config(&config, Some(80), false, None, Some("from-cli"));
    assert_eq!(engine.quality_threshold, 80);

    let remote = engine.remote.unwrap();
    assert_eq!(remote.model, "from-cli");
    assert_eq!(remote.endpoint, "http://localhost:11434/api/generate");
    assert_eq!(remote.timeout, Duration::from_secs(2));
}

#[test]
fn build_engine_config_flag_enables_remote() {
    let engine = build_engine_config(&AppConfig::default(), None, true, Some("http://x/api"), None);
    let remote = engine.remote.unwrap();
    assert_eq!(remote.endpoint, "http://x/api");
    assert_eq!(remote.model, "qwen2.5:1.5b");
}

#[test]
fn build_engine_config_caps_threshold() {
    let engine = build_engine_config(&AppConfig::default(), Some(200), false, None, None);
    assert_eq!(engine.quality_threshold, 100);
}

// ============================================================================
// Command Tests
// ============================================================================

fn write_temp(name: &str, content: &str) -> String {
    let dir = std::env::temp_dir().join("form_sense_cli_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn cmd_classify_reads_request_file() {
    let path = write_temp(
        "classify.json",
        r#"{"fields": [
            {"name": "email", "type": "email"},
            {"name": "password", "type": "password"},
            {"type": "submit", "label": "Sign in"}
        ]}"#,
    );

    let output = cmd_classify(&FormEngine::default(), &path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["formContext"]["formType"], "login");
    assert_eq!(value["quality"]["isLegitimate"], true);
}

#[test]
fn cmd_ask_reads_request_file() {
    let path = write_temp(
        "ask.json",
        r#"{"question": "Is this required?", "field": {"name": "password", "type": "password"}}"#,
    );

    let output = cmd_ask(&FormEngine::default(), &path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(value["text"].as_str().unwrap().starts_with("This password field is required."));
}

#[test]
fn cmd_classify_missing_file() {
    let err = cmd_classify(&FormEngine::default(), "no_such_request.json").unwrap_err();
    assert!(matches!(err, CliError::Io { .. }));
}

#[test]
fn cmd_classify_bad_json() {
    let path = write_temp("bad.json", "{ not json");
    let err = cmd_classify(&FormEngine::default(), &path).unwrap_err();
    assert!(matches!(err, CliError::Json(_)));
}
