use std::path::Path;

use thiserror::Error;

use crate::engine::engine::FormEngine;
use crate::engine::request::{AskRequest, ClassifyRequest};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn read_input(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(Path::new(path)).map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })
}

// ============================================================================
// classify subcommand
// ============================================================================

/// Classify the request in `input` and return the response as pretty JSON.
pub fn cmd_classify(engine: &FormEngine, input: &str) -> Result<String, CliError> {
    let request: ClassifyRequest = serde_json::from_str(&read_input(input)?)?;
    tracing::info!(fields = request.fields.len(), input, "classifying");

    let response = engine.classify(&request);
    Ok(serde_json::to_string_pretty(&response)?)
}

// ============================================================================
// ask subcommand
// ============================================================================

pub fn cmd_ask(engine: &FormEngine, input: &str) -> Result<String, CliError> {
    let request: AskRequest = serde_json::from_str(&read_input(input)?)?;
    tracing::info!(question = %request.question, "answering");

    let response = engine.ask(&request);
    Ok(serde_json::to_string_pretty(&response)?)
}
