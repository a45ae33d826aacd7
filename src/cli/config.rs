use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::assist::inference::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::cli::commands::CliError;
use crate::engine::engine::{EngineConfig, RemoteConfig};
use crate::form::quality::DEFAULT_THRESHOLD;

pub const DEFAULT_CONFIG_PATH: &str = "form-sense.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-sense",
    version,
    about = "Form and field classification engine"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Ollama API endpoint
    #[arg(long, global = true)]
    pub ollama_endpoint: Option<String>,

    /// Ollama model name
    #[arg(long, global = true)]
    pub ollama_model: Option<String>,

    /// Ask the remote model when no local answer is authoritative
    #[arg(long, global = true)]
    pub remote: bool,

    /// Path to config file (default: form-sense.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a field group and score it as a form
    Classify {
        /// Path to a ClassifyRequest JSON file
        #[arg(long)]
        input: String,

        /// Legitimacy threshold (0-100)
        #[arg(long)]
        threshold: Option<u8>,
    },

    /// Answer a question about a form or field
    Ask {
        /// Path to an AskRequest JSON file
        #[arg(long)]
        input: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-sense.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub quality: QualityConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    #[serde(default = "default_threshold")]
    pub threshold: u8,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 5,
        }
    }
}

// Serde default helpers
fn default_threshold() -> u8 { DEFAULT_THRESHOLD }
fn default_endpoint() -> String { DEFAULT_ENDPOINT.to_string() }
fn default_model() -> String { DEFAULT_MODEL.to_string() }
fn default_timeout_secs() -> u64 { 5 }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match try_load_config(config_path) {
        Ok(config) => config,
        Err(CliError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = config_path, "no config file, using defaults");
            AppConfig::default()
        }
        Err(e) => {
            tracing::warn!(path = config_path, error = %e, "unusable config file, using defaults");
            AppConfig::default()
        }
    }
}

pub fn try_load_config(path: &str) -> Result<AppConfig, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_config(&content)
}

/// An empty document yields defaults.
pub fn parse_config(content: &str) -> Result<AppConfig, CliError> {
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Resolve engine settings: CLI > config file > defaults.
pub fn build_engine_config(
    config: &AppConfig,
    threshold: Option<u8>,
    remote: bool,
    ollama_endpoint: Option<&str>,
    ollama_model: Option<&str>,
) -> EngineConfig {
    let inference = &config.inference;
    let remote = (remote || inference.enabled).then(|| RemoteConfig {
        endpoint: ollama_endpoint.unwrap_or(&inference.endpoint).to_string(),
        model: ollama_model.unwrap_or(&inference.model).to_string(),
        timeout: Duration::from_secs(inference.timeout_secs),
    });

    EngineConfig {
        quality_threshold: threshold.unwrap_or(config.quality.threshold).min(100),
        remote,
    }
}
