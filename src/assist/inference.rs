use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::error::EngineError;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "qwen2.5:1.5b";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Free-text completion backend used by the response generator.
pub trait TextInference {
    fn infer_text(&self, prompt: &str) -> Result<String, EngineError>;
}

// ============================================================================
// Ollama Backend
// ============================================================================

pub struct OllamaInference {
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for OllamaInference {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaInference {
    pub fn new(endpoint: &str, model: &str, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            timeout,
        }
    }

    fn map_error(&self, err: reqwest::Error) -> EngineError {
        if err.is_timeout() {
            EngineError::InferenceTimeout(self.timeout)
        } else if err.is_decode() {
            EngineError::InferenceResponse(err.to_string())
        } else {
            EngineError::InferenceUnavailable(err.to_string())
        }
    }
}

impl TextInference for OllamaInference {
    fn infer_text(&self, prompt: &str) -> Result<String, EngineError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| EngineError::InferenceUnavailable(e.to_string()))?;

        let request = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "sending inference request");
        let response = client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.map_error(e))?;

        let body: OllamaResponse = response.json().map_err(|e| self.map_error(e))?;
        let text = body.response.trim();
        if text.is_empty() {
            return Err(EngineError::InferenceResponse("empty response".to_string()));
        }
        Ok(text.to_string())
    }
}

// ============================================================================
// Mock Backend (for testing without Ollama)
// ============================================================================

/// Canned backend. `response: None` simulates an unreachable service.
#[derive(Debug, Clone, Default)]
pub struct MockTextInference {
    pub response: Option<String>,
}

impl MockTextInference {
    pub fn answering(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
        }
    }

    pub fn unavailable() -> Self {
        Self { response: None }
    }
}

impl TextInference for MockTextInference {
    fn infer_text(&self, _prompt: &str) -> Result<String, EngineError> {
        self.response
            .clone()
            .ok_or_else(|| EngineError::InferenceUnavailable("mock backend offline".to_string()))
    }
}
