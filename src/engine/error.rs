//! Engine error taxonomy.

use std::time::Duration;

use thiserror::Error;

/// Degraded outcomes the engine recognizes. Heuristic variants are never
/// returned to callers; they are rendered into response diagnostics. Only
/// the inference variants travel through `Result`, and even those end at the
/// response generator's local fallback.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Field has no name, id or placeholder. Skipped.
    #[error("Malformed field descriptor at index {index}: no name, id or placeholder")]
    MalformedFieldDescriptor { index: usize },

    #[error("No fields provided")]
    NoFieldsProvided,

    /// No detection method cleared the match threshold.
    #[error("Classification ambiguous: no detection method matched a form type")]
    ClassificationAmbiguous,

    #[error("Inference timed out after {0:?}")]
    InferenceTimeout(Duration),

    #[error("Inference service unavailable: {0}")]
    InferenceUnavailable(String),

    #[error("Invalid inference response: {0}")]
    InferenceResponse(String),
}

impl EngineError {
    pub fn is_inference(&self) -> bool {
        matches!(
            self,
            EngineError::InferenceTimeout(_)
                | EngineError::InferenceUnavailable(_)
                | EngineError::InferenceResponse(_)
        )
    }
}
