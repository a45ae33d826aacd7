use std::collections::BTreeMap;
use std::time::Duration;

use sha1::{Digest, Sha1};
use tracing::{debug, info, warn};

use crate::assist::inference::{
    DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT, OllamaInference, TextInference,
};
use crate::assist::response::{AnswerContext, ResponseGenerator};
use crate::engine::error::EngineError;
use crate::engine::request::{
    AskRequest, AskResponse, ClassifyRequest, ClassifyResponse, FieldPurposeEntry,
};
use crate::form::classifier::classify;
use crate::form::form_model::{
    FieldDescriptor, FieldPurpose, FormAttributes, FormContext, FormType, PageMetadata,
    PasswordFieldContext, QualityAssessment,
};
use crate::form::insights::analyze_insights;
use crate::form::keywords::contains_any;
use crate::form::password;
use crate::form::purpose::annotate;
use crate::form::quality::{DEFAULT_THRESHOLD, FormQualityScorer};

/// Button text that marks a submit mechanism.
pub const SUBMIT_KEYWORDS: [&str; 12] = [
    "submit", "save", "sign", "login", "continue", "next", "register", "send", "apply", "pay",
    "subscribe", "search",
];

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteConfig {
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub quality_threshold: u8,
    /// Remote assist backend; `None` keeps every answer local.
    pub remote: Option<RemoteConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quality_threshold: DEFAULT_THRESHOLD,
            remote: None,
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// In-process entry point. Holds no per-scan state; every call is a pure
/// function of its inputs.
#[derive(Default)]
pub struct FormEngine {
    scorer: FormQualityScorer,
    responder: ResponseGenerator,
}

impl FormEngine {
    pub fn new(config: EngineConfig) -> Self {
        let responder = match &config.remote {
            Some(remote) => ResponseGenerator::with_remote(Box::new(OllamaInference::new(
                &remote.endpoint,
                &remote.model,
                remote.timeout,
            ))),
            None => ResponseGenerator::new(),
        };
        Self {
            scorer: FormQualityScorer::new(config.quality_threshold),
            responder,
        }
    }

    /// Engine with a caller-supplied remote backend.
    pub fn with_remote(quality_threshold: u8, remote: Box<dyn TextInference>) -> Self {
        Self {
            scorer: FormQualityScorer::new(quality_threshold),
            responder: ResponseGenerator::with_remote(remote),
        }
    }

    pub fn threshold(&self) -> u8 {
        self.scorer.threshold
    }

    pub fn classify(&self, request: &ClassifyRequest) -> ClassifyResponse {
        let mut diagnostics = Vec::new();

        // ---- Validate and annotate ----
        let mut fields = Vec::with_capacity(request.fields.len());
        for (index, field) in request.fields.iter().enumerate() {
            if field.is_data_entry() && field.is_malformed() {
                let err = EngineError::MalformedFieldDescriptor { index };
                warn!(%err, "skipping field");
                diagnostics.push(err.to_string());
                continue;
            }
            fields.push(annotate(field));
        }

        let form_signature = form_signature(&fields, &request.page.form_attributes);
        let has_submit = request
            .has_submit
            .unwrap_or_else(|| detect_submit(&request.fields));

        if !fields.iter().any(FieldDescriptor::is_data_entry) {
            let err = EngineError::NoFieldsProvided;
            debug!(%err, "nothing to classify");
            diagnostics.push(err.to_string());
            return ClassifyResponse {
                form_context: FormContext::unknown(),
                field_purposes: BTreeMap::new(),
                quality: QualityAssessment::rejected("No fields provided"),
                insights: analyze_insights(&[], FormType::Unknown),
                form_signature,
                diagnostics,
            };
        }

        // ---- Classify ----
        let form_context = classify(&fields, &request.page);
        if form_context.detection_method.is_none() {
            diagnostics.push(EngineError::ClassificationAmbiguous.to_string());
        }

        // ---- Score ----
        let hints = &request.page.container_hints;
        let quality = if request.in_form_element {
            self.scorer.score(&fields, has_submit, hints)
        } else {
            self.scorer.score_standalone(&fields, has_submit, hints)
        };

        let insights = analyze_insights(&fields, form_context.form_type);
        let field_purposes = field_purposes(&fields);

        info!(
            form_type = form_context.form_type.as_str(),
            confidence = form_context.confidence,
            score = quality.score,
            is_legitimate = quality.is_legitimate,
            "form classified"
        );

        ClassifyResponse {
            form_context,
            field_purposes,
            quality,
            insights,
            form_signature,
            diagnostics,
        }
    }

    pub fn score(
        &self,
        fields: &[FieldDescriptor],
        has_submit: bool,
        container_hints: &[String],
    ) -> QualityAssessment {
        self.scorer.score(fields, has_submit, container_hints)
    }

    pub fn analyze_password(
        &self,
        field: &FieldDescriptor,
        other_fields: &[FieldDescriptor],
        page: Option<&PageMetadata>,
        form_context: Option<&FormContext>,
    ) -> PasswordFieldContext {
        password::analyze_password(field, other_fields, page, form_context)
    }

    pub fn ask(&self, request: &AskRequest) -> AskResponse {
        let ctx = AnswerContext {
            field: request.field.as_ref(),
            form_context: &request.form_context,
            fields: &request.fields,
            page: request.page.as_ref(),
        };
        self.responder.answer(&request.question, &ctx).into()
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn field_purposes(fields: &[FieldDescriptor]) -> BTreeMap<String, FieldPurposeEntry> {
    fields
        .iter()
        .filter(|f| f.is_data_entry())
        .filter_map(|f| {
            let key = f.key()?;
            Some((
                key,
                FieldPurposeEntry {
                    purpose: f.purpose.clone().unwrap_or(FieldPurpose::Unknown),
                    confidence: f.purpose_confidence.unwrap_or(0.0),
                },
            ))
        })
        .collect()
}

/// True when a button-like field reads as a submit control. A bare
/// `type="submit"` or image input counts on its own.
pub fn detect_submit(fields: &[FieldDescriptor]) -> bool {
    fields.iter().filter(|f| f.is_button()).any(|f| {
        matches!(f.input_type().as_str(), "submit" | "image")
            || contains_any(&f.extended_blob(), &SUBMIT_KEYWORDS)
    })
}

/// Stable hash of a form's shape: data-entry keys sorted, then form attributes.
pub fn form_signature(fields: &[FieldDescriptor], attributes: &FormAttributes) -> String {
    let mut keys: Vec<String> = fields
        .iter()
        .filter(|f| f.is_data_entry())
        .filter_map(FieldDescriptor::key)
        .collect();
    keys.sort();

    let mut hasher = Sha1::new();
    hasher.update(keys.join("|").as_bytes());
    hasher.update(b"#");
    hasher.update(attributes.text().as_bytes());
    format!("{:x}", hasher.finalize())
}
