use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assist::response::{Answer, AnswerSource};
use crate::form::form_model::{
    FieldDescriptor, FieldPurpose, FormContext, PageMetadata, QualityAssessment,
};
use crate::form::insights::FormInsights;

// ============================================================================
// Classification
// ============================================================================

/// Extractor -> engine envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub page: PageMetadata,
    /// Derived from button-like fields when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_submit: Option<bool>,
    /// False for loose inputs with no enclosing `<form>` element.
    #[serde(default = "default_true")]
    pub in_form_element: bool,
}

impl ClassifyRequest {
    pub fn new(fields: Vec<FieldDescriptor>, page: PageMetadata) -> Self {
        Self {
            fields,
            page,
            has_submit: None,
            in_form_element: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPurposeEntry {
    pub purpose: FieldPurpose,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    pub form_context: FormContext,
    /// Keyed by field name, then id, then placeholder.
    pub field_purposes: BTreeMap<String, FieldPurposeEntry>,
    pub quality: QualityAssessment,
    pub insights: FormInsights,
    /// SHA-1 over sorted field keys and form attributes; equal for
    /// redundant scans of the same form.
    pub form_signature: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
}

// ============================================================================
// Q&A
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    pub question: String,
    #[serde(default)]
    pub field: Option<FieldDescriptor>,
    #[serde(default)]
    pub form_context: FormContext,
    /// Sibling fields, used to resolve password context.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub page: Option<PageMetadata>,
}

impl AskRequest {
    pub fn new(question: &str, field: Option<FieldDescriptor>, form_context: FormContext) -> Self {
        Self {
            question: question.to_string(),
            field,
            form_context,
            fields: Vec::new(),
            page: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub text: String,
    pub source: AnswerSource,
}

impl From<Answer> for AskResponse {
    fn from(answer: Answer) -> Self {
        Self {
            text: answer.text,
            source: answer.source,
        }
    }
}
