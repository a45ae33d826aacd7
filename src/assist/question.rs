use serde::{Deserialize, Serialize};

use crate::form::form_model::{FieldPurpose, FormType};
use crate::form::keywords::{contains_any, contains_keyword, matched_keywords, normalize_text};

/// Broad intent of a user question about a form or field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionKind {
    Requirement,
    Purpose,
    Format,
    Example,
    Privacy,
    FormType,
    General,
}

const REQUIREMENT_MARKERS: [&str; 6] = ["required", "need", "must", "optional", "mandatory", "have to"];
const FORM_TYPE_MARKERS: [&str; 5] = [
    "kind of form", "type of form", "what is this form", "what form is this", "form for",
];
const PURPOSE_MARKERS: [&str; 6] = ["what", "why", "purpose", "explain", "used for", "mean"];
/// Unambiguous format words; these beat "what" and "why".
const FORMAT_MARKERS: [&str; 5] = ["format", "characters", "length", "long should", "valid"];
/// Weak format words; only used when nothing else matched.
const HOW_MARKERS: [&str; 2] = ["how", "enter"];
const EXAMPLE_MARKERS: [&str; 3] = ["example", "sample", "such as"];
const PRIVACY_MARKERS: [&str; 6] = ["privacy", "private", "secure", "safe", "share", "protect"];

/// Route a question by keyword. Requirement wins over everything so that
/// "do I need ..." never reads as a purpose question.
pub fn classify_question(question: &str) -> QuestionKind {
    let q = normalize_text(question);

    if contains_any(&q, &REQUIREMENT_MARKERS) {
        QuestionKind::Requirement
    } else if contains_any(&q, &EXAMPLE_MARKERS) {
        QuestionKind::Example
    } else if contains_any(&q, &PRIVACY_MARKERS) {
        QuestionKind::Privacy
    } else if contains_any(&q, &FORMAT_MARKERS) {
        QuestionKind::Format
    } else if contains_any(&q, &FORM_TYPE_MARKERS) {
        QuestionKind::FormType
    } else if contains_any(&q, &PURPOSE_MARKERS) {
        QuestionKind::Purpose
    } else if contains_any(&q, &HOW_MARKERS) {
        QuestionKind::Format
    } else {
        QuestionKind::General
    }
}

// ============================================================================
// Question context
// ============================================================================

/// Secondary topics a question touches besides its kind. A format question
/// that also says "is it safe" gets the privacy note too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FocusArea {
    Privacy,
    Format,
    Purpose,
}

const FOCUS_TERMS: [(FocusArea, &[&str]); 3] = [
    (
        FocusArea::Privacy,
        &["privacy", "secure", "security", "share", "shared", "protect", "safe", "data"],
    ),
    (
        FocusArea::Format,
        &["format", "enter", "input", "valid", "correctly", "proper", "example"],
    ),
    (
        FocusArea::Purpose,
        &["why", "purpose", "reason", "what for", "needed", "necessary"],
    ),
];

/// Field references, most specific first.
const FIELD_TERMS: [(&str, FieldPurpose); 14] = [
    ("confirm password", FieldPurpose::ConfirmPassword),
    ("password", FieldPurpose::Password),
    ("email", FieldPurpose::Email),
    ("username", FieldPurpose::Username),
    ("first name", FieldPurpose::FirstName),
    ("last name", FieldPurpose::LastName),
    ("phone", FieldPurpose::Phone),
    ("address", FieldPurpose::Address),
    ("city", FieldPurpose::City),
    ("zip", FieldPurpose::Zip),
    ("country", FieldPurpose::Country),
    ("birth", FieldPurpose::DateOfBirth),
    ("card number", FieldPurpose::CreditCard),
    ("cvv", FieldPurpose::Cvv),
];

const ACTION_TERMS: [&str; 6] = ["submit", "save", "fill", "enter", "complete", "validate"];

const CONCERN_MARKERS: [&str; 8] = [
    "worried", "concern", "problem", "issue", "error", "wrong", "confused", "don't understand",
];
const URGENCY_MARKERS: [&str; 7] = ["urgent", "quickly", "asap", "immediate", "now", "hurry", "deadline"];
const FRUSTRATION_MARKERS: [&str; 6] = [
    "frustrated", "annoying", "stupid", "ridiculous", "waste", "irritating",
];

/// Things the question names explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionEntities {
    pub fields: Vec<FieldPurpose>,
    pub form_types: Vec<FormType>,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentiment {
    pub concerned: bool,
    pub urgent: bool,
    pub frustrated: bool,
}

/// Everything the response layer reads from the question text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionContext {
    pub kind: QuestionKind,
    pub focus_areas: Vec<FocusArea>,
    pub entities: QuestionEntities,
    pub sentiment: Sentiment,
}

impl QuestionContext {
    pub fn has_focus(&self, area: FocusArea) -> bool {
        self.focus_areas.contains(&area)
    }
}

pub fn analyze_question(question: &str) -> QuestionContext {
    let q = normalize_text(question);

    let focus_areas = FOCUS_TERMS
        .iter()
        .filter(|(_, terms)| contains_any(&q, terms))
        .map(|(area, _)| *area)
        .collect();

    QuestionContext {
        kind: classify_question(question),
        focus_areas,
        entities: extract_entities(&q),
        sentiment: Sentiment {
            concerned: contains_any(&q, &CONCERN_MARKERS),
            urgent: contains_any(&q, &URGENCY_MARKERS),
            frustrated: contains_any(&q, &FRUSTRATION_MARKERS),
        },
    }
}

fn extract_entities(q: &str) -> QuestionEntities {
    let mut fields: Vec<FieldPurpose> = Vec::new();
    for (term, purpose) in &FIELD_TERMS {
        if contains_keyword(q, term) && !fields.contains(purpose) {
            fields.push(purpose.clone());
        }
    }

    QuestionEntities {
        fields,
        form_types: FormType::KNOWN
            .into_iter()
            .filter(|t| contains_keyword(q, t.as_str()))
            .collect(),
        actions: matched_keywords(q, &ACTION_TERMS)
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}
