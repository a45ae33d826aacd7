use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::form::form_model::{FieldDescriptor, FieldPurpose, QualityAssessment};
use crate::form::keywords::contains_any;
use crate::form::purpose::purpose_of;

pub const BASELINE_SCORE: i32 = 50;
pub const DEFAULT_THRESHOLD: u8 = 60;

/// Standalone groups (no `<form>` element) smaller than this are discounted.
pub const STANDALONE_MIN_FIELDS: usize = 3;
/// Percentage of the score kept for small standalone groups.
pub const STANDALONE_FACTOR_PERCENT: u32 = 70;

const SEARCH_MARKERS: [&str; 2] = ["search", "query"];
const NEWSLETTER_MARKERS: [&str; 3] = ["subscribe", "newsletter", "mailing list"];
const CHAT_MARKERS: [&str; 6] = ["chat", "message", "messenger", "conversation", "reply", "compose"];

/// Scores a field group as a coherent, assistance-worthy form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormQualityScorer {
    pub threshold: u8,
}

impl Default for FormQualityScorer {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl FormQualityScorer {
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold: threshold.min(100),
        }
    }

    /// Score fields found inside a `<form>` element.
    pub fn score(
        &self,
        fields: &[FieldDescriptor],
        has_submit: bool,
        container_hints: &[String],
    ) -> QualityAssessment {
        let entries: Vec<&FieldDescriptor> = fields.iter().filter(|f| f.is_data_entry()).collect();
        if entries.is_empty() {
            return QualityAssessment::rejected("No fields provided");
        }

        let (score, reasons) = raw_score(&entries, has_submit, container_hints);
        self.finish(score, reasons)
    }

    /// Score an ad hoc group of inputs with no enclosing `<form>` element.
    /// Groups of fewer than three fields keep only 70% of their score.
    pub fn score_standalone(
        &self,
        fields: &[FieldDescriptor],
        has_submit: bool,
        container_hints: &[String],
    ) -> QualityAssessment {
        let entries: Vec<&FieldDescriptor> = fields.iter().filter(|f| f.is_data_entry()).collect();
        if entries.is_empty() {
            return QualityAssessment::rejected("No fields provided");
        }

        let (score, mut reasons) = raw_score(&entries, has_submit, container_hints);
        let mut score = score.clamp(0, 100) as u32;
        if entries.len() < STANDALONE_MIN_FIELDS {
            let discounted = score * STANDALONE_FACTOR_PERCENT / 100;
            reasons.push(format!(
                "Standalone field group without a form element: {} -> {}",
                score, discounted
            ));
            score = discounted;
        }
        self.finish(score as i32, reasons)
    }

    fn finish(&self, score: i32, reasons: Vec<String>) -> QualityAssessment {
        let score = score.clamp(0, 100) as u8;
        let is_legitimate = score >= self.threshold;
        debug!(score, is_legitimate, threshold = self.threshold, "form quality scored");

        QualityAssessment {
            score,
            is_legitimate,
            reasons,
        }
    }
}

/// Apply the fixed deltas to the baseline. Unclamped.
fn raw_score(
    entries: &[&FieldDescriptor],
    has_submit: bool,
    container_hints: &[String],
) -> (i32, Vec<String>) {
    let mut score = BASELINE_SCORE;
    let mut reasons = Vec::new();
    let count = entries.len();

    let mut apply = |delta: i32, reason: String| {
        score += delta;
        reasons.push(format!("{:+} {}", delta, reason));
    };

    // ---- Size ----
    match count {
        1 => apply(-30, "Single field (likely search or newsletter)".into()),
        2..=4 => apply(10, format!("{} fields", count)),
        _ => apply(20, format!("{} fields", count)),
    }

    // ---- Submit mechanism ----
    if has_submit {
        apply(15, "Has a submit mechanism".into());
    } else {
        apply(-15, "No submit mechanism".into());
    }

    // ---- Required fields ----
    if entries.iter().any(|f| f.is_required()) {
        apply(10, "Has required fields".into());
    }

    let purposes: Vec<FieldPurpose> = entries.iter().map(|f| purpose_of(f)).collect();
    let hints = container_hints.join(" ").to_lowercase();

    // ---- Search signature ----
    let search_like = entries.iter().any(|f| {
        f.input_type() == "search"
            || contains_any(&name_and_label(f), &SEARCH_MARKERS)
    });
    if search_like && count < 3 {
        apply(-25, "Looks like a search box".into());
    }

    // ---- Newsletter signature ----
    let has_email = entries
        .iter()
        .zip(&purposes)
        .any(|(f, p)| *p == FieldPurpose::Email || f.input_type() == "email");
    let mentions_subscribe = purposes.contains(&FieldPurpose::Newsletter)
        || entries.iter().any(|f| contains_any(&f.extended_blob(), &NEWSLETTER_MARKERS))
        || contains_any(&hints, &NEWSLETTER_MARKERS);
    if has_email && mentions_subscribe && count < 3 {
        apply(-20, "Looks like a newsletter signup".into());
    }

    // ---- Field categories ----
    if purposes.iter().any(FieldPurpose::is_name) {
        apply(10, "Has name fields".into());
    }
    if purposes.iter().any(FieldPurpose::is_address) {
        apply(15, "Has address fields".into());
    }
    if purposes.iter().any(FieldPurpose::is_contact) {
        apply(10, "Has contact fields".into());
    }

    // ---- Chat interface signature ----
    let has_textarea = entries.iter().any(|f| f.is_textarea());
    let mentions_chat = contains_any(&hints, &CHAT_MARKERS)
        || entries.iter().any(|f| contains_any(&f.extended_blob(), &CHAT_MARKERS));
    if has_textarea && count < 3 && mentions_chat {
        apply(-20, "Looks like a chat or messaging box".into());
    }

    // ---- Diversity ----
    let distinct_types: BTreeSet<String> = entries
        .iter()
        .map(|f| {
            let t = f.input_type();
            if t.is_empty() { "text".to_string() } else { t }
        })
        .collect();
    if distinct_types.len() >= 3 {
        apply(15, format!("{} distinct field types", distinct_types.len()));
    }

    (score, reasons)
}

fn name_and_label(field: &FieldDescriptor) -> String {
    [&field.name, &field.id, &field.label, &field.placeholder]
        .into_iter()
        .flatten()
        .map(|s| s.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
