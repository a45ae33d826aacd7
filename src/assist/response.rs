use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assist::inference::TextInference;
use crate::assist::knowledge::{self, FieldKnowledge};
use crate::assist::question::{FocusArea, QuestionContext, QuestionKind, analyze_question};
use crate::form::form_model::{
    FieldDescriptor, FieldPurpose, FormContext, FormType, PageMetadata, PasswordFormType,
};
use crate::form::password::analyze_password;
use crate::form::purpose::purpose_of;

/// Which path produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerSource {
    /// Fixed engine rule (required-field policy, classified form context).
    Policy,
    /// Static field knowledge or password context tables.
    KnowledgeBase,
    Remote,
    /// Generic local template.
    Fallback,
}

impl AnswerSource {
    /// Authoritative answers are never sent to the remote backend.
    pub fn is_authoritative(&self) -> bool {
        matches!(self, AnswerSource::Policy | AnswerSource::KnowledgeBase)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

impl Answer {
    fn new(text: impl Into<String>, source: AnswerSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

/// Everything the generator may look at besides the question itself.
#[derive(Debug, Clone, Copy)]
pub struct AnswerContext<'a> {
    pub field: Option<&'a FieldDescriptor>,
    pub form_context: &'a FormContext,
    /// The whole form, so the password analyzer can see siblings.
    pub fields: &'a [FieldDescriptor],
    pub page: Option<&'a PageMetadata>,
}

impl<'a> AnswerContext<'a> {
    pub fn new(field: Option<&'a FieldDescriptor>, form_context: &'a FormContext) -> Self {
        Self {
            field,
            form_context,
            fields: &[],
            page: None,
        }
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Answers user questions about a form or one of its fields.
///
/// Local heuristics always produce an answer. When a remote backend is
/// configured and the local answer is only a generic template, the remote
/// backend is asked instead; any remote failure returns the local answer.
#[derive(Default)]
pub struct ResponseGenerator {
    remote: Option<Box<dyn TextInference>>,
}

impl ResponseGenerator {
    pub fn new() -> Self {
        Self { remote: None }
    }

    pub fn with_remote(remote: Box<dyn TextInference>) -> Self {
        Self {
            remote: Some(remote),
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn answer(&self, question: &str, ctx: &AnswerContext) -> Answer {
        let q = analyze_question(question);
        let local = answer_question(&q, question, ctx);
        debug!(kind = ?q.kind, focus = ?q.focus_areas, source = ?local.source, "local answer produced");

        if local.source.is_authoritative() {
            return local;
        }
        let Some(remote) = &self.remote else {
            return local;
        };

        let prompt = build_prompt(question, &q, ctx, &local.text);
        match remote.infer_text(&prompt) {
            Ok(text) => Answer::new(text, AnswerSource::Remote),
            Err(e) => {
                warn!(error = %e, "remote inference failed, using local answer");
                local
            }
        }
    }
}

// ============================================================================
// Local heuristics
// ============================================================================

/// Deterministic answer from engine rules and static tables only.
pub fn local_answer(question: &str, ctx: &AnswerContext) -> Answer {
    answer_question(&analyze_question(question), question, ctx)
}

fn answer_question(q: &QuestionContext, question: &str, ctx: &AnswerContext) -> Answer {
    match ctx.field {
        Some(field) if field.is_password() => password_answer(q, field, ctx),
        Some(field) => field_answer(q, question, field, ctx),
        None => form_answer(q, question, ctx),
    }
}

fn password_answer(q: &QuestionContext, field: &FieldDescriptor, ctx: &AnswerContext) -> Answer {
    let pw = analyze_password(field, ctx.fields, ctx.page, Some(ctx.form_context));
    let info = &pw.context_specific_info;
    let entry = knowledge::lookup(&purpose_of(field));

    let answer = match q.kind {
        // Always required, whatever the markup says.
        QuestionKind::Requirement => {
            let follow_up = match pw.form_type {
                PasswordFormType::Registration => "You need it to create your account.",
                PasswordFormType::Login => "You need it to sign in.",
                PasswordFormType::Generic => "The form cannot be submitted without it.",
            };
            Answer::new(
                format!("This password field is required. {}", follow_up),
                AnswerSource::Policy,
            )
        }
        QuestionKind::Format => {
            let mut text = info.requirements.clone();
            if let Some(strength) = &info.strength {
                text.push(' ');
                text.push_str(strength);
            }
            Answer::new(text, AnswerSource::KnowledgeBase)
        }
        QuestionKind::Example => Answer::new(
            "For security reasons there is no example password. Choose something only you know, and never reuse a password from another site.",
            AnswerSource::Policy,
        ),
        QuestionKind::Privacy => Answer::new(
            entry
                .and_then(|k| k.privacy)
                .unwrap_or("Never share your password with anyone."),
            AnswerSource::KnowledgeBase,
        ),
        QuestionKind::FormType => context_answer(ctx.form_context),
        QuestionKind::Purpose | QuestionKind::General => {
            Answer::new(pw.purpose.clone(), AnswerSource::KnowledgeBase)
        }
    };

    // The resolved purpose replaces the generic knowledge-base one.
    let facets = entry.map(|k| FieldKnowledge {
        purpose: "",
        ..*k
    });
    let mut answer = with_facets(answer, q, facets.as_ref());
    if q.kind != QuestionKind::Purpose && q.has_focus(FocusArea::Purpose) && !answer.text.contains(&pw.purpose) {
        answer.text.push(' ');
        answer.text.push_str(&pw.purpose);
    }
    answer
}

fn field_answer(
    q: &QuestionContext,
    question: &str,
    field: &FieldDescriptor,
    ctx: &AnswerContext,
) -> Answer {
    let label = field.display_label();
    let entry = knowledge::lookup(&purpose_of(field));

    let answer = match q.kind {
        QuestionKind::Requirement => {
            let text = if field.is_required() {
                format!("\"{}\" is required. The form cannot be submitted without it.", label)
            } else {
                format!("\"{}\" is optional. You can leave it blank.", label)
            };
            Answer::new(text, AnswerSource::Policy)
        }
        QuestionKind::Purpose => describe_field(field, &label, entry),
        QuestionKind::Format => format_answer(field, &label, entry),
        QuestionKind::Example => match entry.filter(|k| !k.examples.is_empty()) {
            Some(k) => Answer::new(
                format!("For example: {}.", k.examples.join(", ")),
                AnswerSource::KnowledgeBase,
            ),
            None => Answer::new(
                format!("There is no standard example for \"{}\". Enter the value that applies to you.", label),
                AnswerSource::Fallback,
            ),
        },
        QuestionKind::Privacy => match entry.and_then(|k| k.privacy) {
            Some(note) => Answer::new(note, AnswerSource::KnowledgeBase),
            None => Answer::new(
                "Only share this information if you trust the site. Check for https in the address bar and read the privacy policy.",
                AnswerSource::Fallback,
            ),
        },
        QuestionKind::FormType => context_answer(ctx.form_context),
        QuestionKind::General => match knowledge::common_answer(question) {
            Some(text) => Answer::new(text, AnswerSource::KnowledgeBase),
            None => describe_field(field, &label, entry),
        },
    };

    with_facets(answer, q, entry)
}

/// Append the knowledge facets the question also asks about: purpose for
/// "why", format and examples for format wording, the privacy note for
/// privacy wording. The facet matching the question's own kind is already
/// in the answer and is skipped.
fn with_facets(mut answer: Answer, q: &QuestionContext, entry: Option<&FieldKnowledge>) -> Answer {
    let Some(k) = entry else {
        return answer;
    };
    if q.kind == QuestionKind::FormType {
        return answer;
    }

    let mut facets: Vec<String> = Vec::new();
    if q.has_focus(FocusArea::Purpose) && q.kind != QuestionKind::Purpose {
        facets.push(k.purpose.to_string());
    }
    if q.has_focus(FocusArea::Format) {
        if q.kind != QuestionKind::Format {
            facets.push(k.format.to_string());
        }
        if q.kind != QuestionKind::Example && !k.examples.is_empty() {
            facets.push(format!("For example: {}.", k.examples.join(", ")));
        }
    }
    if q.has_focus(FocusArea::Privacy) && q.kind != QuestionKind::Privacy {
        if let Some(note) = k.privacy {
            facets.push(note.to_string());
        }
    }

    for facet in facets {
        if facet.is_empty() || answer.text.contains(&facet) {
            continue;
        }
        answer.text.push(' ');
        answer.text.push_str(&facet);
    }
    answer
}

/// Type + label + required/optional, then the knowledge purpose if any.
fn describe_field(field: &FieldDescriptor, label: &str, entry: Option<&FieldKnowledge>) -> Answer {
    let kind = match field.input_type().as_str() {
        "" => "text".to_string(),
        t => t.to_string(),
    };
    let status = if field.is_required() { "required" } else { "optional" };
    let base = format!("This is a {} field labeled \"{}\". It is {}.", kind, label, status);

    match entry {
        Some(k) => Answer::new(format!("{} {}", base, k.purpose), AnswerSource::KnowledgeBase),
        None => Answer::new(base, AnswerSource::Fallback),
    }
}

fn format_answer(field: &FieldDescriptor, label: &str, entry: Option<&FieldKnowledge>) -> Answer {
    let rules = &field.validation_rules;
    let mut constraints = Vec::new();
    match (rules.min_length, rules.max_length) {
        (Some(min), Some(max)) => constraints.push(format!("between {} and {} characters", min, max)),
        (Some(min), None) => constraints.push(format!("at least {} characters", min)),
        (None, Some(max)) => constraints.push(format!("at most {} characters", max)),
        (None, None) => {}
    }
    if let (Some(min), Some(max)) = (&rules.min, &rules.max) {
        constraints.push(format!("a value from {} to {}", min, max));
    }
    let constraint_text = if constraints.is_empty() {
        String::new()
    } else {
        format!(" The form expects {}.", constraints.join(" and "))
    };

    match entry {
        Some(k) => {
            let mut text = format!("{}{}", k.format, constraint_text);
            if let Some(tip) = k.tips {
                text.push(' ');
                text.push_str(tip);
            }
            Answer::new(text, AnswerSource::KnowledgeBase)
        }
        None => Answer::new(
            format!("Enter {} as plain text.{}", label, constraint_text),
            AnswerSource::Fallback,
        ),
    }
}

fn form_answer(q: &QuestionContext, question: &str, ctx: &AnswerContext) -> Answer {
    if let Some(text) = knowledge::common_answer(question) {
        return Answer::new(text, AnswerSource::KnowledgeBase);
    }

    // "Is the email required?" about the whole form: answer for that field.
    if let Some(field) = referenced_field(q, ctx.fields) {
        let field_ctx = AnswerContext {
            field: Some(field),
            ..*ctx
        };
        return answer_question(q, question, &field_ctx);
    }

    if q.kind == QuestionKind::Requirement && !ctx.fields.is_empty() {
        let required: Vec<String> = ctx
            .fields
            .iter()
            .filter(|f| f.is_data_entry() && f.is_required())
            .map(FieldDescriptor::display_label)
            .collect();
        let text = if required.is_empty() {
            "None of the fields on this form are marked as required.".to_string()
        } else {
            format!("The required fields are: {}. The rest are optional.", required.join(", "))
        };
        return Answer::new(text, AnswerSource::Policy);
    }

    context_answer(ctx.form_context)
}

/// First form field whose purpose the question names.
fn referenced_field<'a>(q: &QuestionContext, fields: &'a [FieldDescriptor]) -> Option<&'a FieldDescriptor> {
    q.entities.fields.iter().find_map(|wanted| {
        fields
            .iter()
            .filter(|f| f.is_data_entry())
            .find(|f| purpose_of(f) == *wanted)
    })
}

/// Form-level description. A zero-confidence context reads as a generic
/// information-collecting form.
fn context_answer(form_context: &FormContext) -> Answer {
    if form_context.is_unknown() {
        return Answer::new(
            format!("This appears to be a form. {}", FormType::Unknown.generic_purpose()),
            AnswerSource::Fallback,
        );
    }
    Answer::new(
        format!(
            "This appears to be a {}. {}",
            form_context.form_type.display_name(),
            form_context.purpose
        ),
        AnswerSource::Policy,
    )
}

// ============================================================================
// Remote prompts
// ============================================================================

/// Prompt shape sent to the remote backend, picked from the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    PrivacyFocused,
    Validation,
    SensitiveField,
    FieldExplanation,
    FormOverview,
}

impl PromptTemplate {
    fn instructions(&self) -> &'static str {
        match self {
            PromptTemplate::PrivacyFocused => "Explain how this information is typically used and protected, and what the user should check before sharing it.",
            PromptTemplate::Validation => "Explain exactly what a valid value looks like and the most common reasons an entry is rejected.",
            PromptTemplate::SensitiveField => "This field holds sensitive data. Explain why it is asked for and how to enter it safely. Never invent or request actual values.",
            PromptTemplate::FieldExplanation => "Explain what this field is for and what the user should enter.",
            PromptTemplate::FormOverview => "Explain what this form is for and what the user will need to complete it.",
        }
    }
}

pub fn select_template(q: &QuestionContext, ctx: &AnswerContext) -> PromptTemplate {
    let Some(field) = ctx.field else {
        return PromptTemplate::FormOverview;
    };

    if q.kind == QuestionKind::Privacy || q.has_focus(FocusArea::Privacy) {
        PromptTemplate::PrivacyFocused
    } else if q.kind == QuestionKind::Format || q.has_focus(FocusArea::Format) {
        PromptTemplate::Validation
    } else if field.is_password()
        || matches!(
            purpose_of(field),
            FieldPurpose::CreditCard | FieldPurpose::Cvv | FieldPurpose::Expiration | FieldPurpose::BusinessEin
        )
    {
        PromptTemplate::SensitiveField
    } else {
        PromptTemplate::FieldExplanation
    }
}

pub fn build_prompt(question: &str, q: &QuestionContext, ctx: &AnswerContext, local: &str) -> String {
    let template = select_template(q, ctx);
    let field = ctx
        .field
        .map(|f| {
            format!(
                "{} (type: {}, {})",
                f.display_label(),
                match f.input_type().as_str() {
                    "" => "text".to_string(),
                    t => t.to_string(),
                },
                if f.is_required() { "required" } else { "optional" }
            )
        })
        .unwrap_or_else(|| "(none)".to_string());

    let mut tone = Vec::new();
    if q.sentiment.frustrated || q.sentiment.concerned {
        tone.push("The user sounds worried or frustrated; be calm and reassuring.");
    }
    if q.sentiment.urgent {
        tone.push("The user is in a hurry; lead with the direct answer.");
    }
    let tone = if tone.is_empty() {
        String::new()
    } else {
        format!("\n{}", tone.join(" "))
    };

    format!(
        r#"You help people fill out web forms. {instructions} Answer in two or three plain sentences.{tone}

FORM:
- Type: {form_type}
- Purpose: {purpose}
- Selected field: {field}

DRAFT ANSWER: {local}

QUESTION: {question}"#,
        instructions = template.instructions(),
        tone = tone,
        form_type = ctx.form_context.form_type.display_name(),
        purpose = ctx.form_context.purpose,
        field = field,
        local = local,
        question = question,
    )
}
