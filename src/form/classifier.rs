use tracing::debug;

use crate::form::form_model::{DetectionMethod, FieldDescriptor, FormContext, FormType, PageMetadata};
use crate::form::keywords::{contains_keyword, match_groups, normalize_text};
use crate::form::purpose::purpose_of;

// ============================================================================
// Detection constants
// ============================================================================

pub const ATTRIBUTES_CONFIDENCE: f32 = 0.9;
pub const URL_CONFIDENCE: f32 = 0.8;
pub const TITLE_CONFIDENCE: f32 = 0.7;
pub const FIELDS_CONFIDENCE: f32 = 0.6;
pub const SURROUNDING_CONFIDENCE: f32 = 0.5;

pub const METHOD_ORDER: [DetectionMethod; 5] = [
    DetectionMethod::Attributes,
    DetectionMethod::Url,
    DetectionMethod::Title,
    DetectionMethod::Fields,
    DetectionMethod::SurroundingText,
];

/// Cap on the keyword-fraction boost of the fields method.
pub const FIELDS_CONFIDENCE_CAP: f32 = 0.9;
pub const FIELDS_BOOST_FACTOR: f32 = 0.3;

/// A form type only qualifies when strictly more than this fraction of its
/// keyword groups matched.
pub const MATCH_THRESHOLD: f32 = 0.3;

/// Classification stops as soon as the best result is strictly above this.
pub const EARLY_STOP_CONFIDENCE: f32 = 0.8;

pub type Groups = &'static [&'static [&'static str]];

/// Keyword groups applied to free text: form attributes, URL, title and
/// surrounding headings. Each inner slice is a synonym set.
const TEXT_PROFILES: [(FormType, Groups); 8] = [
    (
        FormType::Login,
        &[
            &["login", "log in", "log-in", "signin", "sign in", "sign-in", "logon"],
            &["authenticate", "authentication", "auth"],
            &["session", "welcome back"],
        ],
    ),
    (
        FormType::Registration,
        &[
            &[
                "register", "registration", "signup", "sign up", "sign-up",
                "create account", "create-account", "create an account", "join",
            ],
            &["new account", "new user", "enroll", "onboard"],
        ],
    ),
    (
        FormType::Contact,
        &[
            &["contact", "get in touch", "reach us", "inquiry", "enquiry"],
            &["message", "feedback", "support"],
        ],
    ),
    (
        FormType::Payment,
        &[
            &["payment", "checkout", "billing", "pay-now", "pay now"],
            &["credit card", "card", "purchase", "order"],
        ],
    ),
    (
        FormType::Shipping,
        &[
            &["shipping", "delivery", "ship-to", "ship to"],
            &["address", "postal"],
        ],
    ),
    (
        FormType::Survey,
        &[
            &["survey", "questionnaire", "poll", "quiz"],
            &["rating", "opinion", "feedback form"],
        ],
    ),
    (
        FormType::Employment,
        &[
            &["job", "jobs", "career", "careers", "employment", "apply", "application"],
            &["resume", "cv", "hiring", "position", "vacancy"],
        ],
    ),
    (
        FormType::Search,
        &[
            &["search", "find", "lookup", "query"],
            &["results", "filter"],
        ],
    ),
];

/// Keyword groups applied to the aggregate of field names, labels and
/// inferred purpose tags.
const FIELD_PROFILES: [(FormType, Groups); 8] = [
    (
        FormType::Login,
        &[
            &["password", "passwd", "pwd"],
            &["email", "username", "user", "login"],
            &["remember", "forgot", "stay signed", "keep me"],
        ],
    ),
    (
        FormType::Registration,
        &[
            &["confirm", "verify", "retype", "repeat", "password2"],
            &["password", "passwd"],
            &["email", "username"],
            &["first_name", "last_name", "full_name", "firstname", "lastname", "birth", "dob"],
            &["terms", "agree", "newsletter"],
        ],
    ),
    (
        FormType::Contact,
        &[
            &["message", "comment", "inquiry", "enquiry"],
            &["subject", "topic"],
            &["email", "phone"],
            &["name"],
        ],
    ),
    (
        FormType::Payment,
        &[
            &["card", "credit", "cc_number", "ccnumber"],
            &["cvv", "cvc", "security code"],
            &["expir", "exp_date", "expdate"],
            &["billing", "amount", "price"],
        ],
    ),
    (
        FormType::Shipping,
        &[
            &["address", "street", "addr"],
            &["city", "town"],
            &["state", "province"],
            &["zip", "postal", "postcode", "zipcode"],
            &["country"],
            &["shipping", "delivery"],
        ],
    ),
    (
        FormType::Survey,
        &[
            &["rating", "rate", "satisfaction", "opinion"],
            &["radio", "checkbox"],
            &["feedback", "comment", "recommend"],
        ],
    ),
    (
        FormType::Employment,
        &[
            &["resume", "cv", "cover letter", "cover_letter"],
            &["experience", "employer", "position", "education", "salary"],
            &["linkedin", "portfolio", "start date", "availability"],
        ],
    ),
    (
        FormType::Search,
        &[&["search", "query", "keyword", "q"]],
    ),
];

/// Phrases that state a form's purpose, grouped by the form type they
/// belong to. Used by the surrounding-text method.
const PURPOSE_PHRASES: [(FormType, &[&str]); 8] = [
    (
        FormType::Login,
        &["sign in to your account", "log in to your account", "welcome back", "member login"],
    ),
    (
        FormType::Registration,
        &["create your account", "create an account", "join us", "sign up for", "register for"],
    ),
    (
        FormType::Contact,
        &["contact us", "get in touch", "send us a message", "we'd love to hear"],
    ),
    (
        FormType::Payment,
        &["payment details", "payment information", "billing information", "complete your purchase"],
    ),
    (
        FormType::Shipping,
        &["shipping address", "delivery address", "where should we ship", "shipping information"],
    ),
    (
        FormType::Survey,
        &["tell us what you think", "customer survey", "rate your experience", "share your feedback"],
    ),
    (
        FormType::Employment,
        &["apply for", "job application", "join our team", "submit your application"],
    ),
    (
        FormType::Search,
        &["search our", "find what you", "search the site"],
    ),
];

// ============================================================================
// Per-method result
// ============================================================================

/// Output of a single detection method before it is promoted to a
/// `FormContext`.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodMatch {
    pub form_type: FormType,
    pub confidence: f32,
    pub method: DetectionMethod,
    pub purpose: Option<String>,
    pub reasoning: Vec<String>,
}

/// A form type's keyword-group score against one text.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeScore {
    pub form_type: FormType,
    pub matched: usize,
    pub percentage: f32,
    pub hits: Vec<String>,
}

/// Best form type for `text` under `profiles`: highest matched-group count
/// among types whose match fraction exceeds `MATCH_THRESHOLD`. Equal counts
/// keep the earlier-declared type.
pub fn best_form_type(text: &str, profiles: &[(FormType, Groups)]) -> Option<TypeScore> {
    let mut best: Option<TypeScore> = None;

    for (form_type, groups) in profiles {
        let m = match_groups(text, groups);
        if m.percentage <= MATCH_THRESHOLD {
            continue;
        }
        if best.as_ref().is_none_or(|b| m.matched > b.matched) {
            best = Some(TypeScore {
                form_type: *form_type,
                matched: m.matched,
                percentage: m.percentage,
                hits: m.hits,
            });
        }
    }

    best
}

fn text_method(text: &str, base: f32, method: DetectionMethod, source: &str) -> Option<MethodMatch> {
    if text.trim().is_empty() {
        return None;
    }
    let TypeScore { form_type, hits, .. } = best_form_type(text, &TEXT_PROFILES)?;

    Some(MethodMatch {
        form_type,
        confidence: base,
        method,
        purpose: None,
        reasoning: vec![format!(
            "{} matched {} keywords: {}",
            source,
            form_type.as_str(),
            hits.join(", ")
        )],
    })
}

// ============================================================================
// Detection methods (most reliable first)
// ============================================================================

pub fn detect_by_attributes(page: &PageMetadata) -> Option<MethodMatch> {
    text_method(
        &page.form_attributes.text(),
        ATTRIBUTES_CONFIDENCE,
        DetectionMethod::Attributes,
        "Form attributes",
    )
}

pub fn detect_by_url(page: &PageMetadata) -> Option<MethodMatch> {
    let url = page.url.as_deref().unwrap_or("").to_lowercase();
    text_method(&url, URL_CONFIDENCE, DetectionMethod::Url, "URL")
}

pub fn detect_by_title(page: &PageMetadata) -> Option<MethodMatch> {
    let title = normalize_text(page.title.as_deref().unwrap_or(""));
    text_method(&title, TITLE_CONFIDENCE, DetectionMethod::Title, "Page title")
}

/// Aggregate text of all fields: blob plus inferred purpose tag.
fn fields_text(fields: &[FieldDescriptor]) -> String {
    fields
        .iter()
        .map(|f| format!("{} {}", f.text_blob(), purpose_of(f)))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn detect_by_fields(fields: &[FieldDescriptor]) -> Option<MethodMatch> {
    let text = fields_text(fields);
    if text.trim().is_empty() {
        return None;
    }
    let TypeScore {
        form_type,
        percentage,
        hits,
        ..
    } = best_form_type(&text, &FIELD_PROFILES)?;
    let boosted = (FIELDS_CONFIDENCE + percentage * FIELDS_BOOST_FACTOR).min(FIELDS_CONFIDENCE_CAP);
    // Two decimals, so that equal confidences from different methods compare equal.
    let confidence = (boosted * 100.0).round() / 100.0;

    Some(MethodMatch {
        form_type,
        confidence,
        method: DetectionMethod::Fields,
        purpose: None,
        reasoning: vec![format!(
            "Field names matched {:.0}% of {} indicators: {}",
            percentage * 100.0,
            form_type.as_str(),
            hits.join(", ")
        )],
    })
}

pub fn detect_by_surrounding_text(page: &PageMetadata) -> Option<MethodMatch> {
    let snippets: Vec<String> = page
        .surrounding_headings
        .iter()
        .chain(page.container_hints.iter())
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|s| !s.is_empty())
        .collect();
    let text = snippets.join(" ").to_lowercase();

    let mut found = text_method(
        &text,
        SURROUNDING_CONFIDENCE,
        DetectionMethod::SurroundingText,
        "Surrounding text",
    )?;

    if let Some(purpose) = extract_purpose_phrase(&snippets, found.form_type) {
        found.reasoning.push(format!("Purpose phrase found: \"{}\"", purpose));
        found.purpose = Some(purpose);
    }

    Some(found)
}

/// The first heading/container snippet carrying a known purpose phrase for
/// `form_type`, as written on the page.
pub fn extract_purpose_phrase(snippets: &[String], form_type: FormType) -> Option<String> {
    let phrases = PURPOSE_PHRASES
        .iter()
        .find(|(t, _)| *t == form_type)
        .map(|(_, p)| *p)?;

    snippets
        .iter()
        .find(|s| {
            let lower = s.to_lowercase();
            phrases.iter().any(|p| contains_keyword(&lower, p))
        })
        .cloned()
}

// ============================================================================
// Classifier
// ============================================================================

/// Determine a form's type and purpose from page metadata and fields.
///
/// Methods run in reliability order; the running best (by confidence) is
/// kept and the loop stops once it exceeds `EARLY_STOP_CONFIDENCE`. A pure
/// function of its inputs.
pub fn classify(fields: &[FieldDescriptor], page: &PageMetadata) -> FormContext {
    if fields.is_empty() {
        debug!("no fields provided, form context unknown");
        return FormContext::unknown();
    }

    let mut best: Option<MethodMatch> = None;

    for method in METHOD_ORDER {
        let found = match method {
            DetectionMethod::Attributes => detect_by_attributes(page),
            DetectionMethod::Url => detect_by_url(page),
            DetectionMethod::Title => detect_by_title(page),
            DetectionMethod::Fields => detect_by_fields(fields),
            DetectionMethod::SurroundingText => detect_by_surrounding_text(page),
        };
        let Some(found) = found else { continue };
        debug!(
            method = ?found.method,
            form_type = found.form_type.as_str(),
            confidence = found.confidence,
            "detection method matched"
        );

        let better = best
            .as_ref()
            .is_none_or(|b| found.confidence > b.confidence);
        if better {
            best = Some(found);
        }

        if best
            .as_ref()
            .is_some_and(|b| b.confidence > EARLY_STOP_CONFIDENCE)
        {
            break;
        }
    }

    match best {
        Some(found) => to_context(found),
        None => {
            debug!("no detection method matched, form context unknown");
            FormContext {
                reasoning: vec!["No detection method matched any form type".to_string()],
                ..FormContext::unknown()
            }
        }
    }
}

fn to_context(found: MethodMatch) -> FormContext {
    let purpose = found
        .purpose
        .unwrap_or_else(|| found.form_type.generic_purpose().to_string());

    FormContext {
        form_type: found.form_type,
        purpose,
        confidence: found.confidence.clamp(0.0, 1.0),
        detection_method: Some(found.method),
        reasoning: found.reasoning,
    }
}
