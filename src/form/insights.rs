use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::form::form_model::{FieldDescriptor, FormType};
use crate::form::keywords::contains_any;

// ============================================================================
// Insight model
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldCategory {
    PersonalInformation,
    ContactInformation,
    AccountCredentials,
    AddressInformation,
    PaymentInformation,
    Preferences,
    ProfessionalInformation,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrivacyLevel {
    Low,
    Standard,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComplexityLevel {
    Simple,
    Medium,
    Complex,
    VeryComplex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRelationship {
    pub field: String,
    pub relationship_type: String,
}

/// Explanatory metadata about a form, attached to classification responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInsights {
    pub field_count: usize,
    pub required_field_count: usize,
    pub key_fields: Vec<String>,
    pub field_categories: BTreeMap<FieldCategory, Vec<String>>,
    pub privacy_level: PrivacyLevel,
    pub complexity: ComplexityLevel,
    pub estimated_completion_time: String,
    pub relationships: BTreeMap<String, Vec<FieldRelationship>>,
}

// ============================================================================
// Tables
// ============================================================================

// First match wins; credentials precede personal so "username" is not
// filed under names.
const CATEGORY_RULES: [(FieldCategory, &[&str]); 7] = [
    (
        FieldCategory::AccountCredentials,
        &["password", "username", "login", "passwd", "pwd"],
    ),
    (
        FieldCategory::PersonalInformation,
        &["name", "first", "last", "gender", "dob", "birth", "ssn", "social"],
    ),
    (
        FieldCategory::ContactInformation,
        &["email", "phone", "tel", "mobile", "fax"],
    ),
    (
        FieldCategory::AddressInformation,
        &["address", "street", "city", "state", "zip", "postal", "country"],
    ),
    (
        FieldCategory::PaymentInformation,
        &["card", "credit", "payment", "cvv", "expir", "billing"],
    ),
    (
        FieldCategory::Preferences,
        &["preference", "option", "setting", "subscribe", "newsletter"],
    ),
    (
        FieldCategory::ProfessionalInformation,
        &["company", "job", "title", "position", "employer", "resume", "cv"],
    ),
];

const VERY_HIGH_PRIVACY: [&str; 8] = ["ssn", "social security", "passport", "credit", "card", "cvv", "tax", "ein"];
const HIGH_PRIVACY: [&str; 6] = ["password", "dob", "birth", "driver", "license", "income"];
const STANDARD_PRIVACY: [&str; 6] = ["name", "email", "phone", "address", "city", "zip"];

const COMPLEXITY_TYPES: [&str; 4] = ["file", "date", "select", "textarea"];
const SLOW_TYPES: [&str; 3] = ["file", "date", "textarea"];

const RELATED_PAIRS: [(&str, &str, &str); 9] = [
    ("first_name", "last_name", "Personal name components"),
    ("email", "confirm_email", "Email verification pair"),
    ("password", "confirm_password", "Password verification pair"),
    ("address", "city", "Address components"),
    ("city", "state", "Geographic location components"),
    ("state", "zip", "Geographic location components"),
    ("country", "zip", "Geographic location components"),
    ("credit_card", "cvv", "Payment security components"),
    ("credit_card", "expiration", "Payment components"),
];

const COMPLEMENTARY_PREFIXES: [(&str, &str); 4] = [
    ("billing_", "shipping_"),
    ("shipping_", "billing_"),
    ("current_", "new_"),
    ("new_", "current_"),
];

fn key_field_terms(form_type: FormType) -> &'static [&'static str] {
    match form_type {
        FormType::Login => &["email", "username", "password"],
        FormType::Registration => &["email", "username", "password", "name"],
        FormType::Contact => &["email", "name", "message", "subject"],
        FormType::Payment => &["credit_card", "card_number", "cvv", "expiration", "name"],
        FormType::Shipping => &["name", "address", "city", "state", "zip", "country"],
        FormType::Employment => &["name", "email", "resume", "cover_letter"],
        FormType::Survey | FormType::Search | FormType::Unknown => &[],
    }
}

// ============================================================================
// Analysis
// ============================================================================

/// Derive insights for a field group already classified as `form_type`.
pub fn analyze_insights(fields: &[FieldDescriptor], form_type: FormType) -> FormInsights {
    let entries: Vec<&FieldDescriptor> = fields.iter().filter(|f| f.is_data_entry()).collect();
    let names: Vec<String> = entries.iter().map(|f| field_name(f)).collect();

    FormInsights {
        field_count: entries.len(),
        required_field_count: entries.iter().filter(|f| f.is_required()).count(),
        key_fields: key_fields(&entries, &names, form_type),
        field_categories: categorize(&names),
        privacy_level: privacy_level(&names),
        complexity: complexity(&entries),
        estimated_completion_time: completion_time(&entries),
        relationships: relationships(&names),
    }
}

fn field_name(field: &FieldDescriptor) -> String {
    field.key().unwrap_or_default()
}

fn key_fields(entries: &[&FieldDescriptor], names: &[String], form_type: FormType) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();

    for term in key_field_terms(form_type) {
        for name in names {
            if name.to_lowercase().contains(term) && !keys.contains(name) {
                keys.push(name.clone());
            }
        }
    }

    for (field, name) in entries.iter().zip(names) {
        if field.is_required() && !keys.contains(name) {
            keys.push(name.clone());
        }
    }

    keys
}

pub fn categorize_field(name: &str) -> FieldCategory {
    let lower = name.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, terms)| contains_any(&lower, terms))
        .map(|(category, _)| *category)
        .unwrap_or(FieldCategory::Other)
}

fn categorize(names: &[String]) -> BTreeMap<FieldCategory, Vec<String>> {
    let mut categories: BTreeMap<FieldCategory, Vec<String>> = BTreeMap::new();
    for name in names {
        categories
            .entry(categorize_field(name))
            .or_default()
            .push(name.clone());
    }
    categories
}

fn privacy_level(names: &[String]) -> PrivacyLevel {
    names
        .iter()
        .map(|name| {
            let lower = name.to_lowercase();
            if contains_any(&lower, &VERY_HIGH_PRIVACY) {
                PrivacyLevel::VeryHigh
            } else if contains_any(&lower, &HIGH_PRIVACY) {
                PrivacyLevel::High
            } else if contains_any(&lower, &STANDARD_PRIVACY) {
                PrivacyLevel::Standard
            } else {
                PrivacyLevel::Low
            }
        })
        .max()
        .unwrap_or(PrivacyLevel::Low)
}

fn complexity(entries: &[&FieldDescriptor]) -> ComplexityLevel {
    let complex = entries
        .iter()
        .filter(|f| COMPLEXITY_TYPES.contains(&f.input_type().as_str()))
        .count();
    let required = entries.iter().filter(|f| f.is_required()).count();
    let score = entries.len() as f32 * 0.5 + complex as f32 * 1.5 + required as f32 * 0.8;

    if score < 5.0 {
        ComplexityLevel::Simple
    } else if score < 15.0 {
        ComplexityLevel::Medium
    } else if score < 30.0 {
        ComplexityLevel::Complex
    } else {
        ComplexityLevel::VeryComplex
    }
}

fn completion_time(entries: &[&FieldDescriptor]) -> String {
    let slow = entries
        .iter()
        .filter(|f| SLOW_TYPES.contains(&f.input_type().as_str()))
        .count();
    let minutes = entries.len() as f32 * 0.3 + slow as f32;

    let label = if minutes < 2.0 {
        "1-2 minutes"
    } else if minutes < 5.0 {
        "2-5 minutes"
    } else if minutes < 10.0 {
        "5-10 minutes"
    } else if minutes < 20.0 {
        "10-20 minutes"
    } else {
        "20+ minutes"
    };
    label.to_string()
}

fn relationships(names: &[String]) -> BTreeMap<String, Vec<FieldRelationship>> {
    let mut map = BTreeMap::new();

    for name in names.iter().filter(|n| !n.is_empty()) {
        let lower = name.to_lowercase();
        let mut related = Vec::new();

        for (first, second, kind) in RELATED_PAIRS {
            if !lower.contains(first) {
                continue;
            }
            for other in names.iter().filter(|o| *o != name) {
                if other.to_lowercase().contains(second) {
                    related.push(FieldRelationship {
                        field: other.clone(),
                        relationship_type: kind.to_string(),
                    });
                }
            }
        }

        for (prefix, complement) in COMPLEMENTARY_PREFIXES {
            if let Some(base) = lower.strip_prefix(prefix) {
                let wanted = format!("{}{}", complement, base);
                if let Some(other) = names.iter().find(|o| o.to_lowercase() == wanted) {
                    related.push(FieldRelationship {
                        field: other.clone(),
                        relationship_type: "Complementary information".to_string(),
                    });
                }
            }
        }

        if !related.is_empty() {
            map.insert(name.clone(), related);
        }
    }

    map
}
