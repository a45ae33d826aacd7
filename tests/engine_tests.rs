use form_sense::assist::inference::MockTextInference;
use form_sense::assist::response::AnswerSource;
use form_sense::engine::engine::{EngineConfig, FormEngine, detect_submit, form_signature};
use form_sense::engine::request::{AskRequest, ClassifyRequest};
use form_sense::form::form_model::{
    DetectionMethod, FieldDescriptor, FieldPurpose, FormAttributes, FormContext, FormType, PageMetadata,
    PasswordFormType,
};

use crate::common::fixtures::{
    confirm_password, contact_fields, email, field, named, page_with_url, password,
    registration_fields, submit_button, typed,
};

mod common;

// ============================================================================
// classify
// ============================================================================

#[test]
fn classify_registration_page() {
    let engine = FormEngine::default();
    let mut fields = registration_fields();
    fields.push(submit_button("Create account"));
    let request = ClassifyRequest::new(fields, page_with_url("https://example.com/signup"));

    let response = engine.classify(&request);

    assert_eq!(response.form_context.form_type, FormType::Registration);
    assert_eq!(response.form_context.detection_method, Some(DetectionMethod::Url));
    assert!(response.quality.is_legitimate);
    assert_eq!(response.insights.field_count, 5);
    assert_eq!(
        response.field_purposes["confirm_password"].purpose,
        FieldPurpose::ConfirmPassword
    );
    assert!(response.diagnostics.is_empty());
}

#[test]
fn malformed_fields_are_skipped_with_a_diagnostic() {
    let engine = FormEngine::default();
    let request = ClassifyRequest::new(
        vec![typed("text"), email(), password()],
        PageMetadata::default(),
    );

    let response = engine.classify(&request);

    assert_eq!(response.field_purposes.len(), 2);
    assert!(response.field_purposes.contains_key("email"));
    assert_eq!(response.diagnostics.len(), 1);
    assert!(response.diagnostics[0].contains("index 0"));
}

#[test]
fn no_fields_yields_unknown_and_zero_score() {
    let engine = FormEngine::default();
    let response = engine.classify(&ClassifyRequest::new(vec![], PageMetadata::default()));

    assert_eq!(response.form_context, FormContext::unknown());
    assert_eq!(response.quality.score, 0);
    assert!(!response.quality.is_legitimate);
    assert_eq!(response.insights.field_count, 0);
    assert!(response.diagnostics.iter().any(|d| d == "No fields provided"));
}

#[test]
fn ambiguous_classification_is_reported() {
    let engine = FormEngine::default();
    let request = ClassifyRequest::new(vec![named("favorite_color")], PageMetadata::default());

    let response = engine.classify(&request);
    assert_eq!(response.form_context.form_type, FormType::Unknown);
    assert!(response.diagnostics[0].contains("ambiguous"));
}

#[test]
fn submit_is_derived_from_buttons_when_absent() {
    let engine = FormEngine::default();
    let mut fields = contact_fields();

    let without = engine.classify(&ClassifyRequest::new(fields.clone(), PageMetadata::default()));
    fields.push(submit_button("Send"));
    let with = engine.classify(&ClassifyRequest::new(fields, PageMetadata::default()));

    assert!(with.quality.score >= 60);
    assert!(with.quality.is_legitimate);
    assert!(without.quality.reasons.iter().any(|r| r.contains("No submit")));
}

#[test]
fn explicit_has_submit_wins() {
    let engine = FormEngine::default();
    let mut fields = contact_fields();
    fields.push(submit_button("Send"));
    let request = ClassifyRequest {
        has_submit: Some(false),
        ..ClassifyRequest::new(fields, PageMetadata::default())
    };

    let response = engine.classify(&request);
    assert!(response.quality.reasons.iter().any(|r| r.contains("No submit")));
}

#[test]
fn standalone_groups_are_discounted() {
    let engine = FormEngine::default();
    let request = ClassifyRequest {
        has_submit: Some(false),
        in_form_element: false,
        ..ClassifyRequest::new(vec![email(), password()], PageMetadata::default())
    };

    let response = engine.classify(&request);
    assert_eq!(response.quality.score, (65u32 * 70 / 100) as u8);
    assert!(!response.quality.is_legitimate);
}

#[test]
fn classify_is_idempotent() {
    let engine = FormEngine::default();
    let request = ClassifyRequest::new(registration_fields(), page_with_url("https://example.com/join"));

    let first = engine.classify(&request);
    let second = engine.classify(&request);
    assert_eq!(first, second);
}

#[test]
fn threshold_comes_from_config() {
    let strict = FormEngine::new(EngineConfig {
        quality_threshold: 100,
        remote: None,
    });
    assert_eq!(strict.threshold(), 100);

    let request = ClassifyRequest {
        has_submit: Some(true),
        ..ClassifyRequest::new(vec![email(), password()], PageMetadata::default())
    };
    // 50 + 10 + 15 + 10 + 10 = 95
    assert!(!strict.classify(&request).quality.is_legitimate);
    assert!(FormEngine::default().classify(&request).quality.is_legitimate);
}

// ============================================================================
// Signature and submit detection
// ============================================================================

#[test]
fn signature_ignores_field_order() {
    let attrs = FormAttributes {
        id: Some("signup".into()),
        ..Default::default()
    };
    let forward = vec![email(), password(), confirm_password()];
    let backward = vec![confirm_password(), password(), email()];

    assert_eq!(form_signature(&forward, &attrs), form_signature(&backward, &attrs));
    assert_ne!(
        form_signature(&forward, &attrs),
        form_signature(&forward, &FormAttributes::default())
    );
    assert_eq!(form_signature(&forward, &attrs).len(), 40);
}

#[test]
fn submit_detection() {
    let sign_in = FieldDescriptor {
        label: Some("Sign in".into()),
        ..typed("button")
    };

    assert!(detect_submit(&[email(), typed("submit")]));
    assert!(detect_submit(&[email(), sign_in]));
    assert!(!detect_submit(&[email(), field("go", "button")]));
    assert!(!detect_submit(&[email()]));
}

// ============================================================================
// analyze_password / ask
// ============================================================================

#[test]
fn engine_analyzes_passwords() {
    let engine = FormEngine::default();
    let pw = password();
    let fields = vec![email(), pw.clone(), confirm_password()];

    let ctx = engine.analyze_password(&pw, &fields, None, None);
    assert_eq!(ctx.form_type, PasswordFormType::Registration);
    assert!(ctx.required);
}

#[test]
fn ask_password_requirement() {
    let engine = FormEngine::default();
    let request = AskRequest::new("is this required?", Some(password()), FormContext::unknown());

    let response = engine.ask(&request);
    assert!(response.text.starts_with("This password field is required."));
    assert_eq!(response.source, AnswerSource::Policy);
}

#[test]
fn ask_uses_siblings_from_the_request() {
    let engine = FormEngine::default();
    let request = AskRequest {
        fields: vec![email(), password(), confirm_password()],
        ..AskRequest::new("What is this for?", Some(password()), FormContext::unknown())
    };

    assert!(engine.ask(&request).text.contains("creating a new account"));
}

#[test]
fn ask_with_failing_remote_still_answers() {
    let engine = FormEngine::with_remote(60, Box::new(MockTextInference::unavailable()));
    let request = AskRequest::new("What is this?", Some(named("favorite_color")), FormContext::unknown());

    let response = engine.ask(&request);
    assert_eq!(response.source, AnswerSource::Fallback);
    assert!(response.text.contains("favorite_color"));
}

// ============================================================================
// Wire format
// ============================================================================

#[test]
fn extractor_json_deserializes() {
    let json = r#"{
        "fields": [
            {"name": "email", "type": "email", "required": true, "ariaLabel": "Email"},
            {"name": "password", "type": "password", "validationRules": {"minLength": 8}},
            {"type": "submit", "label": "Log in"}
        ],
        "page": {
            "url": "https://example.com/login",
            "title": "Sign in",
            "formAttributes": {"id": "login-form", "method": "post"}
        }
    }"#;
    let request: ClassifyRequest = serde_json::from_str(json).unwrap();

    assert!(request.in_form_element);
    assert_eq!(request.has_submit, None);
    assert_eq!(request.fields[1].validation_rules.min_length, Some(8));

    let response = FormEngine::default().classify(&request);
    assert_eq!(response.form_context.form_type, FormType::Login);

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["formContext"]["formType"], "login");
    assert_eq!(value["formContext"]["detectionMethod"], "attributes");
    assert_eq!(value["fieldPurposes"]["email"]["purpose"], "email");
    assert!(value["quality"]["isLegitimate"].is_boolean());
    assert!(value["formSignature"].is_string());
    assert!(value.get("diagnostics").is_none());
}

#[test]
fn ask_request_json_deserializes() {
    let json = r#"{
        "question": "What kind of form is this?",
        "formContext": {"formType": "contact", "purpose": "Reach support.", "confidence": 0.8}
    }"#;
    let request: AskRequest = serde_json::from_str(json).unwrap();
    let response = FormEngine::default().ask(&request);

    assert!(response.text.contains("contact form"));
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["source"], "policy");
}
