use form_sense::form::classifier::{
    ATTRIBUTES_CONFIDENCE, Groups, URL_CONFIDENCE, best_form_type, classify, detect_by_fields,
    detect_by_surrounding_text, detect_by_title, extract_purpose_phrase,
};
use form_sense::form::form_model::{
    DetectionMethod, FieldDescriptor, FormAttributes, FormContext, FormType, PageMetadata,
};

use crate::common::fixtures::{
    confirm_password, email, field, named, page_with_title, page_with_url, password, typed,
};

mod common;

// ============================================================================
// Fields method
// ============================================================================

#[test]
fn email_password_confirm_is_a_registration_form() {
    let fields = vec![typed("email"), typed("password"), confirm_password()];
    let ctx = classify(&fields, &PageMetadata::default());

    assert_eq!(ctx.form_type.display_name(), "registration form");
    assert!(ctx.confidence > 0.6, "confidence {}", ctx.confidence);
    assert_eq!(ctx.detection_method, Some(DetectionMethod::Fields));
}

#[test]
fn email_password_tie_resolves_to_login() {
    // login and registration both match two groups; login is declared first
    let found = detect_by_fields(&[email(), password()]).unwrap();
    assert_eq!(found.form_type, FormType::Login);
}

#[test]
fn fields_confidence_is_capped() {
    let fields = vec![
        field("address", "text"),
        field("city", "text"),
        field("state", "text"),
        field("zip", "text"),
        field("country", "text"),
        field("shipping_method", "select"),
    ];
    let found = detect_by_fields(&fields).unwrap();
    assert_eq!(found.form_type, FormType::Shipping);
    assert!(found.confidence <= 0.9);
    assert!(found.confidence >= 0.6);
}

#[test]
fn unrelated_fields_do_not_classify() {
    let ctx = classify(&[named("favorite_color")], &PageMetadata::default());
    assert_eq!(ctx.form_type, FormType::Unknown);
    assert_eq!(ctx.confidence, 0.0);
    assert_eq!(ctx.detection_method, None);
    assert_eq!(ctx.purpose, "This form is collecting information.");
}

#[test]
fn no_fields_is_unknown() {
    let ctx = classify(&[], &page_with_url("https://example.com/login"));
    assert_eq!(ctx, FormContext::unknown());
}

// ============================================================================
// Page metadata methods
// ============================================================================

#[test]
fn form_attributes_are_most_reliable() {
    let page = PageMetadata {
        form_attributes: FormAttributes {
            id: Some("signup-form".into()),
            ..Default::default()
        },
        url: Some("https://example.com/account/login".into()),
        ..Default::default()
    };
    let ctx = classify(&[email(), password()], &page);

    assert_eq!(ctx.form_type, FormType::Registration);
    assert_eq!(ctx.confidence, ATTRIBUTES_CONFIDENCE);
    assert_eq!(ctx.detection_method, Some(DetectionMethod::Attributes));
}

#[test]
fn url_wins_ties_with_field_evidence() {
    let ctx = classify(&[email(), password()], &page_with_url("https://example.com/signup"));
    assert_eq!(ctx.form_type, FormType::Registration);
    assert_eq!(ctx.confidence, URL_CONFIDENCE);
    assert_eq!(ctx.detection_method, Some(DetectionMethod::Url));
}

#[test]
fn url_keywords_match_path_segments_not_word_stems() {
    let fields = [field("comment", "textarea"), email()];

    let ctx = classify(&fields, &page_with_url("https://example.com/authors/jane/comments"));
    assert_eq!(ctx.form_type, FormType::Contact);
    assert_eq!(ctx.detection_method, Some(DetectionMethod::Fields));

    let ctx = classify(&fields, &page_with_url("https://example.com/auth/start"));
    assert_eq!(ctx.form_type, FormType::Login);
    assert_eq!(ctx.detection_method, Some(DetectionMethod::Url));
}

#[test]
fn title_detects_contact_forms() {
    let found = detect_by_title(&page_with_title("Contact Us | Acme")).unwrap();
    assert_eq!(found.form_type, FormType::Contact);
    assert_eq!(found.method, DetectionMethod::Title);
}

#[test]
fn surrounding_text_supplies_a_purpose_phrase() {
    let page = PageMetadata {
        surrounding_headings: vec![
            "Careers".into(),
            "Join our team".into(),
            "Upload your resume".into(),
        ],
        ..Default::default()
    };
    let found = detect_by_surrounding_text(&page).unwrap();

    assert_eq!(found.form_type, FormType::Employment);
    assert_eq!(found.purpose.as_deref(), Some("Join our team"));
}

#[test]
fn purpose_phrase_must_belong_to_the_type() {
    let snippets = vec!["Contact us".to_string()];
    assert_eq!(extract_purpose_phrase(&snippets, FormType::Payment), None);
    assert_eq!(
        extract_purpose_phrase(&snippets, FormType::Contact).as_deref(),
        Some("Contact us")
    );
}

#[test]
fn generic_purpose_is_filled_in() {
    let ctx = classify(&[email(), password()], &page_with_url("https://example.com/login"));
    assert_eq!(ctx.form_type, FormType::Login);
    assert_eq!(ctx.purpose, FormType::Login.generic_purpose());
    assert!(!ctx.reasoning.is_empty());
}

// ============================================================================
// Thresholds, bounds and determinism
// ============================================================================

#[test]
fn match_threshold_is_exclusive() {
    // one of four contact groups = 0.25, below the threshold
    let text = "phone";
    let profiles: &[(FormType, Groups)] = &[(
        FormType::Contact,
        &[&["message"], &["subject"], &["phone"], &["name"]],
    )];
    assert!(best_form_type(text, profiles).is_none());
}

#[test]
fn confidence_is_always_within_bounds() {
    let inputs: Vec<(Vec<FieldDescriptor>, PageMetadata)> = vec![
        (vec![], PageMetadata::default()),
        (vec![typed("search")], page_with_url("https://example.com/search?q=x")),
        (vec![email(), password(), confirm_password()], page_with_title("Sign up")),
        (vec![named("card_number"), named("cvv"), named("expiry")], PageMetadata::default()),
    ];

    for (fields, page) in inputs {
        let ctx = classify(&fields, &page);
        assert!((0.0..=1.0).contains(&ctx.confidence), "{:?}", ctx);
    }
}

#[test]
fn classification_is_deterministic() {
    let fields = vec![email(), password(), confirm_password()];
    let page = page_with_title("Create your account");

    let first = classify(&fields, &page);
    for _ in 0..5 {
        assert_eq!(classify(&fields, &page), first);
    }
}
