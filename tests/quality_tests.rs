use form_sense::form::form_model::FieldDescriptor;
use form_sense::form::quality::{DEFAULT_THRESHOLD, FormQualityScorer};

use crate::common::fixtures::{contact_fields, email, field, password, required, typed};

mod common;

fn scorer() -> FormQualityScorer {
    FormQualityScorer::default()
}

// ============================================================================
// Signatures that lower the score
// ============================================================================

#[test]
fn lone_search_box_is_rejected() {
    let fields = vec![field("q", "search")];
    let assessment = scorer().score(&fields, false, &[]);

    assert!(assessment.score < 40, "score {}", assessment.score);
    assert!(!assessment.is_legitimate);
    assert!(assessment.reasons.iter().any(|r| r.contains("search")));
}

#[test]
fn newsletter_signup_is_rejected() {
    let fields = vec![email()];
    let hints = vec!["newsletter-signup".to_string()];
    let assessment = scorer().score(&fields, true, &hints);

    assert!(!assessment.is_legitimate);
    assert!(assessment.reasons.iter().any(|r| r.contains("newsletter")));
}

#[test]
fn chat_box_is_rejected() {
    let fields = vec![field("message", "textarea")];
    let hints = vec!["chat-widget".to_string()];
    let assessment = scorer().score(&fields, true, &hints);

    assert_eq!(assessment.score, 15);
    assert!(assessment.reasons.iter().any(|r| r.contains("chat")));
}

// ============================================================================
// Signatures that raise the score
// ============================================================================

#[test]
fn five_field_contact_form_with_submit_is_legitimate() {
    let assessment = scorer().score(&contact_fields(), true, &[]);

    assert!(assessment.score >= 60, "score {}", assessment.score);
    assert!(assessment.is_legitimate);
}

#[test]
fn required_bonus_is_flat() {
    let one = vec![required(field("a", "text")), field("b", "text")];
    let two = vec![required(field("a", "text")), required(field("b", "text"))];

    assert_eq!(
        scorer().score(&one, true, &[]).score,
        scorer().score(&two, true, &[]).score
    );
}

#[test]
fn type_diversity_adds_points() {
    let uniform = vec![field("a", "text"), field("b", "text"), field("c", "text")];
    let diverse = vec![field("a", "text"), field("b", "number"), field("c", "date")];

    let base = scorer().score(&uniform, true, &[]).score;
    let varied = scorer().score(&diverse, true, &[]).score;
    assert_eq!(varied, base + 15);
}

#[test]
fn reasons_are_ordered_and_signed() {
    let assessment = scorer().score(&[email(), password()], true, &[]);
    assert_eq!(assessment.reasons[0], "+10 2 fields");
    assert_eq!(assessment.reasons[1], "+15 Has a submit mechanism");
}

// ============================================================================
// Standalone groups and thresholds
// ============================================================================

#[test]
fn small_standalone_group_keeps_seventy_percent() {
    let fields = vec![email(), password()];
    let in_form = scorer().score(&fields, false, &[]);
    let standalone = scorer().score_standalone(&fields, false, &[]);

    assert_eq!(in_form.score, 65);
    assert_eq!(standalone.score as u32, in_form.score as u32 * 70 / 100);
    assert!(in_form.is_legitimate);
    assert!(!standalone.is_legitimate);
}

#[test]
fn larger_standalone_group_is_not_discounted() {
    let fields = contact_fields();
    assert_eq!(
        scorer().score_standalone(&fields, true, &[]).score,
        scorer().score(&fields, true, &[]).score
    );
}

#[test]
fn threshold_is_configurable() {
    let fields = vec![email(), password()];
    assert_eq!(DEFAULT_THRESHOLD, 60);
    assert!(!FormQualityScorer::new(70).score(&fields, false, &[]).is_legitimate);
    assert!(FormQualityScorer::new(65).score(&fields, false, &[]).is_legitimate);
    assert_eq!(FormQualityScorer::new(250).threshold, 100);
}

#[test]
fn empty_or_button_only_input_scores_zero() {
    let buttons = vec![typed("submit"), typed("hidden")];
    for fields in [Vec::<FieldDescriptor>::new(), buttons] {
        let assessment = scorer().score(&fields, true, &[]);
        assert_eq!(assessment.score, 0);
        assert!(!assessment.is_legitimate);
    }
}

#[test]
fn score_is_always_within_bounds() {
    let mut big: Vec<FieldDescriptor> = contact_fields();
    big.extend([
        required(field("city", "text")),
        field("dob", "date"),
        field("zip", "number"),
        field("country", "select"),
    ]);
    let cases = vec![
        (vec![field("q", "search")], false),
        (vec![field("query", "search")], false),
        (big, true),
    ];

    for (fields, has_submit) in cases {
        let score = scorer().score(&fields, has_submit, &[]).score;
        assert!(score <= 100);
        let standalone = scorer().score_standalone(&fields, has_submit, &[]).score;
        assert!(standalone <= 100);
    }
}
