use tracing::debug;

use crate::form::form_model::{
    FieldDescriptor, FieldPurpose, FormContext, PageMetadata, PasswordContextInfo,
    PasswordFieldContext, PasswordFormType,
};
use crate::form::keywords::{contains_any, normalize_text};
use crate::form::purpose::purpose_of;

// ============================================================================
// Keyword tables
// ============================================================================

const CONTEXT_REGISTRATION: [&str; 8] = [
    "registration", "register", "signup", "sign up", "sign-up", "create account",
    "create-account", "create an account",
];
const CONTEXT_LOGIN: [&str; 5] = ["login", "log in", "sign in", "signin", "sign-in"];

const CONFIRM_MARKERS: [&str; 6] = ["confirm", "verify", "retype", "re-enter", "repeat", "password2"];
const PASSWORD_MARKERS: [&str; 4] = ["password", "passwd", "pwd", "password2"];

const AGREEMENT_MARKERS: [&str; 4] = ["agree", "terms", "accept", "consent"];
const LOGIN_FIELD_MARKERS: [&str; 5] = ["remember", "forgot", "keep me", "stay signed", "trust this device"];

const BUTTON_REGISTRATION: [&str; 7] = ["register", "sign up", "signup", "create", "join", "get started", "enroll"];
const BUTTON_LOGIN: [&str; 5] = ["login", "log in", "sign in", "signin", "log on"];

const URL_REGISTRATION: [&str; 7] = ["register", "registration", "signup", "sign-up", "join", "create-account", "enroll"];
const URL_LOGIN: [&str; 6] = ["login", "signin", "sign-in", "log-in", "logon", "auth"];

const TITLE_REGISTRATION: [&str; 5] = ["register", "sign up", "create account", "create an account", "join"];
const TITLE_LOGIN: [&str; 4] = ["login", "log in", "sign in", "welcome back"];

/// Forms at or below this many fields that include an email/username field
/// lean toward login.
const SMALL_FORM_FIELDS: usize = 3;

// ============================================================================
// Context lookup table
// ============================================================================

/// Purpose, requirement and strength guidance for each resolved form type.
pub fn context_info(form_type: PasswordFormType) -> PasswordContextInfo {
    match form_type {
        PasswordFormType::Registration => PasswordContextInfo {
            purpose: "This password field is for creating a new account. The password you choose here is the one you will use to sign in from now on.".into(),
            requirements: "Use at least 8 characters with a mix of uppercase and lowercase letters, numbers, and symbols. Check the page for any additional rules.".into(),
            strength: Some("Pick a password you do not use on any other site. A password manager can generate and remember a unique one for you.".into()),
            form_context: "account registration".into(),
        },
        PasswordFormType::Login => PasswordContextInfo {
            purpose: "This password field is for signing in to your existing account. Enter the password you chose when you registered.".into(),
            requirements: "Enter your existing password exactly as you set it. Passwords are case-sensitive; use the \"forgot password\" link if you cannot remember it.".into(),
            strength: None,
            form_context: "account login".into(),
        },
        PasswordFormType::Generic => PasswordContextInfo {
            purpose: "This password field protects access to your account or to the information submitted with this form.".into(),
            requirements: "Use a strong password of at least 8 characters that mixes letters, numbers, and symbols.".into(),
            strength: None,
            form_context: "password protected form".into(),
        },
    }
}

// ============================================================================
// Analyzer
// ============================================================================

/// Resolve whether a password field belongs to a registration form, a login
/// form, or neither.
///
/// Order of evidence: an already-classified `form_context`, then a
/// confirm-password sibling (decisive), then accumulated registration/login
/// scores from sibling fields, submit buttons, URL and title. Equal scores
/// resolve to `Generic`.
pub fn analyze_password(
    field: &FieldDescriptor,
    other_fields: &[FieldDescriptor],
    page: Option<&PageMetadata>,
    form_context: Option<&FormContext>,
) -> PasswordFieldContext {
    let (form_type, reasoning) = resolve_form_type(field, other_fields, page, form_context);
    debug!(form_type = ?form_type, "password context resolved");

    let info = context_info(form_type);
    PasswordFieldContext {
        form_type,
        purpose: info.purpose.clone(),
        required: field.is_required(),
        context_specific_info: info,
        reasoning,
    }
}

fn resolve_form_type(
    field: &FieldDescriptor,
    other_fields: &[FieldDescriptor],
    page: Option<&PageMetadata>,
    form_context: Option<&FormContext>,
) -> (PasswordFormType, Vec<String>) {
    // ---- 1. General form context ----
    if let Some(ctx) = form_context.filter(|c| !c.is_unknown()) {
        let text = format!("{} {}", ctx.form_type.as_str(), ctx.purpose.to_lowercase());
        if contains_any(&text, &CONTEXT_REGISTRATION) {
            return (
                PasswordFormType::Registration,
                vec![format!("Form context is {}", ctx.form_type.display_name())],
            );
        }
        if contains_any(&text, &CONTEXT_LOGIN) {
            return (
                PasswordFormType::Login,
                vec![format!("Form context is {}", ctx.form_type.display_name())],
            );
        }
    }

    // Same key means the same field, annotated or not. Keyless fields
    // (buttons) are only dropped when identical.
    let own_key = field.key();
    let siblings: Vec<&FieldDescriptor> = other_fields
        .iter()
        .filter(|f| match &own_key {
            Some(key) => f.key().as_ref() != Some(key),
            None => *f != field,
        })
        .collect();

    // ---- 2. Confirm-password sibling ----
    if let Some(confirm) = siblings.iter().find(|f| is_confirm_password(f)) {
        return (
            PasswordFormType::Registration,
            vec![format!(
                "Confirm-password field \"{}\" present",
                confirm.display_label()
            )],
        );
    }

    // ---- 3. Accumulated scores ----
    let mut registration_score = 0u32;
    let mut login_score = 0u32;
    let mut reasoning = Vec::new();

    for sibling in siblings.iter().filter(|f| f.is_data_entry()) {
        let blob = sibling.text_blob();
        let purpose = purpose_of(sibling);
        if purpose.is_name()
            || purpose == FieldPurpose::DateOfBirth
            || purpose == FieldPurpose::Newsletter
            || contains_any(&blob, &AGREEMENT_MARKERS)
        {
            registration_score += 1;
            reasoning.push(format!("Registration indicator field: {}", sibling.display_label()));
        }
        if contains_any(&blob, &LOGIN_FIELD_MARKERS) {
            login_score += 1;
            reasoning.push(format!("Login indicator field: {}", sibling.display_label()));
        }
    }

    let button_text = siblings
        .iter()
        .filter(|f| f.is_button())
        .map(|f| f.text_blob())
        .collect::<Vec<_>>()
        .join(" ");
    if contains_any(&button_text, &BUTTON_REGISTRATION) {
        registration_score += 2;
        reasoning.push("Submit button reads as registration".to_string());
    }
    if contains_any(&button_text, &BUTTON_LOGIN) {
        login_score += 2;
        reasoning.push("Submit button reads as login".to_string());
    }

    if let Some(page) = page {
        let url = [
            page.url.as_deref().unwrap_or(""),
            page.form_attributes.action.as_deref().unwrap_or(""),
        ]
        .join(" ")
        .to_lowercase();
        if contains_any(&url, &URL_REGISTRATION) {
            registration_score += 2;
            reasoning.push("URL suggests registration".to_string());
        }
        if contains_any(&url, &URL_LOGIN) {
            login_score += 2;
            reasoning.push("URL suggests login".to_string());
        }

        let title = normalize_text(page.title.as_deref().unwrap_or(""));
        if contains_any(&title, &TITLE_REGISTRATION) {
            registration_score += 1;
            reasoning.push("Page title suggests registration".to_string());
        }
        if contains_any(&title, &TITLE_LOGIN) {
            login_score += 1;
            reasoning.push("Page title suggests login".to_string());
        }
    }

    let entry_count = 1 + siblings.iter().filter(|f| f.is_data_entry()).count();
    let has_identifier = siblings.iter().any(|f| {
        matches!(purpose_of(f), FieldPurpose::Email | FieldPurpose::Username)
    });
    if entry_count <= SMALL_FORM_FIELDS && has_identifier {
        login_score += 1;
        reasoning.push(format!(
            "Small form ({} fields) with an email/username field",
            entry_count
        ));
    }

    reasoning.push(format!(
        "Registration score {}, login score {}",
        registration_score, login_score
    ));

    // ---- 4. Resolve ----
    let resolved = if registration_score > login_score {
        PasswordFormType::Registration
    } else if login_score > registration_score {
        PasswordFormType::Login
    } else {
        PasswordFormType::Generic
    };

    (resolved, reasoning)
}

/// A second password-style field asking the user to repeat the password.
pub fn is_confirm_password(field: &FieldDescriptor) -> bool {
    if purpose_of(field) == FieldPurpose::ConfirmPassword {
        return true;
    }
    let blob = field.text_blob();
    contains_any(&blob, &CONFIRM_MARKERS) && contains_any(&blob, &PASSWORD_MARKERS)
}
