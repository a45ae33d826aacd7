use tracing::trace;

use crate::form::form_model::{FieldDescriptor, FieldPurpose};
use crate::form::keywords::contains_any;

pub const KEYWORD_CONFIDENCE: f32 = 0.8;
pub const TYPE_FALLBACK_CONFIDENCE: f32 = 0.5;

/// Purpose categories in priority order. Business-registration fields come
/// first so they are never shadowed by the generic name/address categories;
/// within the generic block, more specific tags precede the ones whose
/// keywords they contain (confirm_password before password, username and the
/// name parts before full_name).
static PURPOSE_CATEGORIES: &[(FieldPurpose, &[&str])] = &[
    // ---- Business registration ----
    (
        FieldPurpose::BusinessEin,
        &[
            "ein", "fein", "employer identification", "employer_identification",
            "tax id", "tax_id", "taxid", "federal tax", "tin",
        ],
    ),
    (
        FieldPurpose::BusinessName,
        &[
            "business name", "business_name", "businessname", "company name",
            "company_name", "companyname", "legal name", "legal_name", "entity name",
            "entity_name", "llc name", "corporation name",
        ],
    ),
    (
        FieldPurpose::BusinessEntityType,
        &[
            "entity type", "entity_type", "entitytype", "business type", "business_type",
            "business structure", "organization type", "llc", "corporation",
            "sole proprietor", "partnership",
        ],
    ),
    (
        FieldPurpose::RegisteredAgent,
        &[
            "registered agent", "registered_agent", "registeredagent", "statutory agent",
            "agent for service", "resident agent",
        ],
    ),
    (
        FieldPurpose::FilingJurisdiction,
        &[
            "jurisdiction", "state of formation", "formation state", "formation_state",
            "state of incorporation", "filing state", "filing_state",
        ],
    ),
    (
        FieldPurpose::BusinessPurpose,
        &[
            "business purpose", "business_purpose", "nature of business",
            "business activity", "business_activity", "purpose of business",
        ],
    ),
    (
        FieldPurpose::BusinessAddress,
        &[
            "business address", "business_address", "principal office",
            "principal address", "principal_address", "office address", "company address",
            "company_address",
        ],
    ),
    // ---- Generic ----
    (FieldPurpose::Email, &["email", "e-mail", "emailaddress"]),
    (
        FieldPurpose::ConfirmPassword,
        &[
            "confirm password", "confirm_password", "confirm-password", "confirmpassword",
            "password_confirm", "password_confirmation", "password confirmation",
            "passwordconfirm", "verify password", "verify_password", "retype",
            "re-enter password", "repeat password", "repeat_password", "password2",
        ],
    ),
    (
        FieldPurpose::Password,
        &["password", "passwd", "pwd", "passcode", "passphrase"],
    ),
    (
        FieldPurpose::Username,
        &[
            "username", "user_name", "user name", "userid", "user_id", "login",
            "screen name", "screenname",
        ],
    ),
    (
        FieldPurpose::FirstName,
        &[
            "first name", "first_name", "firstname", "first-name", "fname", "given name",
            "given_name", "forename",
        ],
    ),
    (
        FieldPurpose::LastName,
        &[
            "last name", "last_name", "lastname", "last-name", "lname", "surname",
            "family name", "family_name",
        ],
    ),
    (
        FieldPurpose::FullName,
        &["full name", "full_name", "fullname", "your name", "name"],
    ),
    (
        FieldPurpose::Phone,
        &["phone", "telephone", "mobile", "cellphone", "cell phone", "tel"],
    ),
    (
        FieldPurpose::Address,
        &["address", "street", "addr", "address1", "address_line"],
    ),
    (FieldPurpose::City, &["city", "town", "locality"]),
    (FieldPurpose::State, &["state", "province", "region"]),
    (
        FieldPurpose::Zip,
        &["zip", "zipcode", "zip_code", "postal", "postcode"],
    ),
    (FieldPurpose::Country, &["country"]),
    (
        FieldPurpose::DateOfBirth,
        &["birth", "dob", "birthday", "birthdate"],
    ),
    (
        FieldPurpose::CreditCard,
        &[
            "card number", "card_number", "cardnumber", "credit card", "credit_card",
            "creditcard", "cc-number", "ccnumber", "cc_number",
        ],
    ),
    (
        FieldPurpose::Cvv,
        &["cvv", "cvc", "csc", "cvv2", "security code", "security_code", "card code"],
    ),
    (
        FieldPurpose::Expiration,
        &["expiration", "expiry", "exp date", "exp_date", "expdate", "cc-exp"],
    ),
    (FieldPurpose::Search, &["search", "query", "keyword", "q"]),
    (
        FieldPurpose::Comment,
        &["comment", "message", "feedback", "remarks", "notes"],
    ),
    (FieldPurpose::Subject, &["subject", "topic", "regarding"]),
    (FieldPurpose::Quantity, &["quantity", "qty"]),
    (FieldPurpose::Price, &["price", "amount", "cost", "total"]),
    (
        FieldPurpose::Coupon,
        &["coupon", "promo", "voucher", "discount code", "promotion code"],
    ),
    (
        FieldPurpose::Newsletter,
        &["newsletter", "subscribe", "mailing list", "opt-in", "opt in"],
    ),
];

/// A purpose tag with the confidence of the rule that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PurposeInference {
    pub purpose: FieldPurpose,
    pub confidence: f32,
}

/// Map one field to its semantic purpose.
///
/// Priority cascade over `PURPOSE_CATEGORIES`: the first category with any
/// keyword in the field's text wins. With no match, the raw `type` attribute
/// becomes the tag; with no type either, `Unknown`.
pub fn infer_purpose(field: &FieldDescriptor) -> FieldPurpose {
    infer_purpose_with_confidence(field).purpose
}

pub fn infer_purpose_with_confidence(field: &FieldDescriptor) -> PurposeInference {
    let blob = field.text_blob();

    if let Some((purpose, _)) = PURPOSE_CATEGORIES
        .iter()
        .find(|(_, keywords)| contains_any(&blob, keywords))
    {
        trace!(field = %blob, purpose = %purpose, "purpose matched by keyword");
        return PurposeInference {
            purpose: purpose.clone(),
            confidence: KEYWORD_CONFIDENCE,
        };
    }

    let input_type = field.input_type();
    if input_type.is_empty() {
        return PurposeInference {
            purpose: FieldPurpose::Unknown,
            confidence: 0.0,
        };
    }

    PurposeInference {
        purpose: FieldPurpose::Type(input_type),
        confidence: TYPE_FALLBACK_CONFIDENCE,
    }
}

/// Copy of `field` carrying its inferred purpose and confidence. Identity
/// fields are left untouched.
pub fn annotate(field: &FieldDescriptor) -> FieldDescriptor {
    let inference = infer_purpose_with_confidence(field);
    FieldDescriptor {
        purpose: Some(inference.purpose),
        purpose_confidence: Some(inference.confidence),
        ..field.clone()
    }
}

/// Purpose of `field`, reusing an existing annotation when present.
pub fn purpose_of(field: &FieldDescriptor) -> FieldPurpose {
    field
        .purpose
        .clone()
        .unwrap_or_else(|| infer_purpose(field))
}
