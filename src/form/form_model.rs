use serde::{Deserialize, Serialize};

// ============================================================================
// Field descriptors (produced by the extractor, read-only to the engine)
// ============================================================================

/// Input types that render as buttons rather than data-entry fields.
pub const BUTTON_TYPES: [&str; 4] = ["submit", "button", "reset", "image"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationRules {
    pub pattern: Option<String>,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub min: Option<String>,
    pub max: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
    pub selected: bool,
}

/// DOM-free description of one form input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldDescriptor {
    pub name: Option<String>,
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub validation_rules: ValidationRules,
    pub options: Vec<SelectOption>,
    pub aria_label: Option<String>,
    pub aria_required: Option<String>,
    pub class_name: Option<String>,
    /// Explicit `data-optional` marker set by the page author.
    #[serde(alias = "dataOptional")]
    pub optional: bool,

    // ---- Engine annotations ----
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<FieldPurpose>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose_confidence: Option<f32>,
}

impl FieldDescriptor {
    /// Lowercased `type` attribute, empty when absent.
    pub fn input_type(&self) -> String {
        self.r#type
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .unwrap_or_default()
    }

    pub fn is_password(&self) -> bool {
        self.input_type() == "password"
    }

    pub fn is_textarea(&self) -> bool {
        self.input_type() == "textarea"
    }

    pub fn is_button(&self) -> bool {
        BUTTON_TYPES.contains(&self.input_type().as_str())
    }

    /// True for fields that take user data (not buttons, not hidden inputs).
    pub fn is_data_entry(&self) -> bool {
        !self.is_button() && self.input_type() != "hidden"
    }

    /// A field with no name, id or placeholder cannot be referenced or reasoned about.
    pub fn is_malformed(&self) -> bool {
        is_blank(&self.name) && is_blank(&self.id) && is_blank(&self.placeholder)
    }

    /// Stable key used in response maps: name, then id, then placeholder.
    pub fn key(&self) -> Option<String> {
        [&self.name, &self.id, &self.placeholder]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Human-facing name: label, aria-label, placeholder, then name/id.
    pub fn display_label(&self) -> String {
        [
            &self.label,
            &self.aria_label,
            &self.placeholder,
            &self.name,
            &self.id,
        ]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "this field".to_string())
    }

    /// name + id + label + placeholder + type, lowercased and space-joined.
    pub fn text_blob(&self) -> String {
        [
            &self.name,
            &self.id,
            &self.label,
            &self.placeholder,
            &self.r#type,
        ]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }

    /// `text_blob` plus aria-label and class name, for signature checks that
    /// look at presentation hints too.
    pub fn extended_blob(&self) -> String {
        let mut blob = self.text_blob();
        for extra in [&self.aria_label, &self.class_name].into_iter().flatten() {
            blob.push(' ');
            blob.push_str(&extra.to_lowercase());
        }
        blob
    }

    fn aria_says(&self, value: &str) -> bool {
        self.aria_required
            .as_deref()
            .is_some_and(|a| a.trim().eq_ignore_ascii_case(value))
    }

    /// Password fields are required unless the page explicitly says otherwise
    /// (`aria-required="false"` or a `data-optional` marker). Every other field
    /// follows its `required` / `aria-required` attributes.
    pub fn is_required(&self) -> bool {
        if self.is_password() {
            return !(self.aria_says("false") || self.optional);
        }
        self.required || self.aria_says("true")
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).is_none_or(str::is_empty)
}

// ============================================================================
// Page metadata
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormAttributes {
    pub id: Option<String>,
    pub name: Option<String>,
    pub action: Option<String>,
    pub method: Option<String>,
    pub class_name: Option<String>,
}

impl FormAttributes {
    /// id + name + class + action, lowercased.
    pub fn text(&self) -> String {
        [&self.id, &self.name, &self.class_name, &self.action]
            .into_iter()
            .flatten()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMetadata {
    pub url: Option<String>,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub form_attributes: FormAttributes,
    pub surrounding_headings: Vec<String>,
    pub container_hints: Vec<String>,
}

// ============================================================================
// Purpose tags
// ============================================================================

/// Closed vocabulary of field purposes. `Type` carries the raw `type`
/// attribute when no category matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldPurpose {
    BusinessEin,
    BusinessName,
    BusinessEntityType,
    RegisteredAgent,
    FilingJurisdiction,
    BusinessPurpose,
    BusinessAddress,
    Email,
    ConfirmPassword,
    Password,
    Username,
    FirstName,
    LastName,
    FullName,
    Phone,
    Address,
    City,
    State,
    Zip,
    Country,
    DateOfBirth,
    CreditCard,
    Cvv,
    Expiration,
    Search,
    Comment,
    Subject,
    Quantity,
    Price,
    Coupon,
    Newsletter,
    Type(String),
    Unknown,
}

impl FieldPurpose {
    pub fn as_str(&self) -> &str {
        match self {
            FieldPurpose::BusinessEin => "businessEIN",
            FieldPurpose::BusinessName => "businessName",
            FieldPurpose::BusinessEntityType => "businessEntityType",
            FieldPurpose::RegisteredAgent => "registeredAgent",
            FieldPurpose::FilingJurisdiction => "filingJurisdiction",
            FieldPurpose::BusinessPurpose => "businessPurpose",
            FieldPurpose::BusinessAddress => "businessAddress",
            FieldPurpose::Email => "email",
            FieldPurpose::ConfirmPassword => "confirm_password",
            FieldPurpose::Password => "password",
            FieldPurpose::Username => "username",
            FieldPurpose::FirstName => "first_name",
            FieldPurpose::LastName => "last_name",
            FieldPurpose::FullName => "full_name",
            FieldPurpose::Phone => "phone",
            FieldPurpose::Address => "address",
            FieldPurpose::City => "city",
            FieldPurpose::State => "state",
            FieldPurpose::Zip => "zip",
            FieldPurpose::Country => "country",
            FieldPurpose::DateOfBirth => "date_of_birth",
            FieldPurpose::CreditCard => "credit_card",
            FieldPurpose::Cvv => "cvv",
            FieldPurpose::Expiration => "expiration",
            FieldPurpose::Search => "search",
            FieldPurpose::Comment => "comment",
            FieldPurpose::Subject => "subject",
            FieldPurpose::Quantity => "quantity",
            FieldPurpose::Price => "price",
            FieldPurpose::Coupon => "coupon",
            FieldPurpose::Newsletter => "newsletter",
            FieldPurpose::Type(t) => t.as_str(),
            FieldPurpose::Unknown => "unknown",
        }
    }

    pub fn is_name(&self) -> bool {
        matches!(
            self,
            FieldPurpose::FirstName | FieldPurpose::LastName | FieldPurpose::FullName
        )
    }

    pub fn is_address(&self) -> bool {
        matches!(
            self,
            FieldPurpose::Address
                | FieldPurpose::City
                | FieldPurpose::State
                | FieldPurpose::Zip
                | FieldPurpose::Country
                | FieldPurpose::BusinessAddress
        )
    }

    pub fn is_contact(&self) -> bool {
        matches!(self, FieldPurpose::Email | FieldPurpose::Phone)
    }
}

impl From<String> for FieldPurpose {
    fn from(tag: String) -> Self {
        const NAMED: [FieldPurpose; 31] = [
            FieldPurpose::BusinessEin,
            FieldPurpose::BusinessName,
            FieldPurpose::BusinessEntityType,
            FieldPurpose::RegisteredAgent,
            FieldPurpose::FilingJurisdiction,
            FieldPurpose::BusinessPurpose,
            FieldPurpose::BusinessAddress,
            FieldPurpose::Email,
            FieldPurpose::ConfirmPassword,
            FieldPurpose::Password,
            FieldPurpose::Username,
            FieldPurpose::FirstName,
            FieldPurpose::LastName,
            FieldPurpose::FullName,
            FieldPurpose::Phone,
            FieldPurpose::Address,
            FieldPurpose::City,
            FieldPurpose::State,
            FieldPurpose::Zip,
            FieldPurpose::Country,
            FieldPurpose::DateOfBirth,
            FieldPurpose::CreditCard,
            FieldPurpose::Cvv,
            FieldPurpose::Expiration,
            FieldPurpose::Search,
            FieldPurpose::Comment,
            FieldPurpose::Subject,
            FieldPurpose::Quantity,
            FieldPurpose::Price,
            FieldPurpose::Coupon,
            FieldPurpose::Newsletter,
        ];

        if tag.is_empty() || tag == "unknown" {
            return FieldPurpose::Unknown;
        }
        NAMED
            .into_iter()
            .find(|p| p.as_str() == tag)
            .unwrap_or(FieldPurpose::Type(tag))
    }
}

impl From<FieldPurpose> for String {
    fn from(purpose: FieldPurpose) -> Self {
        purpose.as_str().to_string()
    }
}

impl std::fmt::Display for FieldPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Classification results
// ============================================================================

/// Form types in declaration order. Keyword-count ties resolve to the
/// earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    Login,
    Registration,
    Contact,
    Payment,
    Shipping,
    Survey,
    Employment,
    Search,
    Unknown,
}

impl FormType {
    pub const KNOWN: [FormType; 8] = [
        FormType::Login,
        FormType::Registration,
        FormType::Contact,
        FormType::Payment,
        FormType::Shipping,
        FormType::Survey,
        FormType::Employment,
        FormType::Search,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::Login => "login",
            FormType::Registration => "registration",
            FormType::Contact => "contact",
            FormType::Payment => "payment",
            FormType::Shipping => "shipping",
            FormType::Survey => "survey",
            FormType::Employment => "employment",
            FormType::Search => "search",
            FormType::Unknown => "unknown",
        }
    }

    /// "registration form", "login form", ...; plain "form" when unknown.
    pub fn display_name(&self) -> String {
        match self {
            FormType::Unknown => "form".to_string(),
            other => format!("{} form", other.as_str()),
        }
    }

    /// Sentence used when a type was recognized but no purpose phrase was found.
    pub fn generic_purpose(&self) -> &'static str {
        match self {
            FormType::Login => "Sign in to an existing account.",
            FormType::Registration => "Create a new account or register for a service.",
            FormType::Contact => "Send a message or inquiry to the site owner.",
            FormType::Payment => "Provide payment details to complete a purchase.",
            FormType::Shipping => "Provide the address where an order should be delivered.",
            FormType::Survey => "Collect your feedback or opinions.",
            FormType::Employment => "Apply for a job or position.",
            FormType::Search => "Search the site's content.",
            FormType::Unknown => "This form is collecting information.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    Attributes,
    Url,
    Title,
    Fields,
    SurroundingText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormContext {
    pub form_type: FormType,
    pub purpose: String,
    pub confidence: f32,
    /// None when nothing matched.
    pub detection_method: Option<DetectionMethod>,
    #[serde(default)]
    pub reasoning: Vec<String>,
}

impl FormContext {
    pub fn unknown() -> Self {
        FormContext {
            form_type: FormType::Unknown,
            purpose: FormType::Unknown.generic_purpose().to_string(),
            confidence: 0.0,
            detection_method: None,
            reasoning: vec![],
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.form_type == FormType::Unknown || self.confidence <= 0.0
    }
}

impl Default for FormContext {
    fn default() -> Self {
        Self::unknown()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAssessment {
    pub score: u8,
    pub is_legitimate: bool,
    pub reasons: Vec<String>,
}

impl QualityAssessment {
    pub fn rejected(reason: impl Into<String>) -> Self {
        QualityAssessment {
            score: 0,
            is_legitimate: false,
            reasons: vec![reason.into()],
        }
    }
}

// ============================================================================
// Password context
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordFormType {
    Registration,
    Login,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordContextInfo {
    pub purpose: String,
    pub requirements: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,
    pub form_context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordFieldContext {
    pub form_type: PasswordFormType,
    pub purpose: String,
    pub required: bool,
    pub context_specific_info: PasswordContextInfo,
    #[serde(default)]
    pub reasoning: Vec<String>,
}
