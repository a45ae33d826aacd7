use crate::form::form_model::FieldPurpose;

/// What we know about a common kind of field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKnowledge {
    pub purpose: &'static str,
    pub format: &'static str,
    pub examples: &'static [&'static str],
    pub privacy: Option<&'static str>,
    pub tips: Option<&'static str>,
}

static EMAIL: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your email address, which is used for sign-in, account recovery, and messages from the service.",
    format: "Enter a valid email address in the form name@domain.com.",
    examples: &["john.doe@example.com", "jane_smith123@company.co.uk"],
    privacy: Some("Your email often acts as a unique identifier, so consider who you share it with."),
    tips: None,
};

static PASSWORD: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your password, which secures your account from unauthorized access.",
    format: "Use at least 8 characters, mixing uppercase and lowercase letters, numbers, and symbols.",
    examples: &[],
    privacy: Some("Never share your password. Legitimate organizations will not ask you for it."),
    tips: Some("Use a unique password for every site; a password manager helps."),
};

static FULL_NAME: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your full name, which identifies you in the system and on documents.",
    format: "Enter your name as it appears on official documents.",
    examples: &["John Smith", "María García López"],
    privacy: Some("Basic personal information used for identification."),
    tips: None,
};

static FIRST_NAME: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your first (given) name only.",
    format: "Enter just your first name, without your family name.",
    examples: &["John", "María", "Li"],
    privacy: Some("Basic personal information, usually used for personalization."),
    tips: None,
};

static LAST_NAME: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your last (family) name only.",
    format: "Enter just your last name, without your given name.",
    examples: &["Smith", "García", "Zhang"],
    privacy: Some("Basic personal information, usually used for identification."),
    tips: None,
};

static USERNAME: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for the username that identifies your account.",
    format: "Enter the username you registered with, or choose one using letters, numbers, and allowed symbols.",
    examples: &["jsmith", "jane_doe42"],
    privacy: Some("Usernames are often visible to other users."),
    tips: None,
};

static PHONE: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your phone number, which may be used for verification, two-factor authentication, or contacting you.",
    format: "Enter your phone number, including the country code if asked.",
    examples: &["+1 555-123-4567", "(555) 123-4567"],
    privacy: Some("Consider the privacy implications before sharing your phone number."),
    tips: None,
};

static ADDRESS: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your street address, which is needed for shipping, billing, or identification.",
    format: "Enter your full street address, including house or apartment number.",
    examples: &["123 Main Street Apt 4B", "1600 Pennsylvania Avenue NW"],
    privacy: Some("Sensitive personal information; be careful where you share it."),
    tips: None,
};

static CITY: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your city or town, which completes your address.",
    format: "Enter the name of your city or town.",
    examples: &["New York", "London", "Tokyo"],
    privacy: None,
    tips: None,
};

static STATE: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your state, province, or region, which completes your address.",
    format: "Enter the full name or the standard abbreviation of your state or province.",
    examples: &["California", "CA", "Ontario", "ON"],
    privacy: None,
    tips: None,
};

static ZIP: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your postal or ZIP code, which is used for mail delivery and location checks.",
    format: "Enter your postal code in your country's format.",
    examples: &["90210", "SW1A 1AA"],
    privacy: None,
    tips: Some("It must match the city and state you entered."),
};

static COUNTRY: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your country, which completes your address and may affect available options or pricing.",
    format: "Select your country from the list or type its name.",
    examples: &["United States", "Canada", "Germany"],
    privacy: None,
    tips: None,
};

static DATE_OF_BIRTH: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your date of birth, which helps verify your identity and age eligibility.",
    format: "Enter your birth date in the format the form asks for, typically MM/DD/YYYY in the US.",
    examples: &["01/15/1985", "15/01/1985"],
    privacy: Some("Sensitive personal information often used for identity verification."),
    tips: Some("Check whether the form expects MM/DD/YYYY or DD/MM/YYYY."),
};

static CREDIT_CARD: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your card number, which is required to process the payment.",
    format: "Enter the long number on the front of your card, without spaces unless the form shows them.",
    examples: &["4111111111111111", "4111 1111 1111 1111"],
    privacy: Some("Highly sensitive financial information. Only enter it on secure (https) pages."),
    tips: None,
};

static CVV: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for the card security code, which shows you have the physical card.",
    format: "Enter the 3-digit code on the back of your card (4 digits on the front for American Express).",
    examples: &["123", "4567"],
    privacy: Some("Merchants should never store this code."),
    tips: None,
};

static EXPIRATION: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your card's expiration date.",
    format: "Enter the month and year printed on your card, usually MM/YY.",
    examples: &["08/27", "12/2029"],
    privacy: None,
    tips: None,
};

static BUSINESS_EIN: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for your business's Employer Identification Number, the federal tax ID issued by the IRS.",
    format: "Enter the 9-digit number, usually written as XX-XXXXXXX.",
    examples: &["12-3456789"],
    privacy: Some("A business tax identifier; share it only with trusted agencies and partners."),
    tips: None,
};

static BUSINESS_NAME: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for the legal name of your business exactly as it is or will be registered.",
    format: "Include the entity designator your state requires, such as LLC or Inc.",
    examples: &["Acme Widgets LLC", "Blue Harbor Consulting, Inc."],
    privacy: None,
    tips: None,
};

static REGISTERED_AGENT: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for the registered agent who accepts legal documents on behalf of your business.",
    format: "Enter the agent's full name or company name and a physical address in the filing state.",
    examples: &["Jane Smith", "Northwest Registered Agent LLC"],
    privacy: None,
    tips: None,
};

static CHECKBOX: FieldKnowledge = FieldKnowledge {
    purpose: "Checkboxes let you select options or indicate agreement, for example to terms and conditions.",
    format: "Click the box to select it and click again to clear it.",
    examples: &["I agree to the Terms of Service", "Send me promotional emails"],
    privacy: None,
    tips: None,
};

static RADIO: FieldKnowledge = FieldKnowledge {
    purpose: "Radio buttons let you pick exactly one option from a group.",
    format: "Click the option you want; only one can be selected at a time.",
    examples: &["Yes / No", "Small / Medium / Large"],
    privacy: None,
    tips: None,
};

static FILE: FieldKnowledge = FieldKnowledge {
    purpose: "This field lets you upload a document or image.",
    format: "Click to browse your files, or drag the file onto the field.",
    examples: &["Upload your ID", "Upload a profile picture"],
    privacy: None,
    tips: None,
};

static SELECT: FieldKnowledge = FieldKnowledge {
    purpose: "This dropdown lets you choose one option from a predefined list.",
    format: "Open the dropdown and pick the matching option.",
    examples: &["Choose your country", "Select your preferred language"],
    privacy: None,
    tips: None,
};

static DATE: FieldKnowledge = FieldKnowledge {
    purpose: "This field is for entering a specific date.",
    format: "Enter the date in the format shown, often MM/DD/YYYY in the US or DD/MM/YYYY elsewhere.",
    examples: &["05/15/2023", "15/05/2023"],
    privacy: None,
    tips: None,
};

/// Knowledge entry for a purpose tag, if the field is a common one.
pub fn lookup(purpose: &FieldPurpose) -> Option<&'static FieldKnowledge> {
    let entry = match purpose {
        FieldPurpose::Email => &EMAIL,
        FieldPurpose::Password | FieldPurpose::ConfirmPassword => &PASSWORD,
        FieldPurpose::FullName => &FULL_NAME,
        FieldPurpose::FirstName => &FIRST_NAME,
        FieldPurpose::LastName => &LAST_NAME,
        FieldPurpose::Username => &USERNAME,
        FieldPurpose::Phone => &PHONE,
        FieldPurpose::Address | FieldPurpose::BusinessAddress => &ADDRESS,
        FieldPurpose::City => &CITY,
        FieldPurpose::State => &STATE,
        FieldPurpose::Zip => &ZIP,
        FieldPurpose::Country => &COUNTRY,
        FieldPurpose::DateOfBirth => &DATE_OF_BIRTH,
        FieldPurpose::CreditCard => &CREDIT_CARD,
        FieldPurpose::Cvv => &CVV,
        FieldPurpose::Expiration => &EXPIRATION,
        FieldPurpose::BusinessEin => &BUSINESS_EIN,
        FieldPurpose::BusinessName => &BUSINESS_NAME,
        FieldPurpose::RegisteredAgent => &REGISTERED_AGENT,
        FieldPurpose::Type(t) => match t.as_str() {
            "checkbox" => &CHECKBOX,
            "radio" => &RADIO,
            "file" => &FILE,
            "select" | "select-one" | "select-multiple" => &SELECT,
            "date" => &DATE,
            _ => return None,
        },
        _ => return None,
    };
    Some(entry)
}

/// Canned answers to form-level questions, matched by substring.
pub const COMMON_QUESTIONS: [(&str, &str); 7] = [
    (
        "how long will this take",
        "Most forms take between 5 and 15 minutes, depending on how familiar you are with the information requested. Having your documents ready makes it faster.",
    ),
    (
        "is this information secure",
        "Information should be sent over a secure connection. Look for https in the address bar and check the site's privacy policy for how your data is used.",
    ),
    (
        "can i save and continue later",
        "Some forms let you save progress and return later; look for a Save button. If there is none, plan to finish in one session.",
    ),
    (
        "what if i make a mistake",
        "Most forms let you review your answers before submitting. After submission you may need to contact the organization to correct errors.",
    ),
    (
        "what happens after i submit",
        "After you submit, the organization processes your information. You will often get a confirmation email or message with next steps.",
    ),
    (
        "why isn't the form submitting",
        "Check for error messages next to fields, make sure every required field is filled in correctly, and confirm your connection is working.",
    ),
    (
        "do i need to fill out everything",
        "You only need to complete required fields, usually marked with an asterisk (*). Optional fields can be left blank.",
    ),
];

pub fn common_answer(question: &str) -> Option<&'static str> {
    let lower = question.to_lowercase();
    COMMON_QUESTIONS
        .iter()
        .find(|(pattern, _)| lower.contains(pattern))
        .map(|(_, answer)| *answer)
}
