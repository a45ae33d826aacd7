use form_sense::form::form_model::{
    DetectionMethod, FieldDescriptor, FormContext, FormType, PageMetadata,
};

/// Field with a name and a type.
pub fn field(name: &str, input_type: &str) -> FieldDescriptor {
    FieldDescriptor {
        name: Some(name.to_string()),
        r#type: Some(input_type.to_string()),
        ..Default::default()
    }
}

/// Field with only a type: no name, id or placeholder.
pub fn typed(input_type: &str) -> FieldDescriptor {
    FieldDescriptor {
        r#type: Some(input_type.to_string()),
        ..Default::default()
    }
}

pub fn named(name: &str) -> FieldDescriptor {
    FieldDescriptor {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

pub fn required(mut field: FieldDescriptor) -> FieldDescriptor {
    field.required = true;
    field
}

pub fn labeled(name: &str, input_type: &str, label: &str) -> FieldDescriptor {
    FieldDescriptor {
        label: Some(label.to_string()),
        ..field(name, input_type)
    }
}

/// Submit button with visible text.
pub fn submit_button(text: &str) -> FieldDescriptor {
    FieldDescriptor {
        r#type: Some("submit".to_string()),
        label: Some(text.to_string()),
        ..Default::default()
    }
}

pub fn password() -> FieldDescriptor {
    field("password", "password")
}

pub fn confirm_password() -> FieldDescriptor {
    field("confirm_password", "password")
}

pub fn email() -> FieldDescriptor {
    field("email", "email")
}

pub fn registration_fields() -> Vec<FieldDescriptor> {
    vec![
        field("first_name", "text"),
        field("last_name", "text"),
        required(email()),
        password(),
        confirm_password(),
    ]
}

pub fn contact_fields() -> Vec<FieldDescriptor> {
    vec![
        named("first_name"),
        named("last_name"),
        named("email"),
        named("phone"),
        named("address"),
    ]
}

pub fn page_with_url(url: &str) -> PageMetadata {
    PageMetadata {
        url: Some(url.to_string()),
        ..Default::default()
    }
}

pub fn page_with_title(title: &str) -> PageMetadata {
    PageMetadata {
        title: Some(title.to_string()),
        ..Default::default()
    }
}

pub fn context(form_type: FormType, confidence: f32) -> FormContext {
    FormContext {
        form_type,
        purpose: form_type.generic_purpose().to_string(),
        confidence,
        detection_method: Some(DetectionMethod::Fields),
        reasoning: vec![],
    }
}
