pub mod assist;
pub mod cli;
pub mod engine;
pub mod form;

pub use engine::engine::{EngineConfig, FormEngine, RemoteConfig};
pub use engine::error::EngineError;
pub use engine::request::{AskRequest, AskResponse, ClassifyRequest, ClassifyResponse};
pub use form::form_model::{
    FieldDescriptor, FieldPurpose, FormContext, FormType, PageMetadata, PasswordFieldContext,
    QualityAssessment,
};
