pub mod classifier;
pub mod form_model;
pub mod insights;
pub mod keywords;
pub mod password;
pub mod purpose;
pub mod quality;
