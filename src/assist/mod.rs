pub mod inference;
pub mod knowledge;
pub mod question;
pub mod response;
