use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModerationError {
    #[error("unknown content type: {value} (expected skill, message, profile or general)")]
    UnknownContentType { value: String },
}
