use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Payload is not a `data:<mime>;base64,<data>` string with valid base64
    #[error("Invalid base64")]
    InvalidEncoding,

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Invalid media ID: {0}")]
    InvalidMediaId(String),
}
