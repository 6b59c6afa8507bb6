use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::errors::DomainError;

/// Accepts payloads with or without trailing `=` padding
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

static DATA_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)^data:(?P<mime>[A-Za-z0-9.+-]+/[A-Za-z0-9.+-]+)(?:;[A-Za-z0-9.+-]+=[A-Za-z0-9.+-]+)*;base64,(?P<data>.*)$",
    )
    .expect("data URI pattern is valid")
});

/// Decoded image upload parsed from a `data:<mime>;base64,<data>` string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    content_type: String,
    extension: String,
    bytes: Vec<u8>,
}

impl ImagePayload {
    /// Parse and decode a data URI.
    ///
    /// The MIME declaration is required and must name an `image/*` type; the
    /// file extension is derived from its subtype.
    pub fn from_data_uri(input: &str) -> Result<Self, DomainError> {
        let captures = DATA_URI
            .captures(input.trim())
            .ok_or(DomainError::InvalidEncoding)?;

        let content_type = captures["mime"].to_ascii_lowercase();
        let data: String = captures["data"]
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        if data.is_empty() {
            return Err(DomainError::InvalidEncoding);
        }

        let bytes = LENIENT_BASE64
            .decode(data.as_bytes())
            .map_err(|_| DomainError::InvalidEncoding)?;

        let subtype = content_type
            .strip_prefix("image/")
            .ok_or_else(|| DomainError::UnsupportedMediaType(content_type.clone()))?;

        let extension = match subtype {
            "jpeg" => "jpg".to_string(),
            "svg+xml" => "svg".to_string(),
            other => other.to_string(),
        };

        Ok(Self {
            content_type,
            extension,
            bytes,
        })
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
