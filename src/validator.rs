use crate::content::ContentRequest;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use ::url::Url;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{1,4}[)]?[-\s.]?[(]?[0-9]{1,4}[)]?[-\s.]?[0-9]{1,9}$")
        .expect("valid phone pattern")
});

/// Why a form was rejected. The messages are the ones shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid URL")]
    Url,
    #[error("Please enter some text")]
    Text,
    #[error("Please enter a valid email address")]
    Email,
    #[error("Please enter a valid phone number")]
    Phone,
    #[error("Please enter a network name (SSID)")]
    Ssid,
}

/// Absolute, hierarchical URL (scheme plus authority).
pub fn url(value: &str) -> bool {
    Url::parse(value)
        .map(|parsed| !parsed.cannot_be_a_base())
        .unwrap_or(false)
}

/// Deliberately loose `local@domain.tld` check.
pub fn email(value: &str) -> bool {
    EMAIL.is_match(value)
}

pub fn phone(value: &str) -> bool {
    PHONE.is_match(value)
}

pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Checks the required field of each kind before it is encoded.
pub fn validate(request: &ContentRequest) -> Result<(), ValidationError> {
    let (valid, error) = match request {
        ContentRequest::Url(fields) => (url(&fields.url), ValidationError::Url),
        ContentRequest::Text(fields) => (not_empty(&fields.text), ValidationError::Text),
        ContentRequest::Email(fields) => (email(&fields.email), ValidationError::Email),
        ContentRequest::Phone(fields) => (phone(&fields.phone), ValidationError::Phone),
        ContentRequest::Sms(fields) => (phone(&fields.phone), ValidationError::Phone),
        ContentRequest::Wifi(fields) => (not_empty(&fields.ssid), ValidationError::Ssid),
    };

    if valid {
        Ok(())
    } else {
        Err(error)
    }
}
