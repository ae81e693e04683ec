//! Payload builders for each content kind.
//!
//! Every builder is total: it formats whatever it is given. Callers are
//! expected to run [`crate::validator::validate`] first.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Bytes left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const WIFI_NO_PASSWORD: &str = "nopass";

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Url,
    Text,
    Email,
    Phone,
    Sms,
    Wifi,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Text => "text",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Sms => "sms",
            Self::Wifi => "wifi",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct UrlFields {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct TextFields {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct EmailFields {
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct PhoneFields {
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct SmsFields {
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct WifiFields {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ssid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
    /// `WPA`, `WEP`, ... An empty value means an open network.
    #[serde(default, deserialize_with = "null_as_default")]
    pub security: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hidden: bool,
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One filled-in form, tagged by its kind.
///
/// Serialized as `{"kind": "email", "email": "...", "subject": "..."}` so the
/// page script can hand over its form objects unchanged.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentRequest {
    Url(UrlFields),
    Text(TextFields),
    Email(EmailFields),
    Phone(PhoneFields),
    Sms(SmsFields),
    Wifi(WifiFields),
}

impl ContentRequest {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Url(_) => ContentKind::Url,
            Self::Text(_) => ContentKind::Text,
            Self::Email(_) => ContentKind::Email,
            Self::Phone(_) => ContentKind::Phone,
            Self::Sms(_) => ContentKind::Sms,
            Self::Wifi(_) => ContentKind::Wifi,
        }
    }
}

/// Builds the string that gets encoded into the QR symbol.
pub fn generate_content(request: &ContentRequest) -> String {
    match request {
        ContentRequest::Url(fields) => url(fields),
        ContentRequest::Text(fields) => text(fields),
        ContentRequest::Email(fields) => email(fields),
        ContentRequest::Phone(fields) => phone(fields),
        ContentRequest::Sms(fields) => sms(fields),
        ContentRequest::Wifi(fields) => wifi(fields),
    }
}

pub fn url(fields: &UrlFields) -> String {
    fields.url.clone()
}

pub fn text(fields: &TextFields) -> String {
    fields.text.clone()
}

pub fn email(fields: &EmailFields) -> String {
    let mut content = format!("mailto:{}", fields.email);

    let mut params = Vec::with_capacity(2);
    if !fields.subject.is_empty() {
        params.push(format!("subject={}", encode_component(&fields.subject)));
    }
    if !fields.body.is_empty() {
        params.push(format!("body={}", encode_component(&fields.body)));
    }
    if !params.is_empty() {
        content.push('?');
        content.push_str(&params.join("&"));
    }

    content
}

pub fn phone(fields: &PhoneFields) -> String {
    format!("tel:{}", fields.phone)
}

pub fn sms(fields: &SmsFields) -> String {
    let mut content = format!("sms:{}", fields.phone);
    if !fields.message.is_empty() {
        content.push_str("?body=");
        content.push_str(&encode_component(&fields.message));
    }
    content
}

pub fn wifi(fields: &WifiFields) -> String {
    let security = if fields.security.is_empty() {
        WIFI_NO_PASSWORD
    } else {
        fields.security.as_str()
    };

    let mut content = format!("WIFI:S:{};T:{};", escape_wifi(&fields.ssid), security);
    if !fields.password.is_empty() {
        content.push_str(&format!("P:{};", escape_wifi(&fields.password)));
    }
    if fields.hidden {
        content.push_str("H:true;");
    }
    content.push(';');
    content
}

/// Same output as JavaScript's `encodeURIComponent`.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Backslash-escapes the characters the `WIFI:` record reserves.
fn escape_wifi(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ';' | ',' | ':' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
