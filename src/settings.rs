//! Cosmetic options applied when a payload is drawn.

use qrcodegen::QrCodeEcc;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

pub const DEFAULT_SIZE: u32 = 256;
pub const SIZE_RANGE: RangeInclusive<u32> = 64..=2048;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("size must be between 64 and 2048 pixels, got {0}")]
    Size(u32),
    #[error("invalid color {0:?}, expected #rrggbb")]
    Color(String),
    #[error("logo must be a data:image/ URL")]
    Logo,
}

/// QR redundancy level, named the way the page's `<select>` names them.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum ErrorLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

impl From<ErrorLevel> for QrCodeEcc {
    fn from(level: ErrorLevel) -> Self {
        match level {
            ErrorLevel::L => QrCodeEcc::Low,
            ErrorLevel::M => QrCodeEcc::Medium,
            ErrorLevel::Q => QrCodeEcc::Quartile,
            ErrorLevel::H => QrCodeEcc::High,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderSettings {
    /// Edge length of the rendered image in pixels.
    pub size: u32,
    pub fg_color: String,
    pub bg_color: String,
    pub error_level: ErrorLevel,
    /// `data:image/...` URL drawn in the middle of the symbol.
    pub logo: Option<String>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            fg_color: "#000000".to_owned(),
            bg_color: "#ffffff".to_owned(),
            error_level: ErrorLevel::default(),
            logo: None,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !SIZE_RANGE.contains(&self.size) {
            return Err(SettingsError::Size(self.size));
        }
        for color in [&self.fg_color, &self.bg_color] {
            if !is_hex_color(color) {
                return Err(SettingsError::Color(color.clone()));
            }
        }
        if let Some(logo) = &self.logo {
            if !logo.starts_with("data:image/") {
                return Err(SettingsError::Logo);
            }
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .map(|hex| hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
        .unwrap_or(false)
}
