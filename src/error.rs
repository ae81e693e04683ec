use crate::batch::BatchError;
use crate::history::StoreError;
use crate::qr_generator::RenderError;
use crate::settings::SettingsError;
use crate::validator::ValidationError;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no history entry with id {0}")]
    UnknownEntry(String),
    /// A value from the page could not be read into the expected shape.
    #[error("malformed input: {0}")]
    Input(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
