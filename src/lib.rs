use wasm_bindgen::prelude::*;

pub mod batch;
mod console_log;
pub mod content;
pub mod download;
pub mod error;
pub mod history;
pub mod qr_generator;
pub mod settings;
pub mod studio;
pub mod validator;

pub use content::{generate_content, ContentKind, ContentRequest};
pub use error::{Error, Result};
pub use history::{HistoryEntry, HistoryLog};
pub use settings::{ErrorLevel, RenderSettings};
pub use studio::Studio;

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn main_js() -> std::result::Result<(), JsValue> {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    if let Err(err) = console_log::init(level) {
        web_sys::console::warn_2(
            &JsValue::from_str("logger already set:"),
            &JsValue::from_str(&err.to_string()),
        );
    }

    log::info!("QReator initialized");
    Ok(())
}

/// Shortens `value` to `max_chars` characters, marking the cut with `...`.
pub(crate) fn truncate(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("exactly10!+", 10), "exactly10!...");
        assert_eq!(truncate("äöüäöü", 3), "äöü...");
    }
}
