//! What the page script talks to.
//!
//! `Studio` owns the render settings and the history log for one page. The
//! `#[wasm_bindgen]` methods only translate between `JsValue` and the typed
//! methods in the plain `impl` block, which is what the tests exercise.

use crate::batch::{self, BatchItem};
use crate::content::{generate_content, ContentRequest};
use crate::download;
use crate::error::{Error, Result};
use crate::history::{Clock, HistoryEntry, HistoryLog, MemoryStore, SystemClock};
use crate::qr_generator::render_svg;
use crate::settings::RenderSettings;
use crate::validator::validate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Result of a successful generation.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub entry_id: String,
    pub content: String,
    pub svg: String,
}

#[wasm_bindgen]
pub struct Studio {
    settings: RenderSettings,
    history: HistoryLog<MemoryStore, SystemClock>,
}

impl Default for Studio {
    fn default() -> Self {
        Self::with_settings(RenderSettings::default())
    }
}

impl Studio {
    pub fn with_settings(settings: RenderSettings) -> Self {
        Self {
            settings,
            history: HistoryLog::new(MemoryStore::default(), SystemClock),
        }
    }

    pub fn render_settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn update_settings(&mut self, settings: RenderSettings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Validates and encodes without drawing or recording anything.
    pub fn encode_request(&self, request: &ContentRequest) -> Result<String> {
        validate(request)?;
        Ok(generate_content(request))
    }

    /// Validate, encode, draw, and record in history.
    pub fn generate_request(&mut self, request: ContentRequest) -> Result<Generation> {
        let content = self.encode_request(&request)?;
        let svg = render_svg(&content, &self.settings)?;
        let entry = self.history.add(request, content.clone())?;
        log::info!("generated {} code", entry.kind);

        Ok(Generation {
            entry_id: entry.id.clone(),
            content,
            svg,
        })
    }

    pub fn history_entries(&self) -> &[HistoryEntry] {
        self.history.all()
    }

    pub fn history_entry(&self, id: &str) -> Option<&HistoryEntry> {
        self.history.get(id)
    }

    /// Generates again from a stored entry's form fields with the current settings.
    pub fn regenerate_entry(&mut self, id: &str) -> Result<Generation> {
        let request = self
            .history
            .get(id)
            .map(|entry| entry.request.clone())
            .ok_or_else(|| Error::UnknownEntry(id.to_owned()))?;
        self.generate_request(request)
    }

    pub fn remove_entry(&mut self, id: &str) -> Result<()> {
        Ok(self.history.remove(id)?)
    }

    pub fn clear_entries(&mut self) -> Result<()> {
        Ok(self.history.clear()?)
    }

    pub fn batch_items(&self, input: &str) -> Result<Vec<BatchItem>> {
        Ok(batch::generate_batch(input, &self.settings)?)
    }

    pub fn batch_archive(&self, input: &str) -> Result<Vec<u8>> {
        let items = self.batch_items(input)?;
        Ok(batch::to_zip(&items)?)
    }
}

#[wasm_bindgen]
impl Studio {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Studio {
        Self::default()
    }

    #[wasm_bindgen(js_name = setSettings)]
    pub fn set_settings(&mut self, settings: JsValue) -> Result<(), JsValue> {
        let settings: RenderSettings = from_js(&settings)?;
        Ok(self.update_settings(settings)?)
    }

    pub fn settings(&self) -> Result<JsValue, JsValue> {
        Ok(to_js(&self.settings)?)
    }

    pub fn validate(&self, request: JsValue) -> Result<(), JsValue> {
        let request: ContentRequest = from_js(&request)?;
        validate(&request).map_err(Error::from)?;
        Ok(())
    }

    pub fn encode(&self, request: JsValue) -> Result<String, JsValue> {
        let request: ContentRequest = from_js(&request)?;
        Ok(self.encode_request(&request)?)
    }

    pub fn generate(&mut self, request: JsValue) -> Result<JsValue, JsValue> {
        let request: ContentRequest = from_js(&request)?;
        let generation = self.generate_request(request)?;
        Ok(to_js(&generation)?)
    }

    pub fn history(&self) -> Result<JsValue, JsValue> {
        Ok(to_js(&self.history_entries())?)
    }

    #[wasm_bindgen(js_name = historyEntry)]
    pub fn history_entry_js(&self, id: &str) -> Result<JsValue, JsValue> {
        match self.history_entry(id) {
            Some(entry) => Ok(to_js(entry)?),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn regenerate(&mut self, id: &str) -> Result<JsValue, JsValue> {
        let generation = self.regenerate_entry(id)?;
        Ok(to_js(&generation)?)
    }

    #[wasm_bindgen(js_name = removeHistory)]
    pub fn remove_history(&mut self, id: &str) -> Result<(), JsValue> {
        Ok(self.remove_entry(id)?)
    }

    #[wasm_bindgen(js_name = clearHistory)]
    pub fn clear_history(&mut self) -> Result<(), JsValue> {
        Ok(self.clear_entries()?)
    }

    pub fn batch(&self, input: &str) -> Result<JsValue, JsValue> {
        let items = self.batch_items(input)?;
        Ok(to_js(&items)?)
    }

    #[wasm_bindgen(js_name = downloadSvg)]
    pub fn download_svg(&self, svg: &str) -> Result<(), JsValue> {
        let filename = download::timestamped_name(SystemClock.now_millis(), "svg");
        download::save(svg.as_bytes(), download::SVG_MIME, &filename)
    }

    #[wasm_bindgen(js_name = downloadBatch)]
    pub fn download_batch(&self, input: &str) -> Result<(), JsValue> {
        let archive = self.batch_archive(input)?;
        let filename = download::timestamped_name(SystemClock.now_millis(), "zip");
        download::save(&archive, download::ZIP_MIME, &filename)
    }
}

#[allow(deprecated)]
fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T> {
    value
        .into_serde()
        .map_err(|err| Error::Input(err.to_string()))
}

#[allow(deprecated)]
fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
    JsValue::from_serde(value).map_err(|err| Error::Input(err.to_string()))
}
