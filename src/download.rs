use js_sys::{Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

pub const SVG_MIME: &str = "image/svg+xml";
pub const ZIP_MIME: &str = "application/zip";

/// Hands `data` to the browser as a file download named `filename`.
pub fn save(data: &[u8], mime: &str, filename: &str) -> Result<(), JsValue> {
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(
        &Array::of1(&Uint8Array::from(data)),
        &options,
    )?;

    let blob_url = Url::create_object_url_with_blob(&blob)?;

    let a: HtmlAnchorElement = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?
        .create_element("A")?
        .unchecked_into();
    a.set_href(&blob_url);
    a.set_download(filename);
    a.click();

    Url::revoke_object_url(&blob_url)
}

/// `qrcode-<timestamp>.<extension>`, the naming the page has always used.
pub fn timestamped_name(millis: u64, extension: &str) -> String {
    format!("qrcode-{}.{}", millis, extension)
}
