//! One code per input line, optionally packed into a ZIP archive.

use crate::qr_generator::{render_svg, RenderError};
use crate::settings::RenderSettings;
use serde::Serialize;
use std::io::{Cursor, Write};
use thiserror::Error;
use zip::write::FileOptions;
use zip::CompressionMethod;

/// Batch codes are drawn at a fixed size regardless of the main preview size.
pub const BATCH_SIZE: u32 = 200;
const LABEL_CHARS: usize = 40;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Please enter at least one URL or text")]
    Empty,
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed writing archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("failed writing archive: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct BatchItem {
    pub line: String,
    pub label: String,
    pub svg: String,
}

/// Renders every non-blank line of `input`.
///
/// Lines that cannot be encoded are logged and left out; the settings
/// themselves must be valid.
pub fn generate_batch(
    input: &str,
    settings: &RenderSettings,
) -> Result<Vec<BatchItem>, BatchError> {
    let lines: Vec<&str> = input
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.is_empty() {
        return Err(BatchError::Empty);
    }

    // fixed size and no logo overlay; colors and level follow the caller
    let settings = RenderSettings {
        size: BATCH_SIZE,
        logo: None,
        ..settings.clone()
    };
    settings.validate().map_err(RenderError::from)?;

    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        match render_svg(line, &settings) {
            Ok(svg) => items.push(BatchItem {
                line: line.to_owned(),
                label: crate::truncate(line, LABEL_CHARS),
                svg,
            }),
            Err(err) => log::warn!("batch: skipping line {:?}: {}", line, err),
        }
    }
    log::debug!("batch: rendered {} codes", items.len());

    Ok(items)
}

/// Packs the rendered codes as `qrcode-1.svg`, `qrcode-2.svg`, ...
pub fn to_zip(items: &[BatchItem]) -> Result<Vec<u8>, BatchError> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);

    for (index, item) in items.iter().enumerate() {
        zip.start_file(format!("qrcode-{}.svg", index + 1), options)?;
        zip.write_all(item.svg.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Read;

    #[test]
    fn blank_lines_are_skipped() {
        let items = generate_batch(
            "https://example.com\n\n   \nhello world\n",
            &RenderSettings::default(),
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].line, "https://example.com");
        assert_eq!(items[1].line, "hello world");
        assert!(items[0].svg.contains("width=\"200\" height=\"200\""));
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = generate_batch(" \n\t\n", &RenderSettings::default()).unwrap_err();
        assert!(matches!(err, BatchError::Empty));
        assert_eq!(err.to_string(), "Please enter at least one URL or text");
    }

    #[test]
    fn batch_codes_skip_the_logo() {
        let settings = RenderSettings {
            fg_color: "#123456".to_owned(),
            logo: Some("data:image/png;base64,AAAA".to_owned()),
            ..Default::default()
        };
        let items = generate_batch("hello\nworld", &settings).unwrap();

        assert_eq!(items.len(), 2);
        for item in &items {
            assert!(!item.svg.contains("<image"));
            assert!(item.svg.contains("fill=\"#123456\"/>"));
        }
    }

    #[test]
    fn long_lines_get_short_labels() {
        let line = "a".repeat(60);
        let items = generate_batch(&line, &RenderSettings::default()).unwrap();
        assert_eq!(items[0].label, format!("{}...", "a".repeat(40)));
    }

    #[test]
    fn unencodable_lines_are_dropped() {
        let input = format!("ok\n{}", "b".repeat(3000));
        let items = generate_batch(&input, &RenderSettings::default()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].line, "ok");
    }

    #[test]
    fn zip_holds_one_svg_per_item() {
        let items = generate_batch("one\ntwo\nthree", &RenderSettings::default()).unwrap();
        let bytes = to_zip(&items).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 3);

        let mut second = String::new();
        archive
            .by_name("qrcode-2.svg")
            .unwrap()
            .read_to_string(&mut second)
            .unwrap();
        assert_eq!(second, items[1].svg);
    }
}
