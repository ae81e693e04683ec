use crate::settings::{RenderSettings, SettingsError};
use qrcodegen::QrCode;
use std::fmt::Write;
use thiserror::Error;

/// Light modules around the symbol, in modules.
const BORDER: i32 = 4;
/// Logo edge relative to the symbol edge.
const LOGO_SCALE: f64 = 0.2;
/// White margin around the logo relative to the symbol edge (5px at 256px).
const LOGO_PADDING: f64 = 5.0 / 256.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("content too long to fit in a QR code ({0} bytes)")]
    DataTooLong(usize),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Encodes `content` and draws it as an SVG document sized and colored per `settings`.
pub fn render_svg(content: &str, settings: &RenderSettings) -> Result<String, RenderError> {
    settings.validate()?;

    let qr = QrCode::encode_text(content, settings.error_level.into())
        .map_err(|_| RenderError::DataTooLong(content.len()))?;

    Ok(to_svg_string(&qr, settings))
}

fn to_svg_string(qr: &QrCode, settings: &RenderSettings) -> String {
    let dimension = qr.size() + BORDER * 2;

    let mut svg = String::new();
    svg += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
         version=\"1.1\" width=\"{size}\" height=\"{size}\" \
         viewBox=\"0 0 {dim} {dim}\" stroke=\"none\" shape-rendering=\"crispEdges\">",
        size = settings.size,
        dim = dimension,
    );
    let _ = writeln!(
        svg,
        "\t<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        settings.bg_color
    );

    svg += "\t<path d=\"";
    let mut first = true;
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            if qr.get_module(x, y) {
                if !first {
                    svg.push(' ');
                }
                first = false;
                let _ = write!(svg, "M{},{}h1v1h-1z", x + BORDER, y + BORDER);
            }
        }
    }
    let _ = writeln!(svg, "\" fill=\"{}\"/>", settings.fg_color);

    if let Some(logo) = &settings.logo {
        let symbol = f64::from(qr.size());
        let logo_size = symbol * LOGO_SCALE;
        let padding = symbol * LOGO_PADDING;
        let origin = (f64::from(dimension) - logo_size) / 2.0;

        let _ = writeln!(
            svg,
            "\t<rect x=\"{:.3}\" y=\"{:.3}\" width=\"{:.3}\" height=\"{:.3}\" fill=\"#ffffff\"/>",
            origin - padding,
            origin - padding,
            logo_size + padding * 2.0,
            logo_size + padding * 2.0,
        );
        let _ = writeln!(
            svg,
            "\t<image xlink:href=\"{}\" x=\"{:.3}\" y=\"{:.3}\" width=\"{:.3}\" height=\"{:.3}\" \
             preserveAspectRatio=\"none\"/>",
            escape_attribute(logo),
            origin,
            origin,
            logo_size,
            logo_size,
        );
    }

    svg += "</svg>\n";
    svg
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
