//! HTML-to-text pre-pass for documents loaded from `.html` files.
//!
//! Conversion never fails the pipeline: markup the converter cannot make
//! sense of is passed through, and a converter error falls back to the raw
//! input.

use tracing::warn;

/// Rendering width handed to the converter. Wide enough that it never
/// introduces line breaks of its own; wrapping is a display concern.
const RENDER_WIDTH: usize = 10_000;

/// Converts HTML markup into plain text with markdown-like structure.
pub fn html_to_text(html: &str) -> String {
    match html2text::from_read(html.as_bytes(), RENDER_WIDTH) {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, input_len = html.len(), "html_conversion_failed");
            html.to_string()
        }
    }
}
