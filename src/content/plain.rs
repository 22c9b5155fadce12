//! Plain text source.
//!
//! Handles text that has already been flattened into lines (copy-pasted
//! bulletins, `pdftotext` output). Every line becomes one run on its own
//! row so line reconstruction hands the lines back unchanged. Form feeds
//! (`\x0C`) separate pages.

use super::types::{Page, TextRun};
use super::{looks_like_pdf, ExtractError, TextRunSource};

/// Vertical distance between synthesized rows, well above any sane
/// clustering tolerance.
const ROW_PITCH: f32 = 100.0;

/// Treats each text line as a separate row.
///
/// Used for `.txt` input and as the fallback for anything that is not a PDF.
pub struct PlainSource;

impl TextRunSource for PlainSource {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn matches(&self, path_hint: &str, bytes: &[u8]) -> bool {
        !looks_like_pdf(path_hint, bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Page>, ExtractError> {
        let text = String::from_utf8_lossy(bytes);

        let pages = text
            .split('\x0C')
            .enumerate()
            .map(|(index, page_text)| {
                let rows: Vec<&str> = page_text
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .collect();
                let top = rows.len() as f32 * ROW_PITCH;
                let runs = rows
                    .iter()
                    .enumerate()
                    .map(|(i, row)| TextRun::new(*row, 0.0, top - i as f32 * ROW_PITCH))
                    .collect();
                Page { index, runs }
            })
            .collect();

        Ok(pages)
    }
}
