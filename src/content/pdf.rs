//! PDF text-run source.
//!
//! Uses `pdfium-render` (Chromium's PDF library) to pull positioned text
//! segments out of each page. Segments map one-to-one onto [`TextRun`]s;
//! grouping them into visual lines is left to [`crate::layout`].
//!
//! # Pipeline
//!
//! ```text
//! PDF bytes → pdfium segment extraction (page by page) → Vec<Page>
//! ```

use pdfium_render::prelude::*;

use super::types::{Page, TextRun};
use super::{looks_like_pdf, ExtractError, TextRunSource};

/// Decodes PDF bytes through a pdfium binding.
pub struct PdfSource;

impl PdfSource {
    pub fn new() -> Self {
        Self
    }

    /// Bind to a pdfium library next to the executable, then the system one.
    fn bind() -> Result<Pdfium, ExtractError> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| decode_error(format!("pdfium library not available: {e}")))?;
        Ok(Pdfium::new(bindings))
    }

    /// Extract one run per text segment, page by page.
    #[allow(deprecated)] // PdfRect field access deprecated in 0.8.28, removed in 0.9.0
    fn extract_pages(pdfium: &Pdfium, bytes: &[u8]) -> Result<Vec<Page>, ExtractError> {
        let doc = pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| decode_error(format!("failed to parse PDF: {e}")))?;

        let mut pages = Vec::new();
        for (index, page) in doc.pages().iter().enumerate() {
            let text = page
                .text()
                .map_err(|e| decode_error(format!("failed to extract text from page {}: {e}", index + 1)))?;

            let runs: Vec<TextRun> = text
                .segments()
                .iter()
                .map(|segment| {
                    let rect = segment.bounds();
                    TextRun::new(segment.text(), rect.left.value, rect.bottom.value)
                })
                .collect();

            tracing::debug!("Page {}: {} text runs", index + 1, runs.len());
            pages.push(Page { index, runs });
        }

        Ok(pages)
    }
}

impl Default for PdfSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRunSource for PdfSource {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn matches(&self, path_hint: &str, bytes: &[u8]) -> bool {
        looks_like_pdf(path_hint, bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Page>, ExtractError> {
        let pdfium = Self::bind()?;
        let pages = Self::extract_pages(&pdfium, bytes)?;

        // Scanned PDFs (images without text layer) have nothing to parse.
        if !pages.is_empty() && pages.iter().all(|p| p.runs.is_empty()) {
            return Err(decode_error(format!(
                "no text layer in {} pages (scanned PDF?)",
                pages.len()
            )));
        }

        Ok(pages)
    }
}

fn decode_error(message: String) -> ExtractError {
    ExtractError::Decode {
        format: "pdf".to_string(),
        message,
    }
}
