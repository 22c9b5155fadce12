//! Decoding input documents into positioned text runs.
//!
//! Routes input bytes to the appropriate source based on the file name
//! and leading magic bytes. Each source implements [`TextRunSource`]
//! to turn raw bytes into per-page [`TextRun`] lists for line reconstruction.
//!
//! # Supported Inputs
//!
//! | Input | Source | Feature Flag |
//! |-------|--------|-------------|
//! | `.pdf`, `%PDF` magic | [`PdfSource`](pdf::PdfSource) | `pdf` |
//! | `.json` run dumps | [`RunsSource`] | always |
//! | anything else (text) | [`PlainSource`] | always |
//!
//! # Example
//!
//! ```rust
//! use bulletin_cal::content::SourceRouter;
//!
//! let router = SourceRouter::new();
//! let pages = router.decode(b"Donnerstag 01.01.\nSteinfeld 18:00 Messfeier", "week.txt").unwrap();
//! assert_eq!(pages.len(), 1);
//! assert_eq!(pages[0].runs.len(), 2);
//! ```

#[cfg(feature = "pdf")]
pub mod pdf;
pub mod plain;
pub mod runs;
pub mod types;

use thiserror::Error;

pub use plain::PlainSource;
pub use runs::RunsSource;
pub use types::{Page, TextRun};

/// Failure to turn an input file into text runs.
///
/// This is the only error the extraction pipeline surfaces. Nothing built
/// from a partially decoded document is returned alongside it.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to decode {format} input: {message}")]
    Decode { format: String, message: String },

    #[error("unsupported input format: {format}")]
    Unsupported { format: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Converts input bytes into pages of positioned text runs.
///
/// Implementations are stateless and synchronous. Pages are decoded in
/// document order; a source never hands out page N+1 before page N.
pub trait TextRunSource: Send + Sync {
    /// Short name for diagnostics (e.g., `"pdf"`).
    fn name(&self) -> &'static str;

    /// Whether this source handles the input. `path_hint` is the file
    /// name the bytes came from and may be empty.
    fn matches(&self, path_hint: &str, bytes: &[u8]) -> bool;

    /// Decode the whole input into pages.
    fn decode(&self, bytes: &[u8]) -> Result<Vec<Page>, ExtractError>;
}

/// Routes input bytes to the first matching [`TextRunSource`].
///
/// Sources are checked in registration order. [`PlainSource`] is the
/// fallback for anything that is not a PDF.
pub struct SourceRouter {
    sources: Vec<Box<dyn TextRunSource>>,
}

impl SourceRouter {
    /// Create a router with all available sources.
    ///
    /// The PDF source is included only when the `pdf` feature flag is enabled.
    pub fn new() -> Self {
        #[cfg(feature = "pdf")]
        let sources: Vec<Box<dyn TextRunSource>> = vec![
            Box::new(pdf::PdfSource::new()),
            Box::new(RunsSource),
            Box::new(PlainSource),
        ];

        #[cfg(not(feature = "pdf"))]
        let sources: Vec<Box<dyn TextRunSource>> = vec![Box::new(RunsSource), Box::new(PlainSource)];

        Self { sources }
    }

    /// Decode `bytes` with the first source that claims them.
    ///
    /// [`PlainSource`] declines PDF input, so a PDF without the `pdf`
    /// feature ends up here unclaimed and is rejected.
    pub fn decode(&self, bytes: &[u8], path_hint: &str) -> Result<Vec<Page>, ExtractError> {
        for source in &self.sources {
            if source.matches(path_hint, bytes) {
                tracing::debug!("Decoding {path_hint:?} with {} source", source.name());
                return source.decode(bytes);
            }
        }

        let format = if looks_like_pdf(path_hint, bytes) {
            "pdf (rebuild with `--features pdf`)".to_string()
        } else {
            format!("{path_hint:?}")
        };
        Err(ExtractError::Unsupported { format })
    }
}

impl Default for SourceRouter {
    fn default() -> Self {
        Self::new()
    }
}

/// `%PDF` magic or a `.pdf` file name.
pub(crate) fn looks_like_pdf(path_hint: &str, bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF") || has_extension(path_hint, "pdf")
}

pub(crate) fn has_extension(path_hint: &str, ext: &str) -> bool {
    std::path::Path::new(path_hint)
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
