//! JSON text-run dumps.
//!
//! Accepts the raw output of an external decoder: one array per page,
//! each holding `{"content", "x", "y"}` records in arrival order.
//!
//! ```json
//! [
//!   [{"content": "Donnerstag 01.01.", "x": 40.0, "y": 720.0}],
//!   [{"content": "Hausen", "x": 40.0, "y": 700.0}, {"content": "9.00", "x": 95.0, "y": 701.5}]
//! ]
//! ```

use super::types::{Page, TextRun};
use super::{has_extension, ExtractError, TextRunSource};

/// Reads per-page text runs from a JSON dump.
pub struct RunsSource;

impl TextRunSource for RunsSource {
    fn name(&self) -> &'static str {
        "runs"
    }

    fn matches(&self, path_hint: &str, _bytes: &[u8]) -> bool {
        has_extension(path_hint, "json")
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Page>, ExtractError> {
        let pages: Vec<Vec<TextRun>> = serde_json::from_slice(bytes)?;
        Ok(pages
            .into_iter()
            .enumerate()
            .map(|(index, runs)| Page { index, runs })
            .collect())
    }
}
