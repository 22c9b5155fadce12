//! Line reconstruction from positioned text runs.
//!
//! PDF decoders hand out text in drawing order, which rarely matches
//! reading order. This module regroups the runs of each page into visual
//! rows:
//!
//! 1. Sort runs by Y descending (top-to-bottom).
//! 2. Walk the sorted runs, keeping every run whose Y lies within
//!    `line_tolerance` of the row anchor in the current row.
//! 3. Order each row by X ascending and join the contents with single spaces.
//!
//! Pages are concatenated in page order.

use std::cmp::Ordering;

use crate::content::{Page, TextRun};

/// Default vertical clustering tolerance, tuned to bulletin line pitch.
pub const DEFAULT_LINE_TOLERANCE: f32 = 5.0;

/// A reconstructed visual row of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    /// Y of the run that anchored this row.
    pub y: f32,
    /// Page index (0-based).
    pub page: usize,
}

impl AsRef<str> for Line {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Tuning knobs for [`reconstruct_lines`].
#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    /// Runs whose Y differs from the row anchor by less than this share a row.
    pub line_tolerance: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            line_tolerance: DEFAULT_LINE_TOLERANCE,
        }
    }
}

/// Reconstruct the lines of every page, pages in order.
pub fn reconstruct_lines(pages: &[Page], options: LayoutOptions) -> Vec<Line> {
    let mut ordered: Vec<&Page> = pages.iter().collect();
    ordered.sort_by_key(|p| p.index);

    ordered
        .into_iter()
        .flat_map(|page| reconstruct_page(page, options))
        .collect()
}

/// Reconstruct the lines of a single page, top to bottom.
///
/// An empty page yields no lines.
pub fn reconstruct_page(page: &Page, options: LayoutOptions) -> Vec<Line> {
    let mut sorted: Vec<&TextRun> = page
        .runs
        .iter()
        .filter(|run| !run.content.trim().is_empty())
        .collect();
    if sorted.is_empty() {
        return Vec::new();
    }

    // Stable sort keeps decoder order for runs on exactly the same baseline.
    sorted.sort_by(|a, b| b.y.partial_cmp(&a.y).unwrap_or(Ordering::Equal));

    let mut lines = Vec::new();
    let mut anchor = sorted[0].y;
    let mut row: Vec<&TextRun> = Vec::new();

    for run in sorted {
        if (run.y - anchor).abs() >= options.line_tolerance {
            push_row(&mut lines, &mut row, anchor, page.index);
            anchor = run.y;
        }
        row.push(run);
    }
    push_row(&mut lines, &mut row, anchor, page.index);

    lines
}

/// Flush `row` as a line (left to right), dropping it if it has no text.
fn push_row(lines: &mut Vec<Line>, row: &mut Vec<&TextRun>, y: f32, page: usize) {
    row.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));

    let text = row
        .iter()
        .map(|run| run.content.trim())
        .collect::<Vec<_>>()
        .join(" ");
    row.clear();

    if !text.is_empty() {
        lines.push(Line { text, y, page });
    }
}
