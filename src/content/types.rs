//! Shared types for text-run sources.
//!
//! Contains the positioned run and page types produced by every decoder
//! and consumed by line reconstruction. Kept apart from the decoders so
//! `layout.rs` does not depend on any particular backend.

use serde::{Deserialize, Serialize};

/// A positioned fragment of decoded text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub content: String,
    /// Left edge in PDF points (1pt = 1/72 inch).
    pub x: f32,
    /// Baseline Y position (bottom-up coordinate system).
    pub y: f32,
}

impl TextRun {
    pub fn new(content: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            content: content.into(),
            x,
            y,
        }
    }
}

/// The text runs of one page, in whatever order the decoder produced them.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Page index (0-based).
    pub index: usize,
    pub runs: Vec<TextRun>,
}
