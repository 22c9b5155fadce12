//! End-to-end extraction: input bytes → pages → lines → events.
//!
//! Each stage only consumes the previous stage's output. Decoding is the
//! only step that can fail; everything after it is best-effort.

use crate::bulletin::{BulletinParser, Template, TemplateError};
use crate::content::{ExtractError, SourceRouter};
use crate::event::CalendarEvent;
use crate::layout::{reconstruct_lines, LayoutOptions, Line};

/// A configured extraction pipeline.
///
/// Synchronous; async callers should run it inside
/// `tokio::task::spawn_blocking` (PDF decoding goes through FFI).
pub struct Pipeline {
    router: SourceRouter,
    layout: LayoutOptions,
    parser: BulletinParser,
}

impl Pipeline {
    pub fn new(template: &Template) -> Result<Self, TemplateError> {
        Ok(Self {
            router: SourceRouter::new(),
            layout: LayoutOptions {
                line_tolerance: template.line_tolerance,
            },
            parser: BulletinParser::new(template)?,
        })
    }

    pub fn parser(&self) -> &BulletinParser {
        &self.parser
    }

    /// Decode `bytes` and reconstruct their visual lines.
    ///
    /// `path_hint` is the input file name, used to pick a decoder.
    pub fn lines(&self, bytes: &[u8], path_hint: &str) -> Result<Vec<Line>, ExtractError> {
        let pages = self.router.decode(bytes, path_hint)?;
        let lines = reconstruct_lines(&pages, self.layout);
        tracing::debug!("Reconstructed {} lines from {} pages", lines.len(), pages.len());
        Ok(lines)
    }

    /// Decode, reconstruct and parse; overlaps between neighbours resolved.
    pub fn extract(
        &self,
        bytes: &[u8],
        path_hint: &str,
        year: i32,
    ) -> Result<Vec<CalendarEvent>, ExtractError> {
        let lines = self.lines(bytes, path_hint)?;
        Ok(self.parser.extract(&lines, year))
    }
}
