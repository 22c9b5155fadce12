//! Bulletin line parsing.
//!
//! Turns reconstructed lines of a parish service bulletin into calendar
//! events. The grammar is deliberately permissive: lines it cannot place
//! are absorbed as description text or dropped, never rejected.
//!
//! # Architecture
//!
//! - [`Template`]: the document vocabulary (places, weekdays, keywords)
//! - [`Grammar`]: a compiled template
//! - `machine`: the `Seeking → InDay → InEvent` state machine
//! - [`resolve_overlaps`]: post-pass clamping overlapping neighbours
//! - [`NoiseFilter`]: pluggable "is this layout furniture" predicate
//!
//! # Example
//!
//! ```rust
//! use bulletin_cal::bulletin::{BulletinParser, Template};
//!
//! let parser = BulletinParser::new(&Template::default()).unwrap();
//! let events = parser.extract(&["Donnerstag 01.01.", "Steinfeld 18:00 Messfeier"], 2024);
//! assert_eq!(events[0].summary, "Messfeier (Steinfeld)");
//! ```

mod machine;
pub mod noise;
pub mod overlap;
pub mod template;
pub mod text;

use tracing::info;

use crate::event::CalendarEvent;
use machine::ParseContext;

pub use noise::{HeuristicNoise, NoiseFilter};
pub use overlap::resolve_overlaps;
pub use template::{DateHeader, EventStart, Grammar, Template, TemplateError};

/// Extracts events from bulletin lines.
///
/// Holds only the compiled grammar; every call gets its own parse
/// context, so one parser can serve many documents.
#[derive(Debug)]
pub struct BulletinParser {
    grammar: Grammar,
}

impl BulletinParser {
    /// Compile `template` into a parser.
    pub fn new(template: &Template) -> Result<Self, TemplateError> {
        Ok(Self {
            grammar: template.compile()?,
        })
    }

    /// Replace the default page-header/divider/page-number heuristics.
    #[must_use]
    pub fn with_noise_filter(mut self, filter: impl NoiseFilter + 'static) -> Self {
        self.grammar.set_noise_filter(Box::new(filter));
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Run the state machine over `lines`, dates falling in `year`.
    ///
    /// Events come back in document order, overlaps untouched.
    pub fn parse<S: AsRef<str>>(&self, lines: &[S], year: i32) -> Vec<CalendarEvent> {
        let mut ctx = ParseContext::new(&self.grammar, year);
        for line in lines {
            ctx.feed(line.as_ref());
        }
        ctx.finish()
    }

    /// [`parse`](Self::parse) followed by [`resolve_overlaps`].
    pub fn extract<S: AsRef<str>>(&self, lines: &[S], year: i32) -> Vec<CalendarEvent> {
        let mut events = self.parse(lines, year);
        resolve_overlaps(&mut events);
        info!("Total events found: {}", events.len());
        events
    }
}
