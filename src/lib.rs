//! `bulletin-cal` - Parish service bulletins to calendar events
//!
//! # Features
//!
//! - **Line reconstruction**: regroups scattered PDF text runs into visual rows
//! - **Bulletin grammar**: date headers, event lines, continuations, footnotes
//! - **Overlap resolution**: clamps neighbouring events that overlap
//! - **Export**: iCalendar (`.ics`) and JSON
//!
//! # Example
//!
//! ```rust
//! use bulletin_cal::{Pipeline, Template};
//!
//! let pipeline = Pipeline::new(&Template::default()).unwrap();
//! let bulletin = "Donnerstag 01.01.\nSteinfeld 18:00 Messfeier\nf. verstorbene Eltern\n";
//! let events = pipeline.extract(bulletin.as_bytes(), "week.txt", 2024).unwrap();
//!
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].summary, "Messfeier (Steinfeld)");
//! ```

pub mod bulletin;
pub mod config;
pub mod content;
pub mod event;
pub mod ics;
pub mod layout;
pub mod pipeline;

pub use bulletin::{resolve_overlaps, BulletinParser, NoiseFilter, Template, TemplateError};
pub use content::{ExtractError, Page, SourceRouter, TextRun, TextRunSource};
pub use event::CalendarEvent;
pub use ics::to_ics;
pub use layout::{reconstruct_lines, LayoutOptions, Line};
pub use pipeline::Pipeline;

/// Version of bulletin-cal
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
