//! The calendar event record handed to exporters and editors.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One extracted calendar event.
///
/// Only `start`/`end` matter for export; every other field may be empty.
/// Events missing either timestamp cannot be exported and are skipped by
/// [`crate::ics`], not repaired.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub summary: String,
    pub location: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub is_all_day: bool,
    pub description: String,
}

impl CalendarEvent {
    /// Both timestamps are present.
    pub fn is_exportable(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}
