//! Line-by-line event state machine.
//!
//! ```text
//!            date header            event start
//! Seeking ──────────────▶ InDay ──────────────▶ InEvent ◀─┐
//!                           ▲                     │  │     │ event start (finalize)
//!                           └─────────────────────┘  └─────┘
//!                       date header (finalize)      continuation (absorb)
//! ```
//!
//! Rules are tried in order for every line, first match wins: date
//! header, event start (only with a current date), continuation (only
//! with an open event). Anything else is dropped. Nothing here fails;
//! a document without date headers simply produces no events.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, trace};

use super::template::{DateHeader, EventStart, Grammar};
use super::text::{is_cancelled, with_location};
use crate::event::CalendarEvent;

/// An event that continuation lines may still amend.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EventDraft {
    title: String,
    /// `title` is still the template placeholder.
    placeholder: bool,
    location: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    is_all_day: bool,
    description: String,
}

impl EventDraft {
    /// Open a draft for an event-start line on `date`.
    fn open(date: NaiveDate, matched: &EventStart, grammar: &Grammar) -> Self {
        let cancelled = is_cancelled(&matched.text, &grammar.cancel_keywords);
        let cleaned = grammar.strip_footnote(&matched.text);

        let (title, placeholder) = if cleaned.is_empty() {
            (grammar.placeholder.clone(), true)
        } else {
            (cleaned.to_string(), false)
        };

        let (start, end) = if cancelled {
            let midnight = date.and_time(chrono::NaiveTime::MIN);
            (midnight, midnight + chrono::Duration::days(1))
        } else {
            let start = date.and_time(matched.time);
            (start, start + grammar.duration)
        };

        Self {
            title,
            placeholder,
            location: matched.location.clone(),
            start,
            end,
            is_all_day: cancelled,
            description: String::new(),
        }
    }

    /// Fold a cleaned continuation line into the draft.
    ///
    /// The first real text replaces a placeholder title; everything after
    /// that extends the description.
    fn absorb(&mut self, text: &str) {
        if self.placeholder {
            self.title = text.to_string();
            self.placeholder = false;
        } else if self.description.is_empty() {
            self.description = text.to_string();
        } else {
            self.description.push(' ');
            self.description.push_str(text);
        }
    }

    fn finalize(self) -> CalendarEvent {
        CalendarEvent {
            summary: with_location(&self.title, &self.location),
            location: self.location,
            start: Some(self.start),
            end: Some(self.end),
            is_all_day: self.is_all_day,
            description: self.description,
        }
    }
}

/// Parser position. Each state carries only what is valid in it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ParseState {
    /// No date header seen yet.
    Seeking,
    /// A date is current, no event open.
    InDay { date: NaiveDate },
    /// A date is current and an event is being built.
    InEvent { date: NaiveDate, draft: EventDraft },
}

impl ParseState {
    fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Seeking => None,
            Self::InDay { date } | Self::InEvent { date, .. } => Some(*date),
        }
    }

    /// The draft this state would finalize on a transition.
    fn into_draft(self) -> Option<EventDraft> {
        match self {
            Self::InEvent { draft, .. } => Some(draft),
            Self::Seeking | Self::InDay { .. } => None,
        }
    }
}

/// Compute the next state for `line`.
///
/// Returns the new state and, when the transition closes an event, the
/// finalized draft.
pub(crate) fn transition(
    state: ParseState,
    line: &str,
    grammar: &Grammar,
    year: i32,
) -> (ParseState, Option<EventDraft>) {
    let line = line.trim();
    if line.is_empty() {
        return (state, None);
    }
    trace!("Processing line: {line}");

    match grammar.date_header(line, year) {
        Some(DateHeader::Date(date)) => {
            debug!("Found date: {}", date.format("%Y-%m-%d"));
            return (ParseState::InDay { date }, state.into_draft());
        }
        Some(DateHeader::Malformed) => {
            debug!("Ignoring date header with impossible date: {line}");
            return (state, None);
        }
        None => {}
    }

    let Some(date) = state.date() else {
        return (state, None);
    };

    if let Some(matched) = grammar.event_start(line) {
        debug!("Found event start: {line}");
        let draft = EventDraft::open(date, &matched, grammar);
        return (ParseState::InEvent { date, draft }, state.into_draft());
    }

    match state {
        ParseState::InEvent { date, mut draft } => {
            continue_event(&mut draft, line, grammar);
            (ParseState::InEvent { date, draft }, None)
        }
        other => (other, None),
    }
}

/// Apply a continuation line to the open draft.
fn continue_event(draft: &mut EventDraft, line: &str, grammar: &Grammar) {
    if grammar.is_noise(line) {
        trace!("Skipping noise line: {line}");
        return;
    }
    if grammar.is_footnote_line(line) {
        trace!("Skipping footnote line: {line}");
        return;
    }

    let cleaned = grammar.strip_footnote(line);
    if !cleaned.is_empty() {
        draft.absorb(cleaned);
    }
}

/// State threaded through one parse: the machine position plus the
/// events finalized so far. Never shared between parses.
#[derive(Debug)]
pub(crate) struct ParseContext<'g> {
    grammar: &'g Grammar,
    year: i32,
    state: ParseState,
    completed: Vec<CalendarEvent>,
}

impl<'g> ParseContext<'g> {
    pub(crate) fn new(grammar: &'g Grammar, year: i32) -> Self {
        Self {
            grammar,
            year,
            state: ParseState::Seeking,
            completed: Vec::new(),
        }
    }

    pub(crate) fn feed(&mut self, line: &str) {
        let state = std::mem::replace(&mut self.state, ParseState::Seeking);
        let (next, finished) = transition(state, line, self.grammar, self.year);
        self.state = next;
        if let Some(draft) = finished {
            self.completed.push(draft.finalize());
        }
    }

    /// Close any open event and hand back everything in document order.
    pub(crate) fn finish(mut self) -> Vec<CalendarEvent> {
        if let Some(draft) = self.state.into_draft() {
            self.completed.push(draft.finalize());
        }
        self.completed
    }
}
