//! iCalendar (RFC 5545) export.
//!
//! Timed events are written with floating local times (no `Z`), since
//! bulletin times are wall-clock times of the parish. All-day events are
//! written as `VALUE=DATE` ranges. UIDs are derived from the event itself,
//! so exporting the same bulletin twice yields the same UIDs.

use icalendar::{Calendar, Component, Event, EventLike, EventStatus};
use tracing::debug;

use crate::event::CalendarEvent;

/// Calendar name written as `X-WR-CALNAME`.
pub const CALENDAR_NAME: &str = "Gottesdienste";

/// Render `events` as a VCALENDAR document.
///
/// Events without both `start` and `end` are skipped.
pub fn to_ics(events: &[CalendarEvent]) -> String {
    let mut calendar = Calendar::new();
    calendar.name(CALENDAR_NAME);

    for (index, event) in events.iter().enumerate() {
        match to_vevent(index, event) {
            Some(vevent) => {
                calendar.push(vevent);
            }
            None => debug!("Skipping event without start/end: {}", event.summary),
        }
    }

    calendar.to_string()
}

fn to_vevent(index: usize, event: &CalendarEvent) -> Option<Event> {
    let (start, end) = (event.start?, event.end?);

    let mut vevent = Event::new();
    vevent
        .uid(&format!(
            "{}-{}-{}@bulletin-cal",
            start.format("%Y%m%dT%H%M%S"),
            index,
            slug(&event.location)
        ))
        .summary(&event.summary)
        .status(EventStatus::Confirmed);

    if event.is_all_day {
        let last = end.date().max(start.date().succ_opt().unwrap_or(start.date()));
        vevent.starts(start.date()).ends(last);
    } else {
        vevent.starts(start).ends(end);
    }

    if !event.location.is_empty() {
        vevent.location(&event.location);
    }
    if !event.description.is_empty() {
        vevent.description(&event.description);
    }

    Some(vevent.done())
}

/// Lowercase ASCII alphanumerics of `text`, for UIDs.
fn slug(text: &str) -> String {
    let slug: String = text
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if slug.is_empty() {
        "event".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn messfeier() -> CalendarEvent {
        CalendarEvent {
            summary: "Messfeier (Steinfeld)".into(),
            location: "Steinfeld".into(),
            start: Some(at(1, 18, 0)),
            end: Some(at(1, 19, 0)),
            is_all_day: false,
            description: "mit Chor".into(),
        }
    }

    #[test]
    fn writes_calendar_envelope() {
        let ics = to_ics(&[]);
        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains("VERSION:2.0"));
        assert!(ics.contains("END:VCALENDAR"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn writes_floating_local_times() {
        let ics = to_ics(&[messfeier()]);
        assert!(ics.contains("BEGIN:VEVENT"));
        assert!(ics.contains("DTSTART:20240101T180000\r\n"));
        assert!(ics.contains("DTEND:20240101T190000\r\n"));
        assert!(ics.contains("SUMMARY:Messfeier (Steinfeld)"));
        assert!(ics.contains("LOCATION:Steinfeld"));
        assert!(ics.contains("DESCRIPTION:mit Chor"));
        assert!(ics.contains("STATUS:CONFIRMED"));
    }

    #[test]
    fn writes_all_day_as_dates() {
        let event = CalendarEvent {
            summary: "Wortgottesfeier entfällt (Hausen)".into(),
            location: "Hausen".into(),
            start: Some(at(7, 0, 0)),
            end: Some(at(8, 0, 0)),
            is_all_day: true,
            description: String::new(),
        };
        let ics = to_ics(&[event]);
        assert!(ics.contains("DTSTART;VALUE=DATE:20240107"));
        assert!(ics.contains("DTEND;VALUE=DATE:20240108"));
        assert!(!ics.contains("DESCRIPTION"));
    }

    #[test]
    fn clamped_all_day_still_exports_whole_day() {
        let event = CalendarEvent {
            summary: "Wortgottesfeier entfällt (Waldzell)".into(),
            location: "Waldzell".into(),
            start: Some(at(7, 0, 0)),
            end: Some(at(7, 10, 30)),
            is_all_day: true,
            description: String::new(),
        };
        let ics = to_ics(&[event]);
        assert!(ics.contains("DTSTART;VALUE=DATE:20240107"));
        assert!(ics.contains("DTEND;VALUE=DATE:20240108"));
    }

    #[test]
    fn skips_events_without_timestamps() {
        let incomplete = CalendarEvent {
            summary: "ohne Zeit".into(),
            start: Some(at(1, 9, 0)),
            ..CalendarEvent::default()
        };
        let ics = to_ics(&[incomplete, messfeier()]);
        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
        assert!(!ics.contains("ohne Zeit"));
    }

    #[test]
    fn uids_are_stable() {
        let first = to_ics(&[messfeier()]);
        let second = to_ics(&[messfeier()]);
        let uid = |ics: &str| {
            ics.lines()
                .find(|l| l.starts_with("UID:"))
                .map(str::to_string)
        };
        assert_eq!(uid(&first), uid(&second));
        assert_eq!(
            uid(&first).as_deref(),
            Some("UID:20240101T180000-0-steinfeld@bulletin-cal")
        );
    }

    #[test]
    fn slug_keeps_ascii_alphanumerics() {
        assert_eq!(slug("St. Anna"), "stanna");
        assert_eq!(slug("Münster"), "mnster");
        assert_eq!(slug(""), "event");
    }
}
