//! Library-level extraction scenarios.
//!
//! Drives the public API from lines (or fixture bytes) to events and checks
//! the behaviour callers rely on: ordering, time validity, overlap repair,
//! and graceful handling of documents without dates.

use bulletin_cal::{resolve_overlaps, BulletinParser, CalendarEvent, Pipeline, Template};
use chrono::{Duration, NaiveDate, NaiveDateTime};

const BULLETIN: &str = include_str!("fixtures/bulletin.txt");
const RUNS: &str = include_str!("fixtures/bulletin_runs.json");

fn parser() -> BulletinParser {
    BulletinParser::new(&Template::default()).unwrap()
}

fn at(month: u32, day: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, month, day)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn fixture_events() -> Vec<CalendarEvent> {
    Pipeline::new(&Template::default())
        .unwrap()
        .extract(BULLETIN.as_bytes(), "bulletin.txt", 2024)
        .unwrap()
}

// ─── Worked examples ─────────────────────────────────────────────────────────

#[test]
fn single_event_gets_default_duration() {
    let events = parser().extract(&["Donnerstag 01.01.", "Steinfeld 18:00 Messfeier"], 2024);

    assert_eq!(
        events,
        vec![CalendarEvent {
            summary: "Messfeier (Steinfeld)".into(),
            location: "Steinfeld".into(),
            start: Some(at(1, 1, 18, 0)),
            end: Some(at(1, 1, 19, 0)),
            is_all_day: false,
            description: String::new(),
        }]
    );
}

#[test]
fn footnote_line_is_discarded() {
    let events = parser().extract(
        &[
            "Donnerstag 01.01.",
            "Steinfeld 18:00 Messfeier",
            "f. verstorbene Eltern",
        ],
        2024,
    );

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].summary, "Messfeier (Steinfeld)");
    assert!(events[0].description.is_empty());
}

#[test]
fn cancelled_event_spans_the_whole_day() {
    let events = parser().extract(
        &["Sonntag 07.01.", "Hausen 9.00 Wortgottesfeier entfällt"],
        2024,
    );

    assert_eq!(events.len(), 1);
    assert!(events[0].is_all_day);
    assert_eq!(events[0].start, Some(at(1, 7, 0, 0)));
    assert_eq!(events[0].end, Some(at(1, 8, 0, 0)));
}

#[test]
fn overlapping_neighbours_are_clamped() {
    let events = parser().extract(
        &[
            "Sonntag 07.01.",
            "Steinfeld 9:00 Laudes",
            "Steinfeld 9:30 Hochamt",
        ],
        2024,
    );

    assert_eq!(events[0].end, Some(at(1, 7, 9, 30)));
    assert_eq!(events[1].start, Some(at(1, 7, 9, 30)));
    assert_eq!(events[1].end, Some(at(1, 7, 10, 30)));
}

#[test]
fn no_date_headers_yield_no_events() {
    let events = parser().extract(
        &["Steinfeld 18:00 Messfeier", "mit Chor", "Hausen 9:00 Laudes"],
        2024,
    );
    assert!(events.is_empty());
}

// ─── Properties over a full bulletin ─────────────────────────────────────────

#[test]
fn fixture_events_follow_document_order() {
    let summaries: Vec<String> = fixture_events().into_iter().map(|e| e.summary).collect();
    assert_eq!(
        summaries,
        vec![
            "Vorabendmesse (Hausen)",
            "Hochamt (Steinfeld)",
            "Wortgottesfeier entfällt (Waldzell)",
            "Kindergottesdienst (Hausen)",
            "Rosenkranz (Steinfeld)",
            "Messfeier (Steinfeld)",
        ]
    );
}

#[test]
fn fixture_events_have_valid_times() {
    for event in fixture_events() {
        let (start, end) = (event.start.unwrap(), event.end.unwrap());
        assert!(start < end, "{}", event.summary);
        if event.is_all_day {
            // A later service on the same day may shorten the marker.
            assert_eq!(start.time(), chrono::NaiveTime::MIN, "{}", event.summary);
            assert!(end <= start + Duration::days(1), "{}", event.summary);
        }
    }
}

#[test]
fn fixture_neighbours_do_not_overlap() {
    let events = fixture_events();
    for pair in events.windows(2) {
        // Out-of-order neighbours are left alone rather than inverted.
        if pair[1].start < pair[0].start {
            continue;
        }
        assert!(pair[0].end <= pair[1].start, "{} overlaps", pair[0].summary);
    }
}

#[test]
fn cancelled_service_is_clamped_by_later_service() {
    let events = parser().extract(
        &[
            "Sonntag 07.01.",
            "Waldzell 9.30 Wortgottesfeier entfällt",
            "Hausen 10:30 Kindergottesdienst",
        ],
        2024,
    );

    assert_eq!(events.len(), 2);
    assert!(events[0].is_all_day);
    assert_eq!(events[0].start, Some(at(1, 7, 0, 0)));
    assert_eq!(events[0].end, Some(at(1, 7, 10, 30)));
    assert!(events[0].end <= events[1].start);
}

#[test]
fn fixture_cancelled_service_ends_at_next_service() {
    let events = fixture_events();
    assert_eq!(events[2].summary, "Wortgottesfeier entfällt (Waldzell)");
    assert_eq!(events[2].end, Some(at(1, 7, 10, 30)));
}

#[test]
fn resolver_is_idempotent() {
    let once = fixture_events();
    let mut twice = once.clone();
    resolve_overlaps(&mut twice);
    assert_eq!(once, twice);
}

#[test]
fn extraction_is_deterministic() {
    assert_eq!(fixture_events(), fixture_events());
}

#[test]
fn noise_lines_stay_out_of_descriptions() {
    for event in fixture_events() {
        assert!(!event.description.contains("Pfarrbrief"));
        assert!(!event.description.contains("---"));
        assert_ne!(event.description, "3");
    }
}

// ─── Layout-driven input ─────────────────────────────────────────────────────

#[test]
fn scattered_runs_parse_like_flat_lines() {
    let pipeline = Pipeline::new(&Template::default()).unwrap();
    let events = pipeline.extract(RUNS.as_bytes(), "bulletin_runs.json", 2024).unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].summary, "Messfeier (Steinfeld)");
    assert_eq!(events[0].description, "mit Chor");
    // The date carries over the page break.
    assert_eq!(events[1].start, Some(at(1, 1, 9, 0)));
    // An earlier successor is not clamped against.
    assert_eq!(events[0].end, Some(at(1, 1, 19, 0)));
}

#[test]
fn malformed_json_is_a_single_error() {
    let pipeline = Pipeline::new(&Template::default()).unwrap();
    let err = pipeline
        .extract(b"[[{\"content\": \"Montag 01.01.\"", "broken.json", 2024)
        .unwrap_err();
    assert!(err.to_string().contains("JSON"));
}
