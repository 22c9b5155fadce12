//! Overlap repair between neighbouring events.
//!
//! Bulletins list start times only; every timed event gets a default
//! length, so back-to-back services overlap. One forward pass clamps each
//! event's end to the next event's start. Only direct neighbours are
//! compared and a shortened event is not re-checked against anything else.

use tracing::{debug, warn};

use crate::event::CalendarEvent;

/// Shorten events that run into their successor, in place.
///
/// All-day markers are clamped like any other event; exporters widen them
/// back to whole days. Pairs are left alone when
/// - either event lacks a timestamp, or
/// - the successor starts before the event itself (out-of-order entries),
///   since clamping would end the event before it starts.
pub fn resolve_overlaps(events: &mut [CalendarEvent]) {
    for i in 1..events.len() {
        let (head, tail) = events.split_at_mut(i);
        let current = &mut head[i - 1];
        let next = &tail[0];

        let (Some(start), Some(end), Some(next_start)) = (current.start, current.end, next.start)
        else {
            continue;
        };
        if end <= next_start {
            continue;
        }
        if next_start < start {
            warn!(
                "Not adjusting {}: next event {} starts before it ({} < {})",
                current.summary,
                next.summary,
                next_start.format("%Y-%m-%d %H:%M"),
                start.format("%Y-%m-%d %H:%M")
            );
            continue;
        }

        debug!(
            "Adjusting overlap: {} ends at {}, next starts at {}",
            current.summary,
            end.format("%H:%M"),
            next_start.format("%H:%M")
        );
        current.end = Some(next_start);
    }
}
