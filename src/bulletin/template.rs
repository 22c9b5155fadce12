//! Data-driven bulletin grammar.
//!
//! Everything that ties the parser to one particular bulletin (place
//! names, weekday names, cancellation wording, footnote markers, page
//! furniture) lives in a [`Template`]. Compiling a template yields the
//! [`Grammar`] the state machine runs on; the machine itself knows no
//! words of any language.

use chrono::{Duration, NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::noise::{HeuristicNoise, NoiseFilter};
use crate::layout::DEFAULT_LINE_TOLERANCE;

/// Errors from compiling a [`Template`].
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template has no {0}")]
    Empty(&'static str),

    #[error("invalid footnote marker {marker:?}: {source}")]
    InvalidMarker {
        marker: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid {what} pattern: {source}")]
    Pattern {
        what: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}

/// Document-specific vocabulary and constants.
///
/// Defaults describe the weekly bulletin of the Steinfeld parish cluster.
/// Every field can be overridden from a TOML file (see [`crate::config`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    /// Vertical clustering tolerance for line reconstruction, in PDF points.
    pub line_tolerance: f32,
    /// Places that may start an event line.
    pub locations: Vec<String>,
    /// Weekday names that introduce a date header.
    pub weekdays: Vec<String>,
    /// Words marking an event as cancelled (matched case-insensitively).
    pub cancel_keywords: Vec<String>,
    /// Regex fragments for footnote markers. Text from the first marker on
    /// is dropped; a line starting with one is dropped entirely.
    pub footnote_markers: Vec<String>,
    /// Running page headers that never belong to an event.
    pub noise_headers: Vec<String>,
    /// Dashed lines longer than this many characters are dividers.
    pub divider_min_len: usize,
    /// Title used until a continuation line supplies a real one.
    pub placeholder_summary: String,
    /// Length of a timed event.
    pub event_duration_minutes: u32,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            line_tolerance: DEFAULT_LINE_TOLERANCE,
            locations: strings(&["Steinfeld", "Hausen", "Waldzell"]),
            weekdays: strings(&[
                "Montag",
                "Dienstag",
                "Mittwoch",
                "Donnerstag",
                "Freitag",
                "Samstag",
                "Sonntag",
            ]),
            cancel_keywords: strings(&["entfällt", "entfallt"]),
            footnote_markers: strings(&[r"f[.\s]", r"für\s"]),
            noise_headers: strings(&["S t e i n f e l d", "Mariä Himmelfahrt", "St. Cyriakus"]),
            divider_min_len: 20,
            placeholder_summary: "Church Event".to_string(),
            event_duration_minutes: 60,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Template {
    /// Validate the template and build its matchers.
    pub fn compile(&self) -> Result<Grammar, TemplateError> {
        if self.locations.iter().all(|l| l.trim().is_empty()) {
            return Err(TemplateError::Empty("locations"));
        }
        if self.weekdays.iter().all(|w| w.trim().is_empty()) {
            return Err(TemplateError::Empty("weekdays"));
        }
        if !(self.line_tolerance.is_finite() && self.line_tolerance > 0.0) {
            return Err(TemplateError::NotPositive {
                field: "line_tolerance",
                value: f64::from(self.line_tolerance),
            });
        }
        if self.event_duration_minutes == 0 {
            return Err(TemplateError::NotPositive {
                field: "event_duration_minutes",
                value: 0.0,
            });
        }

        let markers: Vec<&str> = self
            .footnote_markers
            .iter()
            .map(String::as_str)
            .filter(|m| !m.is_empty())
            .collect();
        for marker in &markers {
            Regex::new(marker).map_err(|source| TemplateError::InvalidMarker {
                marker: (*marker).to_string(),
                source,
            })?;
        }

        let weekdays = alternation(&self.weekdays);
        let date_header = Regex::new(&format!(r"(?i)(?:{weekdays})\s+(\d{{1,2}})\.(\d{{1,2}})\."))
            .map_err(|source| TemplateError::Pattern {
                what: "date header",
                source,
            })?;

        let locations = alternation(&self.locations);
        let event_start = Regex::new(&format!(r"(?i)^({locations})\s+(\d{{1,2}})[:.](\d{{2}})\s*(.*)$"))
            .map_err(|source| TemplateError::Pattern {
                what: "event start",
                source,
            })?;

        let (footnote_cut, footnote_line) = if markers.is_empty() {
            (None, None)
        } else {
            let markers = markers.join("|");
            let cut = Regex::new(&format!(r"(?i)\s+(?:{markers})")).map_err(|source| {
                TemplateError::Pattern {
                    what: "footnote",
                    source,
                }
            })?;
            let line = Regex::new(&format!(r"(?i)^(?:{markers})")).map_err(|source| {
                TemplateError::Pattern {
                    what: "footnote",
                    source,
                }
            })?;
            (Some(cut), Some(line))
        };

        Ok(Grammar {
            date_header,
            event_start,
            footnote_cut,
            footnote_line,
            locations: self
                .locations
                .iter()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect(),
            cancel_keywords: self
                .cancel_keywords
                .iter()
                .filter(|k| !k.is_empty())
                .map(|k| k.to_lowercase())
                .collect(),
            placeholder: self.placeholder_summary.clone(),
            duration: Duration::minutes(i64::from(self.event_duration_minutes)),
            noise: Box::new(HeuristicNoise::new(
                self.noise_headers.clone(),
                self.divider_min_len,
            )),
        })
    }
}

/// `a|b|c` of the escaped, non-empty words.
fn alternation(words: &[String]) -> String {
    words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

/// The pieces of an event-start line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStart {
    /// Location in its configured spelling.
    pub location: String,
    pub time: NaiveTime,
    /// Everything after the time, untrimmed of footnotes.
    pub text: String,
}

/// Result of looking for a date header in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateHeader {
    Date(NaiveDate),
    /// The line has header shape but the numbers are not a calendar date.
    Malformed,
}

/// A compiled [`Template`].
pub struct Grammar {
    date_header: Regex,
    event_start: Regex,
    footnote_cut: Option<Regex>,
    footnote_line: Option<Regex>,
    locations: Vec<String>,
    pub(crate) cancel_keywords: Vec<String>,
    pub(crate) placeholder: String,
    pub(crate) duration: Duration,
    pub(crate) noise: Box<dyn NoiseFilter>,
}

impl Grammar {
    /// Find a `{weekday} {day}.{month}.` header anywhere in the line.
    pub fn date_header(&self, line: &str, year: i32) -> Option<DateHeader> {
        let caps = self.date_header.captures(line)?;
        let day = caps[1].parse::<u32>().ok();
        let month = caps[2].parse::<u32>().ok();
        let date = day
            .zip(month)
            .and_then(|(d, m)| NaiveDate::from_ymd_opt(year, m, d));
        Some(date.map_or(DateHeader::Malformed, DateHeader::Date))
    }

    /// Match `{location} {H:MM|H.MM} {text}` at the start of the line.
    ///
    /// Times that are not valid clock times do not match.
    pub fn event_start(&self, line: &str) -> Option<EventStart> {
        let caps = self.event_start.captures(line)?;
        let hours = caps[2].parse::<u32>().ok()?;
        let minutes = caps[3].parse::<u32>().ok()?;
        let time = NaiveTime::from_hms_opt(hours, minutes, 0)?;

        let matched = caps[1].trim();
        let location = self
            .locations
            .iter()
            .find(|l| l.to_lowercase() == matched.to_lowercase())
            .cloned()
            .unwrap_or_else(|| matched.to_string());

        Some(EventStart {
            location,
            time,
            text: caps[4].trim().to_string(),
        })
    }

    /// Text up to the first footnote marker, trimmed. Text that opens
    /// with a marker is all footnote.
    pub fn strip_footnote<'a>(&self, text: &'a str) -> &'a str {
        // The cut pattern needs whitespace before the marker and would keep
        // `f. Familie Schmitt` whole as a title. Leading markers are checked
        // separately so such events fall back to the placeholder.
        if self.is_footnote_line(text.trim_start()) {
            return "";
        }
        match &self.footnote_cut {
            Some(cut) => super::text::strip_footnote(text, cut),
            None => text.trim(),
        }
    }

    /// Whether the whole line is a footnote.
    pub fn is_footnote_line(&self, line: &str) -> bool {
        self.footnote_line.as_ref().is_some_and(|re| re.is_match(line))
    }

    pub fn is_noise(&self, line: &str) -> bool {
        self.noise.is_noise(line)
    }

    pub(crate) fn set_noise_filter(&mut self, filter: Box<dyn NoiseFilter>) {
        self.noise = filter;
    }
}

impl std::fmt::Debug for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grammar")
            .field("date_header", &self.date_header.as_str())
            .field("event_start", &self.event_start.as_str())
            .field("locations", &self.locations)
            .field("cancel_keywords", &self.cancel_keywords)
            .field("placeholder", &self.placeholder)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> Grammar {
        Template::default().compile().unwrap()
    }

    #[test]
    fn parses_date_header_with_year() {
        let g = grammar();
        assert_eq!(
            g.date_header("Donnerstag 01.01.", 2024),
            Some(DateHeader::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()))
        );
        assert_eq!(
            g.date_header("sonntag 5.1.", 2025),
            Some(DateHeader::Date(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()))
        );
    }

    #[test]
    fn date_header_may_be_embedded() {
        let g = grammar();
        assert_eq!(
            g.date_header("2. Sonntag nach Weihnachten – Sonntag 05.01.", 2025),
            Some(DateHeader::Date(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()))
        );
    }

    #[test]
    fn impossible_dates_are_malformed() {
        let g = grammar();
        assert_eq!(g.date_header("Freitag 31.02.", 2024), Some(DateHeader::Malformed));
        assert_eq!(g.date_header("Montag 12.13.", 2024), Some(DateHeader::Malformed));
        assert_eq!(g.date_header("Steinfeld 18:00 Messfeier", 2024), None);
    }

    #[test]
    fn event_start_captures_parts() {
        let g = grammar();
        let start = g.event_start("Steinfeld 18:00 Messfeier").unwrap();
        assert_eq!(start.location, "Steinfeld");
        assert_eq!(start.time, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        assert_eq!(start.text, "Messfeier");

        let start = g.event_start("hausen 9.00").unwrap();
        assert_eq!(start.location, "Hausen");
        assert_eq!(start.time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(start.text, "");
    }

    #[test]
    fn event_start_requires_known_location_at_line_start() {
        let g = grammar();
        assert!(g.event_start("Berlin 18:00 Messfeier").is_none());
        assert!(g.event_start("In Steinfeld 18:00 Messfeier").is_none());
        assert!(g.event_start("Steinfeld Messfeier").is_none());
    }

    #[test]
    fn event_start_rejects_impossible_times() {
        assert!(grammar().event_start("Waldzell 25:00 Nachtwache").is_none());
        assert!(grammar().event_start("Waldzell 10:75 Messe").is_none());
    }

    #[test]
    fn footnote_lines() {
        let g = grammar();
        assert!(g.is_footnote_line("f. verstorbene Eltern"));
        assert!(g.is_footnote_line("F Familie Schmitt"));
        assert!(g.is_footnote_line("für die Pfarrgemeinde"));
        assert!(!g.is_footnote_line("Frühschoppen im Pfarrheim"));
        assert_eq!(g.strip_footnote("Hochamt für alle Lebenden"), "Hochamt");
        assert_eq!(g.strip_footnote("f. Familie Klein"), "");
    }

    #[test]
    fn template_without_markers_keeps_text() {
        let template = Template {
            footnote_markers: vec![],
            ..Template::default()
        };
        let g = template.compile().unwrap();
        assert!(!g.is_footnote_line("f. Eltern"));
        assert_eq!(g.strip_footnote(" Amt f. Eltern "), "Amt f. Eltern");
    }

    #[test]
    fn rejects_empty_locations() {
        let template = Template {
            locations: vec![" ".into()],
            ..Template::default()
        };
        assert!(matches!(template.compile(), Err(TemplateError::Empty("locations"))));
    }

    #[test]
    fn rejects_invalid_marker() {
        let template = Template {
            footnote_markers: vec!["f(".into()],
            ..Template::default()
        };
        assert!(matches!(
            template.compile(),
            Err(TemplateError::InvalidMarker { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_tolerance() {
        let template = Template {
            line_tolerance: 0.0,
            ..Template::default()
        };
        assert!(matches!(
            template.compile(),
            Err(TemplateError::NotPositive { field: "line_tolerance", .. })
        ));
    }

    #[test]
    fn rejects_zero_event_duration() {
        let template = Template {
            event_duration_minutes: 0,
            ..Template::default()
        };
        assert!(matches!(
            template.compile(),
            Err(TemplateError::NotPositive { field: "event_duration_minutes", .. })
        ));
    }

    #[test]
    fn locations_are_escaped() {
        let template = Template {
            locations: vec!["St. Anna".into()],
            ..Template::default()
        };
        let g = template.compile().unwrap();
        assert!(g.event_start("St. Anna 10:00 Hochamt").is_some());
        assert!(g.event_start("StX Anna 10:00 Hochamt").is_none());
    }
}
