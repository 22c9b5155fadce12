//! Text cleaning shared by event-start and continuation lines.

use regex::Regex;

/// Cut `text` at the first footnote marker and trim the rest.
///
/// `cut` matches the marker together with the whitespace in front of it,
/// so a marker glued to the previous word (`"Hof."`) is left alone.
pub fn strip_footnote<'a>(text: &'a str, cut: &Regex) -> &'a str {
    match cut.find(text) {
        Some(m) => text[..m.start()].trim(),
        None => text.trim(),
    }
}

/// Whether the text mentions any of the cancellation keywords.
///
/// `keywords` must already be lowercase.
pub fn is_cancelled(text: &str, keywords: &[String]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k.as_str()))
}

/// `"{title} ({location})"`, the summary shape used for every event.
pub fn with_location(title: &str, location: &str) -> String {
    format!("{title} ({location})")
}
