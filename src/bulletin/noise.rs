//! Structural noise detection for continuation lines.
//!
//! Bulletins interleave events with running page headers, dashed
//! dividers and page numbers. None of these belong in an event
//! description, so the state machine asks a [`NoiseFilter`] before
//! absorbing a line.

/// Decides whether a line is layout furniture rather than content.
pub trait NoiseFilter: Send + Sync {
    /// Returns `true` if the line should be discarded.
    fn is_noise(&self, line: &str) -> bool;
}

impl<F> NoiseFilter for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_noise(&self, line: &str) -> bool {
        self(line)
    }
}

/// The default bulletin heuristics.
///
/// A line is noise when it
/// - contains one of the known page-header strings,
/// - contains a dash and is longer than `divider_min_len` characters
///   (dashed divider rows), or
/// - consists solely of digits (page numbers).
#[derive(Debug, Clone)]
pub struct HeuristicNoise {
    headers: Vec<String>,
    divider_min_len: usize,
}

impl HeuristicNoise {
    pub fn new(headers: Vec<String>, divider_min_len: usize) -> Self {
        Self {
            headers,
            divider_min_len,
        }
    }
}

impl NoiseFilter for HeuristicNoise {
    fn is_noise(&self, line: &str) -> bool {
        self.headers.iter().any(|h| !h.is_empty() && line.contains(h.as_str()))
            || (line.contains('-') && line.chars().count() > self.divider_min_len)
            || is_page_number(line)
    }
}

fn is_page_number(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c.is_ascii_digit())
}
