use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use bulletin_cal::{to_ics, CalendarEvent};

use crate::OutputFormat;

/// Write `content` to `output_file`, or to stdout when none is given.
pub fn write_output(content: &str, output_file: Option<PathBuf>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        file.write_all(content.as_bytes())?;
        eprintln!("💾 Saved {} bytes to {}", content.len(), path.display());
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Render events in the requested format.
pub fn render(events: &[CalendarEvent], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Ics => to_ics(events),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(events)?;
            json.push('\n');
            json
        }
        OutputFormat::Text => render_text(events),
    })
}

fn render_text(events: &[CalendarEvent]) -> String {
    let mut out = String::new();
    for (i, event) in events.iter().enumerate() {
        let when = match (event.start, event.end) {
            (Some(start), _) if event.is_all_day => {
                format!("{} (all day)", start.format("%a %d.%m.%Y"))
            }
            (Some(start), Some(end)) => format!(
                "{} {}-{}",
                start.format("%a %d.%m.%Y"),
                start.format("%H:%M"),
                end.format("%H:%M")
            ),
            (Some(start), None) => start.format("%a %d.%m.%Y %H:%M").to_string(),
            (None, _) => "(no date)".to_string(),
        };
        let _ = writeln!(out, "{:>3}. {when}  {}", i + 1, event.summary);
        if !event.description.is_empty() {
            let _ = writeln!(out, "     {}", event.description);
        }
    }
    out
}

/// Parse a 1-based selection like `1,3,5` or `2-4` into sorted 0-based indices.
pub fn parse_selection(spec: &str, count: usize) -> Result<Vec<usize>> {
    let mut indices = Vec::new();

    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (first, last) = match part.split_once('-') {
            Some((a, b)) => (parse_position(a)?, parse_position(b)?),
            None => {
                let n = parse_position(part)?;
                (n, n)
            }
        };
        if first > last {
            bail!("invalid range '{part}'");
        }
        if last > count {
            bail!("event {last} does not exist ({count} events found)");
        }
        indices.extend(first - 1..last);
    }

    if indices.is_empty() {
        bail!("empty selection '{spec}'");
    }
    indices.sort_unstable();
    indices.dedup();
    Ok(indices)
}

fn parse_position(text: &str) -> Result<usize> {
    let n: usize = text
        .trim()
        .parse()
        .with_context(|| format!("'{text}' is not an event number"))?;
    if n == 0 {
        bail!("event numbers start at 1");
    }
    Ok(n)
}
