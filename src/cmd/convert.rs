use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Datelike;
use tracing::{debug, info};

use bulletin_cal::config::load_template;
use bulletin_cal::Pipeline;

use super::output::{parse_selection, render, write_output};
use crate::OutputFormat;

pub async fn cmd_convert(
    file: PathBuf,
    year: Option<i32>,
    format: OutputFormat,
    output: Option<PathBuf>,
    select: Option<&str>,
    config: Option<&Path>,
) -> Result<()> {
    let template = load_template(config)?;
    let pipeline = Pipeline::new(&template).context("invalid template")?;
    let year = year.unwrap_or_else(|| chrono::Local::now().year());

    let start = Instant::now();
    let path_hint = file.display().to_string();
    let events = tokio::task::spawn_blocking(move || -> Result<_> {
        let bytes =
            std::fs::read(&file).with_context(|| format!("failed to read {}", file.display()))?;
        debug!("Read {} bytes from {}", bytes.len(), file.display());
        Ok(pipeline.extract(&bytes, &file.to_string_lossy(), year)?)
    })
    .await??;
    info!(
        "Extracted {} events from {path_hint} in {:.1}ms",
        events.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let events = match select {
        Some(spec) if !events.is_empty() => {
            let keep = parse_selection(spec, events.len())?;
            keep.into_iter().map(|i| events[i].clone()).collect()
        }
        _ => events,
    };

    if events.is_empty() {
        eprintln!("No events found in {path_hint}");
    }

    write_output(&render(&events, format)?, output)
}
