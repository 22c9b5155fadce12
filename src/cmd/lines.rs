use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use bulletin_cal::config::load_template;
use bulletin_cal::Pipeline;

use super::output::write_output;

/// Print reconstructed lines as `page:y  text`, one per row.
pub async fn cmd_lines(file: PathBuf, config: Option<&Path>) -> Result<()> {
    let template = load_template(config)?;
    let pipeline = Pipeline::new(&template).context("invalid template")?;

    let lines = tokio::task::spawn_blocking(move || -> Result<_> {
        let bytes =
            std::fs::read(&file).with_context(|| format!("failed to read {}", file.display()))?;
        Ok(pipeline.lines(&bytes, &file.to_string_lossy())?)
    })
    .await??;

    let mut out = String::new();
    for line in &lines {
        let _ = writeln!(out, "{}:{:<7.1} {}", line.page + 1, line.y, line.text);
    }
    write_output(&out, None)
}
