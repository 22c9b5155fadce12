use std::path::Path;

use anyhow::Result;

use bulletin_cal::config::{config_path, load_template, render_template};

use super::output::write_output;

pub fn cmd_template(config: Option<&Path>) -> Result<()> {
    let template = load_template(config)?;
    let source = match config {
        Some(path) => path.display().to_string(),
        None if config_path().exists() => config_path().display().to_string(),
        None => "built-in defaults".to_string(),
    };

    let mut out = format!("# Template from {source}\n");
    out.push_str(&render_template(&template)?);
    write_output(&out, None)
}
