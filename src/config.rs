//! Template configuration loaded from `~/.config/bulletin-cal/template.toml`.
//!
//! Any field left out of the file keeps its built-in default:
//!
//! ```toml
//! locations = ["St. Anna", "Oberdorf"]
//! noise_headers = ["Pfarrbrief St. Anna"]
//! event_duration_minutes = 45
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::bulletin::Template;

/// Load the template to parse with.
///
/// An explicit `path` must exist. Without one, the user config file is
/// read if present; otherwise the built-in defaults apply.
///
/// # Errors
///
/// Returns an error if a file cannot be read or is not a valid template.
pub fn load_template(path: Option<&Path>) -> Result<Template> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = config_path();
            if !default.exists() {
                return Ok(Template::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let template = parse_template(&content)
        .with_context(|| format!("invalid template in {}", path.display()))?;

    tracing::debug!("Loaded template from {}", path.display());
    Ok(template)
}

/// Parse template TOML and check that it compiles.
pub fn parse_template(content: &str) -> Result<Template> {
    let template: Template = toml::from_str(content).context("invalid TOML")?;
    template.compile()?;
    Ok(template)
}

/// Render a template as TOML, for `bulletin-cal template`.
pub fn render_template(template: &Template) -> Result<String> {
    toml::to_string_pretty(template).context("failed to serialize template")
}

/// Return the path to the user template file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bulletin-cal")
        .join("template.toml")
}
