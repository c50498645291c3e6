use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "handbook.toml";
const ENV_PREFIX: &str = "HANDBOOK";

/// Document-specific knobs. The defaults reproduce the reference handbook's
/// output; changing any of them changes the generated corpus.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Category given to TOC entries seen before any heading line.
    pub fallback_category: String,
    /// Lines containing any of these are never headings.
    pub boilerplate: Vec<String>,
    /// Label written before each page's text inside a section's content.
    pub page_marker: String,
    /// Output files are named `{file_prefix}_pages.json` etc.
    pub file_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            fallback_category: "כללי".to_string(),
            boilerplate: vec![
                "Schneider".to_string(),
                "logo".to_string(),
                "פנקס פרוטוקולים".to_string(),
                "לחזרה לתוכן העניינים".to_string(),
            ],
            page_marker: "עמוד".to_string(),
            file_prefix: "malrad".to_string(),
        }
    }
}

impl Settings {
    /// Defaults, then the TOML file (explicit path required to exist,
    /// `handbook.toml` optional), then `HANDBOOK_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("boilerplate"),
            )
            .build()
            .context("failed to read settings")?
            .try_deserialize()
            .context("invalid settings")
    }
}
