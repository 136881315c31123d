//! Optional TOML configuration.
//!
//! ```toml
//! [output]
//! dir = "exports"
//! stem = "players"
//!
//! [html]
//! height = "800px"
//! title = "Players"
//! vis_js = "assets/vis-network.min.js"
//! highlight_neighbors = false
//! ```
//!
//! Command-line values take precedence over anything set here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use graphex_error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphexConfig {
    pub output: OutputConfig,
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: Option<PathBuf>,
    pub stem: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HtmlConfig {
    pub height: Option<String>,
    pub title: Option<String>,
    /// Bundle embedded into the page instead of loading it from the CDN.
    pub vis_js: Option<PathBuf>,
    pub highlight_neighbors: Option<bool>,
}

impl GraphexConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config_invalid(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::from(e)
                .with_operation("config::load")
                .with_context("path", path.display().to_string())
        })?;
        Self::parse(&text).map_err(|e| e.with_context("path", path.display().to_string()))
    }
}
