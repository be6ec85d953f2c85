use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::tui::theme::ThemeConfig;

/// Application configuration, loaded from `~/.tasklist/config.toml`.
/// Every key is optional; a missing file means defaults.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Write debug logs here. A TUI owns the terminal, so without this no
    /// log output is produced at all.
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Two clicks on the same row within this window count as a double
    /// click. Default: 400
    #[serde(default = "default_double_click_ms")]
    pub double_click_ms: u64,

    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_file: None,
            double_click_ms: default_double_click_ms(),
            theme: ThemeConfig::default(),
        }
    }
}

fn default_double_click_ms() -> u64 {
    400
}

/// Returns the base config directory: ~/.tasklist/
pub fn base_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(".tasklist"))
}

/// Load config from the default location (or return defaults if it doesn't
/// exist). An explicit path must exist and parse.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return parse_file(path);
    }
    let path = base_dir()?.join("config.toml");
    if path.exists() {
        parse_file(&path)
    } else {
        Ok(Config::default())
    }
}

fn parse_file(path: &Path) -> Result<Config> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
