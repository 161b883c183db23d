//! Configuration loading and parsing
//!
//! The config file is optional. Every field has a default matching the
//! behaviour without one, and command-line flags override what it sets.

use anyhow::{bail, Context, Result};
use datavis_core::{LoadOptions, RenderConfig, DEFAULT_DATA_FILE, DEFAULT_PLOTS_DIR, DEFAULT_REPORT_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            delimiter: default_delimiter(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_plots_dir")]
    pub plots_dir: PathBuf,
    #[serde(default = "default_report_file")]
    pub report_file: PathBuf,
    /// Open each chart in the system image viewer
    #[serde(default = "default_true")]
    pub display: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            plots_dir: default_plots_dir(),
            report_file: default_report_file(),
            display: true,
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_delimiter() -> char {
    ','
}

fn default_plots_dir() -> PathBuf {
    PathBuf::from(DEFAULT_PLOTS_DIR)
}

fn default_report_file() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_FILE)
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Loader options; the delimiter must be a single ASCII character
    pub fn load_options(&self) -> Result<LoadOptions> {
        let delimiter = self.data.delimiter;
        if !delimiter.is_ascii() {
            bail!("Delimiter must be an ASCII character, got {:?}", delimiter);
        }
        Ok(LoadOptions::new().with_delimiter(delimiter as u8))
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::new().with_output_dir(&self.output.plots_dir)
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    // Fail early on a delimiter the loader cannot use
    config.load_options()?;

    Ok(config)
}
