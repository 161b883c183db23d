//! Library configuration types
//!
//! This module defines the minimal configuration needed by the loader and the
//! renderer. Anything interactive (menus, viewers, report location) belongs to
//! the application layer.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default dataset path, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "sample_data.csv";

/// Default directory for rendered charts
pub const DEFAULT_PLOTS_DIR: &str = "plots";

/// Options for reading a delimited file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Field delimiter (default: b',')
    #[serde(default = "default_delimiter")]
    pub delimiter: u8,

    /// Whether to trim whitespace around headers and cells
    #[serde(default = "default_true")]
    pub trim: bool,
}

fn default_delimiter() -> u8 {
    b','
}

fn default_true() -> bool {
    true
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            trim: true,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder method: enable or disable whitespace trimming
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

/// Configuration for the chart renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Directory that receives the PNG files (created if absent)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Timestamp pattern used in file names
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_PLOTS_DIR)
}

fn default_timestamp_format() -> String {
    "%Y%m%d_%H%M%S".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the output directory
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let load = LoadOptions::new();
        assert_eq!(load.delimiter, b',');
        assert!(load.trim);

        let render = RenderConfig::new();
        assert_eq!(render.output_dir, PathBuf::from("plots"));
        assert_eq!(render.timestamp_format, "%Y%m%d_%H%M%S");
    }

    #[test]
    fn test_builders() {
        let load = LoadOptions::new().with_delimiter(b';').with_trim(false);
        assert_eq!(load.delimiter, b';');
        assert!(!load.trim);

        let render = RenderConfig::new().with_output_dir("out/charts");
        assert_eq!(render.output_dir, PathBuf::from("out/charts"));
    }
}
