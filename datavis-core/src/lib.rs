//! DataVis Core Library
//!
//! Loads a small business dataset (Month, Sales, Profit, Customers, Expenses)
//! from a delimited file and turns it into charts and a text report.
//!
//! # Architecture
//!
//! The library is stateless and never touches the console:
//! - Loads delimited files into an immutable [`Table`]
//! - Validates the business schema before anything is drawn
//! - Describes figures declaratively with [`ChartSpec`] and renders them to PNG
//! - Computes summary statistics and formats the analysis report
//!
//! The interactive menu, chart viewer and configuration file live in the
//! application layer (datavis-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use datavis_core::{load_csv, schema, ChartKind, ChartRenderer, LoadOptions, RenderConfig};
//! use std::path::Path;
//!
//! let table = load_csv(Path::new("sample_data.csv"), &LoadOptions::new()).unwrap();
//! schema::validate(&table).unwrap();
//!
//! let renderer = ChartRenderer::new(RenderConfig::new().with_output_dir("plots"));
//! let path = renderer.render_kind(&table, ChartKind::Line).unwrap();
//!
//! let report = datavis_core::generate_report(&table, &[path]).unwrap();
//! println!("{}", report);
//! ```

// Public modules
pub mod chart;
pub mod config;
pub mod format;
pub mod loader;
pub mod palette;
pub mod preview;
pub mod render;
pub mod report;
pub mod schema;
pub mod stats;
pub mod types;

// Re-export main types for convenience
pub use chart::{ChartKind, ChartSpec, MarkerShape, Panel, Series};
pub use config::{LoadOptions, RenderConfig, DEFAULT_DATA_FILE, DEFAULT_PLOTS_DIR};
pub use loader::{from_reader, load_csv};
pub use render::ChartRenderer;
pub use report::{
    format_report, generate_report, save_report, ReportSummary, DEFAULT_REPORT_FILE,
};
pub use types::{Column, ColumnData, ColumnType, DataError, Result, Table};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: a default renderer targets the plots directory
        let renderer = ChartRenderer::default();
        assert_eq!(renderer.config().output_dir, std::path::PathBuf::from("plots"));
        assert!(!VERSION.is_empty());
    }
}
