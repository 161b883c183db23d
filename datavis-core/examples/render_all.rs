//! Standalone batch renderer
//!
//! Renders every stock chart for a dataset without the interactive menu and
//! prints the analysis report to stdout.
//!
//! Usage:
//!   render_all <data.csv> [--out <dir>]
//!
//! Example:
//!   render_all sample_data.csv --out plots

use datavis_core::{
    generate_report, load_csv, schema, ChartKind, ChartRenderer, LoadOptions, RenderConfig,
};
use std::env;
use std::path::PathBuf;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <data.csv> [--out <dir>]", args[0]);
        std::process::exit(1);
    }

    let data_path = PathBuf::from(&args[1]);
    let mut out_dir = PathBuf::from(datavis_core::DEFAULT_PLOTS_DIR);
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--out" if i + 1 < args.len() => {
                out_dir = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
    }

    let table = match load_csv(&data_path, &LoadOptions::new()) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error loading data: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = schema::validate(&table) {
        eprintln!("Unexpected schema: {}", e);
        std::process::exit(1);
    }

    println!("Loaded {} rows from {:?}", table.row_count(), data_path);

    let renderer = ChartRenderer::new(RenderConfig::new().with_output_dir(&out_dir));
    let mut artifacts = Vec::new();
    for kind in ChartKind::ALL {
        match renderer.render_kind(&table, kind) {
            Ok(path) => {
                println!("  {:<13} {}", kind.file_stem(), path.display());
                artifacts.push(path);
            }
            Err(e) => {
                eprintln!("Failed to render {}: {}", kind, e);
                std::process::exit(1);
            }
        }
    }

    match generate_report(&table, &artifacts) {
        Ok(report) => println!("{}", report),
        Err(e) => eprintln!("Failed to build report: {}", e),
    }
}
