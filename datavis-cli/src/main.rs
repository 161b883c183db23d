//! DataVis CLI Application
//!
//! Interactive front end for the datavis-core library. It adds:
//! - Command-line flags and an optional TOML config file
//! - The numbered menu and its session state machine
//! - Opening rendered charts in the system image viewer
//! - Interrupt handling and the top-level error message

use anyhow::Result;
use clap::Parser;
use datavis_core::{load_csv, schema, ChartRenderer, DataError, LoadOptions, Table};
use std::io;
use std::path::{Path, PathBuf};

mod config;
mod menu;
mod session;
mod viewer;

use config::AppConfig;
use session::Session;
use viewer::{ChartViewer, NoViewer, SystemViewer};

/// DataVis - Charts and a summary report for a monthly business dataset
#[derive(Parser, Debug)]
#[command(name = "datavis")]
#[command(about = "Render charts and a summary report from a business CSV", long_about = None)]
#[command(version)]
struct Args {
    /// Dataset to load (default: sample_data.csv)
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Directory for rendered charts (default: plots)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Report file written on exit (default: analysis_report.txt)
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not open charts in the image viewer
    #[arg(long)]
    no_display: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("DataVis CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using datavis-core v{}", datavis_core::VERSION);

    install_interrupt_handler();

    let config = resolve_config(&args)?;
    let options = config.load_options()?;

    println!("{}", menu::banner());

    let table = match load_data(&config.data.path, &options) {
        Some(table) => table,
        None => {
            println!("Cannot proceed without data. Exiting...");
            return Ok(());
        }
    };

    let viewer: Box<dyn ChartViewer> = if config.output.display {
        Box::new(SystemViewer)
    } else {
        Box::new(NoViewer)
    };

    let mut session = Session::new(
        &table,
        ChartRenderer::new(config.render_config()),
        viewer,
        &config.output.report_file,
        io::stdin().lock(),
        io::stdout(),
    );

    match session.run() {
        Ok(outcome) => log::debug!("Session ended: {:?}", outcome),
        Err(e) => {
            log::error!("Session aborted: {:#}", e);
            println!("\nAn unexpected error occurred: {}", e);
            println!("Please restart the program.");
        }
    }

    Ok(())
}

/// Config file (if any) with command-line overrides applied
fn resolve_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(data) = &args.data {
        config.data.path = data.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output.plots_dir = dir.clone();
    }
    if let Some(report) = &args.report {
        config.output.report_file = report.clone();
    }
    if args.no_display {
        config.output.display = false;
    }

    log::debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Load and validate the dataset. Failures are printed, never raised.
fn load_data(path: &Path, options: &LoadOptions) -> Option<Table> {
    let loaded = load_csv(path, options).and_then(|table| {
        schema::validate(&table)?;
        Ok(table)
    });

    match loaded {
        Ok(table) => {
            println!("✓ Successfully loaded data from '{}'", path.display());
            println!(
                "  Dataset shape: {} rows, {} columns",
                table.row_count(),
                table.column_count()
            );
            println!("  Columns: {}", table.column_names().join(", "));
            Some(table)
        }
        Err(DataError::FileNotFound(path)) => {
            println!("Error: File '{}' not found.", path.display());
            None
        }
        Err(e) => {
            log::error!("Failed to load {:?}: {}", path, e);
            println!("Error loading data: {}", e);
            None
        }
    }
}

/// Ctrl-C prints the farewell and ends the process; no report is written
fn install_interrupt_handler() {
    let result = ctrlc::set_handler(|| {
        println!("{}", menu::INTERRUPTED_MESSAGE);
        std::process::exit(0);
    });
    if let Err(e) = result {
        log::warn!("Could not install interrupt handler: {}", e);
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    // Warnings only by default so log lines do not interleave with the menu
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_data_missing_file_is_absent() {
        assert!(load_data(Path::new("missing_sample_data.csv"), &LoadOptions::new()).is_none());
    }

    #[test]
    fn test_load_data_rejects_wrong_schema() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"Month,Revenue\nJan,100\n").unwrap();
        temp_file.flush().unwrap();

        assert!(load_data(temp_file.path(), &LoadOptions::new()).is_none());
    }

    #[test]
    fn test_load_data_success() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"Month,Sales,Profit,Customers,Expenses\nJan,1,2,3,4\nFeb,5,6,7,8\n")
            .unwrap();
        temp_file.flush().unwrap();

        let table = load_data(temp_file.path(), &LoadOptions::new()).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 5);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "datavis",
            "--data",
            "q4.csv",
            "--output-dir",
            "charts",
            "--no-display",
        ]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.data.path, PathBuf::from("q4.csv"));
        assert_eq!(config.output.plots_dir, PathBuf::from("charts"));
        assert_eq!(config.output.report_file, PathBuf::from("analysis_report.txt"));
        assert!(!config.output.display);
    }
}
