//! Analysis report generation
//!
//! [`ReportSummary::compute`] derives the figures; [`format_report`] lays them
//! out as text together with the list of charts produced in the session.

use crate::format;
use crate::schema::{CUSTOMERS, EXPENSES, MONTH, PROFIT, SALES};
use crate::stats;
use crate::types::{DataError, Result, Table};
use chrono::{DateTime, Local};
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

/// Default report location, relative to the working directory
pub const DEFAULT_REPORT_FILE: &str = "analysis_report.txt";

const RULE_WIDTH: usize = 60;

/// The row holding a column's maximum
#[derive(Debug, Clone, PartialEq)]
pub struct Peak {
    pub row: usize,
    pub label: String,
    pub value: f64,
}

/// Figures shown in the report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub total_records: usize,
    pub first_period: String,
    pub last_period: String,
    pub total_sales: f64,
    pub total_expenses: f64,
    pub total_profit: f64,
    pub mean_sales: f64,
    pub mean_profit: f64,
    pub peak_sales: Peak,
    pub peak_profit: Peak,
    pub sales_growth: Option<f64>,
    pub customer_growth: Option<f64>,
    pub profit_margin: Option<f64>,
}

fn peak(values: &[f64], labels: &[String], column: &str) -> Result<Peak> {
    let (row, value) =
        stats::argmax(values).ok_or_else(|| DataError::NotNumeric(column.to_string()))?;
    Ok(Peak {
        row,
        label: labels.get(row).cloned().unwrap_or_default(),
        value,
    })
}

fn growth(values: &[f64]) -> Option<f64> {
    stats::percent_growth(*values.first()?, *values.last()?)
}

impl ReportSummary {
    /// Compute every figure; the table must hold at least one row
    pub fn compute(table: &Table) -> Result<Self> {
        if table.is_empty() {
            return Err(DataError::EmptyTable);
        }
        let months = table.labels(MONTH)?;
        let sales = table.numeric(SALES)?;
        let profit = table.numeric(PROFIT)?;
        let expenses = table.numeric(EXPENSES)?;
        let customers = table.numeric(CUSTOMERS)?;

        let mean_sales = stats::mean(sales).unwrap_or(f64::NAN);
        let mean_profit = stats::mean(profit).unwrap_or(f64::NAN);

        Ok(Self {
            total_records: table.row_count(),
            first_period: months.first().cloned().unwrap_or_default(),
            last_period: months.last().cloned().unwrap_or_default(),
            total_sales: stats::sum(sales),
            total_expenses: stats::sum(expenses),
            total_profit: stats::sum(profit),
            mean_sales,
            mean_profit,
            peak_sales: peak(sales, &months, SALES)?,
            peak_profit: peak(profit, &months, PROFIT)?,
            sales_growth: growth(sales),
            customer_growth: growth(customers),
            profit_margin: stats::ratio_percent(mean_profit, mean_sales),
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Lay out the report text
pub fn format_report(
    summary: &ReportSummary,
    artifacts: &[PathBuf],
    generated_at: &DateTime<Local>,
) -> String {
    let mut out = String::new();
    let money = |v: f64| format!("${}", format::amount(v));
    let rounded = |v: f64| format!("${}", format::thousands(v, 0));

    let _ = writeln!(out);
    let _ = writeln!(out, "DATA ANALYSIS REPORT");
    let _ = writeln!(out, "Generated on: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out);

    let _ = writeln!(out, "DATASET OVERVIEW:");
    let _ = writeln!(out, "- Total records: {}", summary.total_records);
    let _ = writeln!(
        out,
        "- Time period: {} to {}",
        summary.first_period, summary.last_period
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "KEY METRICS:");
    let _ = writeln!(out, "- Total Sales: {}", money(summary.total_sales));
    let _ = writeln!(out, "- Total Expenses: {}", money(summary.total_expenses));
    let _ = writeln!(out, "- Total Profit: {}", money(summary.total_profit));
    let _ = writeln!(out, "- Average Monthly Sales: {}", rounded(summary.mean_sales));
    let _ = writeln!(out, "- Average Monthly Profit: {}", rounded(summary.mean_profit));
    let _ = writeln!(
        out,
        "- Peak Sales Month: {} ({})",
        summary.peak_sales.label,
        money(summary.peak_sales.value)
    );
    let _ = writeln!(
        out,
        "- Peak Profit Month: {} ({})",
        summary.peak_profit.label,
        money(summary.peak_profit.value)
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "GROWTH ANALYSIS:");
    let _ = writeln!(out, "- Sales Growth: {}", format::percent(summary.sales_growth));
    let _ = writeln!(out, "- Customer Growth: {}", format::percent(summary.customer_growth));
    let _ = writeln!(
        out,
        "- Profit Margin (Average): {}",
        format::percent(summary.profit_margin)
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "GENERATED VISUALIZATIONS:");
    for (i, artifact) in artifacts.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, file_name(artifact));
    }
    out
}

/// Compute and format in one step, stamped with the current time
pub fn generate_report(table: &Table, artifacts: &[PathBuf]) -> Result<String> {
    let summary = ReportSummary::compute(table)?;
    Ok(format_report(&summary, artifacts, &Local::now()))
}

/// Write the report, replacing any previous file
pub fn save_report(path: &Path, report: &str) -> Result<()> {
    fs::write(path, report)?;
    log::info!("Report written: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadOptions;
    use crate::loader::from_reader;
    use chrono::TimeZone;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
Month,Sales,Profit,Customers,Expenses
Jan,100,20,10,80
Feb,150,35,12,115
Mar,200,35,15,165
";

    fn table(data: &str) -> Table {
        from_reader(data.as_bytes(), &LoadOptions::new()).unwrap()
    }

    #[test]
    fn test_totals_and_means() {
        let summary = ReportSummary::compute(&table(SAMPLE)).unwrap();
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.total_sales, 450.0);
        assert_eq!(summary.mean_sales, 150.0);
        assert_eq!(summary.total_expenses, 360.0);
        assert_eq!(summary.total_profit, 90.0);
        assert_eq!(summary.mean_profit, 30.0);
        assert_eq!(summary.profit_margin, Some(20.0));
        assert_eq!(summary.first_period, "Jan");
        assert_eq!(summary.last_period, "Mar");
    }

    #[test]
    fn test_growth() {
        let data = "Month,Sales,Profit,Customers,Expenses\nJan,100,1,40,1\nFeb,150,1,50,1\n";
        let summary = ReportSummary::compute(&table(data)).unwrap();
        assert_eq!(summary.sales_growth, Some(50.0));
        assert_eq!(summary.customer_growth, Some(25.0));
    }

    #[test]
    fn test_peak_ties_resolve_to_first_row() {
        let summary = ReportSummary::compute(&table(SAMPLE)).unwrap();
        assert_eq!(summary.peak_sales.label, "Mar");
        assert_eq!(summary.peak_profit.row, 1);
        assert_eq!(summary.peak_profit.label, "Feb");
    }

    #[test]
    fn test_empty_table_rejected() {
        let data = "Month,Sales,Profit,Customers,Expenses\n";
        assert!(matches!(
            ReportSummary::compute(&table(data)),
            Err(DataError::EmptyTable)
        ));
    }

    #[test]
    fn test_report_layout() {
        let summary = ReportSummary::compute(&table(SAMPLE)).unwrap();
        let artifacts = vec![
            PathBuf::from("plots/line_plot_20240101_120000.png"),
            PathBuf::from("plots/heatmap_20240101_120001.png"),
        ];
        let at = Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 5).unwrap();
        let text = format_report(&summary, &artifacts, &at);

        assert!(text.contains("Generated on: 2024-01-01 12:00:05"));
        assert!(text.contains("- Total Sales: $450"));
        assert!(text.contains("- Average Monthly Sales: $150"));
        assert!(text.contains("- Peak Profit Month: Feb ($35)"));
        assert!(text.contains("- Sales Growth: 100.0%"));
        assert!(text.contains("- Profit Margin (Average): 20.0%"));
        assert!(text.ends_with(
            "GENERATED VISUALIZATIONS:\n1. line_plot_20240101_120000.png\n2. heatmap_20240101_120001.png\n"
        ));
    }

    #[test]
    fn test_report_without_artifacts() {
        let summary = ReportSummary::compute(&table(SAMPLE)).unwrap();
        let text = format_report(&summary, &[], &Local::now());
        assert!(text.ends_with("GENERATED VISUALIZATIONS:\n"));
    }

    #[test]
    fn test_save_report_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("analysis_report.txt");
        save_report(&path, "first").unwrap();
        save_report(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }
}
