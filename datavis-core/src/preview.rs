//! Text preview of a loaded table: head rows, column types and summary
//! statistics, laid out as right-aligned plain text columns.

use crate::stats::{self, Summary};
use crate::types::Table;
use std::fmt::Write;

pub const PREVIEW_ROWS: usize = 5;

/// Right-align a grid of cells; the first row is the header
fn align(rows: &[Vec<String>]) -> String {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; width];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:>w$}", cell, w = widths[i]))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}

/// The first `n` rows with a leading row index
pub fn head(table: &Table, n: usize) -> String {
    let mut rows = Vec::new();
    let mut header = vec![String::new()];
    header.extend(table.column_names().iter().map(|s| s.to_string()));
    rows.push(header);

    for row in 0..n.min(table.row_count()) {
        let mut cells = vec![row.to_string()];
        cells.extend(table.columns().iter().map(|c| c.cell(row)));
        rows.push(cells);
    }
    align(&rows)
}

/// One line per column: name and storage type
pub fn dtypes(table: &Table) -> String {
    let name_width = table
        .column_names()
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for column in table.columns() {
        let _ = writeln!(
            out,
            "{:<w$}  {:>7}",
            column.name,
            column.column_type().to_string(),
            w = name_width
        );
    }
    out
}

fn stat_cell(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// count/mean/std/min/quartiles/max for every numeric column
pub fn describe(table: &Table) -> String {
    let numeric = table.numeric_columns();
    if numeric.is_empty() {
        return "No numeric columns\n".to_string();
    }
    let summaries: Vec<Summary> = numeric
        .iter()
        .map(|c| stats::describe(c.values().unwrap_or(&[])))
        .collect();

    let mut rows = Vec::new();
    let mut header = vec![String::new()];
    header.extend(numeric.iter().map(|c| c.name.clone()));
    rows.push(header);

    let lines: [(&str, fn(&Summary) -> f64); 8] = [
        ("count", |s| s.count as f64),
        ("mean", |s| s.mean),
        ("std", |s| s.std),
        ("min", |s| s.min),
        ("25%", |s| s.q25),
        ("50%", |s| s.median),
        ("75%", |s| s.q75),
        ("max", |s| s.max),
    ];
    for (label, pick) in lines {
        let mut row = vec![label.to_string()];
        row.extend(summaries.iter().map(|s| stat_cell(pick(s))));
        rows.push(row);
    }

    align(&rows)
}

/// The full preview shown by the menu
pub fn preview(table: &Table) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nFirst {} rows:", PREVIEW_ROWS);
    out.push_str(&head(table, PREVIEW_ROWS));
    out.push_str("\nData types:\n");
    out.push_str(&dtypes(table));
    out.push_str("\nBasic statistics:\n");
    out.push_str(&describe(table));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadOptions;
    use crate::loader::from_reader;

    fn table() -> Table {
        let data = "Month,Sales\nJan,100\nFeb,150\nMar,200\nApr,250\nMay,300\nJun,350\n";
        from_reader(data.as_bytes(), &LoadOptions::new()).unwrap()
    }

    #[test]
    fn test_head_limits_rows() {
        let out = head(&table(), 5);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("Month") && lines[0].contains("Sales"));
        assert!(lines[5].contains("May"));
        assert!(!out.contains("Jun"));
    }

    #[test]
    fn test_dtypes_lists_every_column() {
        let out = dtypes(&table());
        assert!(out.contains("Month") && out.contains("object"));
        assert!(out.contains("Sales") && out.contains("int64"));
    }

    #[test]
    fn test_describe_values() {
        let out = describe(&table());
        let mean_line = out.lines().find(|l| l.trim_start().starts_with("mean")).unwrap();
        assert!(mean_line.ends_with("225.00"));
        let count_line = out.lines().find(|l| l.trim_start().starts_with("count")).unwrap();
        assert!(count_line.ends_with("6.00"));
    }

    #[test]
    fn test_preview_sections() {
        let out = preview(&table());
        assert!(out.contains("First 5 rows:"));
        assert!(out.contains("Data types:"));
        assert!(out.contains("Basic statistics:"));
    }
}
