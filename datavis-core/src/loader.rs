//! Delimited file loader
//!
//! Reads a whole file into a [`Table`]. There is no streaming mode: the
//! datasets this tool targets are a few dozen rows.

use crate::config::LoadOptions;
use crate::types::{Column, DataError, Result, Table};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load a delimited file from disk
pub fn load_csv(path: &Path, options: &LoadOptions) -> Result<Table> {
    log::info!("Loading dataset: {:?}", path);

    if !path.exists() {
        return Err(DataError::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let table = from_reader(file, options)?;

    log::info!(
        "Dataset loaded: {} rows, {} columns",
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

/// Parse delimited text from any reader
pub fn from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(if options.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in csv_reader.records() {
        let record = record?;
        for (column, field) in cells.iter_mut().zip(record.iter()) {
            column.push(field.to_string());
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(cells)
        .map(|(name, values)| Column::from_cells(name, values))
        .collect();

    for column in &columns {
        log::debug!("Column '{}' inferred as {}", column.name, column.column_type());
    }

    Table::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
Month,Sales,Profit,Customers,Expenses
Jan,15000,3000,120,12000
Feb,18000,4200,135,13800
Mar,22000,5500,150,16500
";

    #[test]
    fn test_load_well_formed_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(SAMPLE.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let table = load_csv(temp_file.path(), &LoadOptions::new()).unwrap();

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 5);
        assert_eq!(
            table.column_names(),
            vec!["Month", "Sales", "Profit", "Customers", "Expenses"]
        );
        assert_eq!(table.column("Month").unwrap().column_type(), ColumnType::Text);
        assert_eq!(table.column("Sales").unwrap().column_type(), ColumnType::Integer);
        assert_eq!(table.numeric("Sales").unwrap(), &[15000.0, 18000.0, 22000.0]);
    }

    #[test]
    fn test_missing_file() {
        let result = load_csv(Path::new("definitely_not_here.csv"), &LoadOptions::new());
        assert!(matches!(result, Err(DataError::FileNotFound(_))));
    }

    #[test]
    fn test_ragged_rows_fail() {
        let data = "Month,Sales\nJan,1\nFeb,2,3\n";
        let result = from_reader(data.as_bytes(), &LoadOptions::new());
        assert!(matches!(result, Err(DataError::Csv(_))));
    }

    #[test]
    fn test_custom_delimiter_and_trim() {
        let data = "Month; Sales\n Jan ; 10.5\nFeb;11\n";
        let options = LoadOptions::new().with_delimiter(b';');
        let table = from_reader(data.as_bytes(), &options).unwrap();

        assert_eq!(table.column_names(), vec!["Month", "Sales"]);
        assert_eq!(table.labels("Month").unwrap(), vec!["Jan", "Feb"]);
        assert_eq!(table.column("Sales").unwrap().column_type(), ColumnType::Float);
    }

    #[test]
    fn test_header_only_file() {
        let table = from_reader("Month,Sales\n".as_bytes(), &LoadOptions::new()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 2);
    }
}
