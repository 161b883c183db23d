//! Core types for the datavis library
//!
//! This module defines the in-memory Table that every other part of the
//! library reads from. A Table is built once by the loader and never mutated
//! afterwards.

use std::fmt;
use std::path::PathBuf;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading, validating or rendering data
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("File '{}' not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to parse delimited file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Required column missing: {0}")]
    MissingColumn(String),

    #[error("Column '{0}' is not numeric")]
    NotNumeric(String),

    #[error("Column '{0}' does not match the table length")]
    InvalidShape(String),

    #[error("Dataset has no rows")]
    EmptyTable,

    #[error("Failed to render chart: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Storage type of a column, as inferred at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Every present value is a whole number
    Integer,
    /// Numeric with at least one fractional value
    Float,
    /// Anything that failed to parse as a number
    Text,
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ColumnType::Text)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "int64"),
            ColumnType::Float => write!(f, "float64"),
            ColumnType::Text => write!(f, "object"),
        }
    }
}

/// Values of one column. Missing numeric cells are stored as NaN.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric { values: Vec<f64>, integral: bool },
    Text(Vec<String>),
}

/// A named, homogeneously typed column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    /// Build a column from raw cells, inferring whether it is numeric
    pub fn from_cells(name: impl Into<String>, cells: Vec<String>) -> Self {
        let name = name.into();
        let mut values = Vec::with_capacity(cells.len());
        let mut seen_value = false;

        for cell in &cells {
            if cell.is_empty() {
                values.push(f64::NAN);
                continue;
            }
            match cell.parse::<f64>() {
                Ok(v) => {
                    values.push(v);
                    seen_value = true;
                }
                Err(_) => {
                    return Self {
                        name,
                        data: ColumnData::Text(cells),
                    };
                }
            }
        }

        if !seen_value && !cells.is_empty() {
            return Self {
                name,
                data: ColumnData::Text(cells),
            };
        }

        let integral = values.iter().filter(|v| !v.is_nan()).all(|v| v.fract() == 0.0);
        Self {
            name,
            data: ColumnData::Numeric { values, integral },
        }
    }

    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        let integral = values.iter().filter(|v| !v.is_nan()).all(|v| v.fract() == 0.0);
        Self {
            name: name.into(),
            data: ColumnData::Numeric { values, integral },
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric { values, .. } => values.len(),
            ColumnData::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match &self.data {
            ColumnData::Numeric { integral: true, .. } => ColumnType::Integer,
            ColumnData::Numeric { integral: false, .. } => ColumnType::Float,
            ColumnData::Text(_) => ColumnType::Text,
        }
    }

    /// Numeric values, or None for a text column
    pub fn values(&self) -> Option<&[f64]> {
        match &self.data {
            ColumnData::Numeric { values, .. } => Some(values),
            ColumnData::Text(_) => None,
        }
    }

    /// Display form of a single cell
    pub fn cell(&self, row: usize) -> String {
        match &self.data {
            ColumnData::Numeric { values, integral } => match values.get(row) {
                Some(v) if v.is_nan() => "NaN".to_string(),
                Some(v) if *integral => format!("{}", *v as i64),
                Some(v) => format!("{}", v),
                None => String::new(),
            },
            ColumnData::Text(values) => values.get(row).cloned().unwrap_or_default(),
        }
    }
}

/// The loaded dataset: ordered rows stored column-wise
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Create a table from columns of equal length
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        let mut names: Vec<&str> = Vec::with_capacity(columns.len());
        for column in &columns {
            if names.contains(&column.name.as_str()) {
                return Err(DataError::DuplicateColumn(column.name.clone()));
            }
            if column.len() != rows {
                return Err(DataError::InvalidShape(column.name.clone()));
            }
            names.push(&column.name);
        }
        Ok(Self { columns, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Numeric values of a column, with a typed error if absent or text
    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        let column = self
            .column(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))?;
        column
            .values()
            .ok_or_else(|| DataError::NotNumeric(name.to_string()))
    }

    /// Display labels of a column, used for categorical axes
    pub fn labels(&self, name: &str) -> Result<Vec<String>> {
        let column = self
            .column(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))?;
        Ok((0..self.rows).map(|row| column.cell(row)).collect())
    }

    /// All numeric columns in table order
    pub fn numeric_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| c.column_type().is_numeric())
            .collect()
    }
}
