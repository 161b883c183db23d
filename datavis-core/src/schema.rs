//! The business schema every chart and the report are built over

use crate::types::{DataError, Result, Table};

pub const MONTH: &str = "Month";
pub const SALES: &str = "Sales";
pub const PROFIT: &str = "Profit";
pub const CUSTOMERS: &str = "Customers";
pub const EXPENSES: &str = "Expenses";

/// Columns that must hold numbers
pub const NUMERIC_COLUMNS: [&str; 4] = [SALES, PROFIT, CUSTOMERS, EXPENSES];

/// Check that the table carries the expected columns with the expected types.
/// Extra columns are allowed.
pub fn validate(table: &Table) -> Result<()> {
    if table.column(MONTH).is_none() {
        return Err(DataError::MissingColumn(MONTH.to_string()));
    }
    for name in NUMERIC_COLUMNS {
        table.numeric(name)?;
    }
    log::debug!("Schema validated for {} columns", table.column_count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadOptions;
    use crate::loader::from_reader;

    #[test]
    fn test_valid_schema_with_extra_column() {
        let data = "Month,Sales,Profit,Customers,Expenses,Region\nJan,1,2,3,4,North\n";
        let table = from_reader(data.as_bytes(), &LoadOptions::new()).unwrap();
        assert!(validate(&table).is_ok());
    }

    #[test]
    fn test_missing_month() {
        let data = "Sales,Profit,Customers,Expenses\n1,2,3,4\n";
        let table = from_reader(data.as_bytes(), &LoadOptions::new()).unwrap();
        match validate(&table) {
            Err(DataError::MissingColumn(name)) => assert_eq!(name, "Month"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_sales() {
        let data = "Month,Sales,Profit,Customers,Expenses\nJan,lots,2,3,4\n";
        let table = from_reader(data.as_bytes(), &LoadOptions::new()).unwrap();
        match validate(&table) {
            Err(DataError::NotNumeric(name)) => assert_eq!(name, "Sales"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
