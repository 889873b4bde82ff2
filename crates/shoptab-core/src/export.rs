//! CSV and split-orientation JSON export of a [`ResultTable`].
//!
//! Both writes are full-file overwrites. CSV cells hold scalars in their
//! plain form and JSON-encode arrays/objects; the JSON export keeps every
//! value native.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::table::ResultTable;

/// Split-orientation JSON form of a table: separate `columns` and
/// row-major `data` arrays, no row index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitTable {
    pub columns: Vec<String>,
    pub data: Vec<Vec<Value>>,
}

impl From<&ResultTable> for SplitTable {
    fn from(table: &ResultTable) -> Self {
        Self {
            columns: table.columns().to_vec(),
            data: table.rows().to_vec(),
        }
    }
}

/// Write both export files. No partial-success mode: the first failure
/// aborts and is reported with the offending path.
pub fn export(table: &ResultTable, csv_path: &Path, json_path: &Path) -> Result<(), AppError> {
    write_csv(table, csv_path)?;
    write_json(table, json_path)?;
    Ok(())
}

/// Write the table as CSV: header row of column names, one line per row,
/// standard quoting for embedded commas and quotes.
pub fn write_csv(table: &ResultTable, path: &Path) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| write_error(path, e))?;

    writer
        .write_record(table.columns())
        .map_err(|e| write_error(path, e))?;
    for row in table.rows() {
        let record: Vec<String> = row.iter().map(cell_to_string).collect();
        writer.write_record(&record).map_err(|e| write_error(path, e))?;
    }
    writer.flush().map_err(|e| write_error(path, e))?;
    Ok(())
}

/// Write the table as split-orientation JSON.
pub fn write_json(table: &ResultTable, path: &Path) -> Result<(), AppError> {
    let split = SplitTable::from(table);
    let body = serde_json::to_string(&split)?;
    std::fs::write(path, body).map_err(|e| write_error(path, e))?;
    Ok(())
}

/// Render one cell as plain text: strings bare, scalars in their JSON
/// form, arrays/objects JSON-encoded, null empty. Used for CSV cells and
/// console output.
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
        other => other.to_string(),
    }
}

fn write_error(path: &Path, err: impl std::fmt::Display) -> AppError {
    AppError::FileWriteError {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
