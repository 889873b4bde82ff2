use serde_json::Value;

use crate::error::AppError;

/// An ordered table of extracted records: a shared column list plus rows of
/// cells in column order.
///
/// Rows are append-only; extraction order follows the order items appear in
/// the upstream response. Every row must have exactly one cell per column,
/// enforced at push time.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ResultTable {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row. Fails if the cell count does not match the column list.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), AppError> {
        if row.len() != self.columns.len() {
            return Err(AppError::ResponseFormatError(format!(
                "row has {} cells, expected {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }
}
