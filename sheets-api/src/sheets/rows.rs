//! Row mapping between the raw cell grid and typed records
//!
//! Sheet layout is fixed: `Sheet1`, header in row 1, then one record per row
//! in columns A (name), B (email) and C (age).

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// The only sheet this service reads and writes
pub const SHEET_NAME: &str = "Sheet1";

/// First row holding data; row 1 is the header
pub const FIRST_DATA_ROW: i64 = 2;

/// Column indices within a data row
mod cols {
    pub const NAME: usize = 0;
    pub const EMAIL: usize = 1;
    pub const AGE: usize = 2;
}

/// A record as stored on the sheet, with its visible row number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub row_number: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Record fields without a position, as clients send them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowData {
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Row numbers below [`FIRST_DATA_ROW`] address the header or nothing at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("row {0} is not a data row (data starts at row 2)")]
pub struct InvalidRowNumber(pub i64);

/// Turn a raw grid (header first) into records numbered from row 2.
///
/// Short rows are padded: missing name/email become "", a missing or
/// non-integer age becomes 0.
pub fn parse_rows(grid: &[Vec<String>]) -> Vec<Row> {
    grid.iter()
        .skip(1)
        .enumerate()
        .map(|(i, cells)| Row {
            row_number: i as i64 + FIRST_DATA_ROW,
            name: get_cell_string(cells, cols::NAME),
            email: get_cell_string(cells, cols::EMAIL),
            age: get_cell_int(cells, cols::AGE).unwrap_or(0),
        })
        .collect()
}

/// A1 range covering columns A to C of one row, e.g. `Sheet1!A2:C2`
pub fn row_range(row_number: i64) -> Result<String, InvalidRowNumber> {
    if row_number < FIRST_DATA_ROW {
        return Err(InvalidRowNumber(row_number));
    }
    Ok(format!("{}!A{}:C{}", SHEET_NAME, row_number, row_number))
}

/// Cell values for one row in column order; age stays numeric
pub fn to_values(row: &RowData) -> Vec<Value> {
    vec![json!(row.name), json!(row.email), json!(row.age)]
}

fn get_cell_string(cells: &[String], idx: usize) -> String {
    cells.get(idx).cloned().unwrap_or_default()
}

fn get_cell_int(cells: &[String], idx: usize) -> Option<i64> {
    cells.get(idx).and_then(|c| c.trim().parse::<i64>().ok())
}
