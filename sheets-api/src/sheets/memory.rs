//! In-memory [`SheetClient`] for tests
//!
//! Mimics how the Sheets API treats `Sheet1`: reads trim trailing blanks and
//! omit `values` for an empty sheet, appends land after the last non-empty
//! row. Only whole-sheet and single-row `A{n}:C{n}` ranges are understood.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::client::SheetClient;
use super::rows::SHEET_NAME;
use crate::api::{
    AppendValuesResponse, ClearValuesResponse, ClientError, UpdateValuesResponse, ValueRange,
};

/// A call the fake received, for asserting on what the gateway sent
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Get { range: String },
    Append { range: String, values: Vec<Vec<Value>> },
    Update { range: String, values: Vec<Vec<Value>> },
    Clear { range: String },
}

#[derive(Debug, Default)]
pub struct InMemorySheet {
    grid: Mutex<Vec<Vec<String>>>,
    calls: Mutex<Vec<RecordedCall>>,
    fail_next: Mutex<Option<ClientError>>,
}

impl InMemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: &[&[&str]]) -> Self {
        let sheet = Self::new();
        *sheet.grid.lock().unwrap() = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        sheet
    }

    /// Make the next call fail with `err` instead of touching the grid
    pub fn fail_next(&self, err: ClientError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Cells of a 1-based row with trailing blanks removed
    pub fn row(&self, row_number: usize) -> Vec<String> {
        let grid = self.grid.lock().unwrap();
        grid.get(row_number - 1)
            .map(|r| trim_row(r))
            .unwrap_or_default()
    }

    fn record(&self, call: RecordedCall) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn trimmed_grid(&self) -> Vec<Vec<String>> {
        let mut rows: Vec<Vec<String>> = self.grid.lock().unwrap().iter().map(|r| trim_row(r)).collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        rows
    }

    fn write_row(&self, row_number: usize, values: &[Value]) {
        let mut grid = self.grid.lock().unwrap();
        if grid.len() < row_number {
            grid.resize(row_number, Vec::new());
        }
        let row = &mut grid[row_number - 1];
        if row.len() < values.len() {
            row.resize(values.len(), String::new());
        }
        for (cell, value) in row.iter_mut().zip(values) {
            *cell = value_to_cell(value);
        }
    }
}

fn trim_row(row: &[String]) -> Vec<String> {
    let end = row
        .iter()
        .rposition(|c| !c.is_empty())
        .map(|i| i + 1)
        .unwrap_or(0);
    row[..end].to_vec()
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Row number of a `Sheet1!A{n}:C{n}` range
fn single_row(range: &str) -> Result<usize, ClientError> {
    let invalid = || ClientError::Status {
        status: 400,
        reason: format!("Unable to parse range: {}", range),
    };
    let rest = range
        .strip_prefix(SHEET_NAME)
        .and_then(|r| r.strip_prefix("!A"))
        .ok_or_else(invalid)?;
    let (start, end) = rest.split_once(":C").ok_or_else(invalid)?;
    match (start.parse::<usize>(), end.parse::<usize>()) {
        (Ok(a), Ok(b)) if a == b && a > 0 => Ok(a),
        _ => Err(invalid()),
    }
}

fn row_label(row_number: usize) -> String {
    format!("{}!A{}:C{}", SHEET_NAME, row_number, row_number)
}

#[async_trait]
impl SheetClient for InMemorySheet {
    async fn get_values(&self, range: &str) -> Result<ValueRange, ClientError> {
        self.record(RecordedCall::Get {
            range: range.to_string(),
        })?;

        let rows = self.trimmed_grid();
        Ok(ValueRange {
            range: format!("{}!A1:Z1000", SHEET_NAME),
            major_dimension: Some("ROWS".to_string()),
            values: if rows.is_empty() { None } else { Some(rows) },
        })
    }

    async fn append_values(
        &self,
        range: &str,
        values: Vec<Vec<Value>>,
    ) -> Result<AppendValuesResponse, ClientError> {
        self.record(RecordedCall::Append {
            range: range.to_string(),
            values: values.clone(),
        })?;

        let first = self.trimmed_grid().len() + 1;
        for (offset, row) in values.iter().enumerate() {
            self.write_row(first + offset, row);
        }
        let last = first + values.len().saturating_sub(1);
        let cells: usize = values.iter().map(Vec::len).sum();

        Ok(AppendValuesResponse {
            spreadsheet_id: "in-memory".to_string(),
            table_range: Some(format!("{}!A1:C{}", SHEET_NAME, first - 1)),
            updates: UpdateValuesResponse {
                updated_range: format!("{}!A{}:C{}", SHEET_NAME, first, last),
                updated_rows: values.len() as u64,
                updated_columns: values.first().map(Vec::len).unwrap_or(0) as u64,
                updated_cells: cells as u64,
            },
        })
    }

    async fn update_values(
        &self,
        range: &str,
        values: Vec<Vec<Value>>,
    ) -> Result<UpdateValuesResponse, ClientError> {
        self.record(RecordedCall::Update {
            range: range.to_string(),
            values: values.clone(),
        })?;

        let row_number = single_row(range)?;
        let row = values.first().cloned().unwrap_or_default();
        self.write_row(row_number, &row);

        Ok(UpdateValuesResponse {
            updated_range: row_label(row_number),
            updated_rows: 1,
            updated_columns: row.len() as u64,
            updated_cells: row.len() as u64,
        })
    }

    async fn clear_values(&self, range: &str) -> Result<ClearValuesResponse, ClientError> {
        self.record(RecordedCall::Clear {
            range: range.to_string(),
        })?;

        let row_number = single_row(range)?;
        {
            let mut grid = self.grid.lock().unwrap();
            if let Some(row) = grid.get_mut(row_number - 1) {
                for cell in row.iter_mut().take(3) {
                    cell.clear();
                }
            }
        }

        Ok(ClearValuesResponse {
            spreadsheet_id: "in-memory".to_string(),
            cleared_range: row_label(row_number),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row_parsing() {
        assert_eq!(single_row("Sheet1!A2:C2").unwrap(), 2);
        assert!(single_row("Sheet1!A2:C3").is_err());
        assert!(single_row("Sheet2!A2:C2").is_err());
        assert!(single_row("Sheet1").is_err());
    }

    #[tokio::test]
    async fn test_cleared_trailing_row_is_trimmed() {
        let sheet = InMemorySheet::with_rows(&[&["Name", "Email", "Age"], &["A", "a@x.com", "3"]]);
        sheet.clear_values("Sheet1!A2:C2").await.unwrap();

        let read = sheet.get_values("Sheet1").await.unwrap();
        assert_eq!(read.values.unwrap().len(), 1);

        // Appends reuse the now-empty trailing row, as the real service does
        let appended = sheet
            .append_values("Sheet1", vec![vec![Value::from("B")]])
            .await
            .unwrap();
        assert_eq!(appended.updates.updated_range, "Sheet1!A2:C2");
    }
}
