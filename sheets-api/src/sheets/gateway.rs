//! Sheet gateway: the four row operations against the remote sheet

use std::sync::Arc;

use log::{error, info};
use serde::Serialize;

use super::client::SheetClient;
use super::error::{Operation, SheetError};
use super::rows::{Row, RowData, SHEET_NAME, parse_rows, row_range, to_values};
use crate::api::ClientError;

/// Result of appending a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppendedRow {
    pub appended_range: String,
}

/// Result of overwriting a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatedRow {
    pub updated_range: String,
    pub updated_cells: u64,
}

/// Result of clearing a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearedRow {
    pub cleared_range: String,
}

/// Stateless front for row CRUD. Cloning shares the underlying client.
#[derive(Clone)]
pub struct SheetGateway {
    client: Arc<dyn SheetClient>,
}

impl SheetGateway {
    pub fn new(client: Arc<dyn SheetClient>) -> Self {
        Self { client }
    }

    /// All data rows, header excluded. An empty sheet is not an error.
    pub async fn list_rows(&self) -> Result<Vec<Row>, SheetError> {
        let result = self
            .client
            .get_values(SHEET_NAME)
            .await
            .map_err(|e| remote_failure(Operation::List, None, e))?;

        let rows = match result.values {
            Some(grid) if !grid.is_empty() => parse_rows(&grid),
            _ => Vec::new(),
        };

        info!("Successfully retrieved {} rows.", rows.len());
        Ok(rows)
    }

    /// Add a row after the last one; the service picks its row number
    pub async fn append_row(&self, row: &RowData) -> Result<AppendedRow, SheetError> {
        let result = self
            .client
            .append_values(SHEET_NAME, vec![to_values(row)])
            .await
            .map_err(|e| remote_failure(Operation::Append, None, e))?;

        let appended_range = result.updates.updated_range;
        info!("Successfully appended row: {}", appended_range);
        Ok(AppendedRow { appended_range })
    }

    /// Overwrite columns A to C of `row_number`
    pub async fn update_row(&self, row_number: i64, row: &RowData) -> Result<UpdatedRow, SheetError> {
        let range = data_row_range(Operation::Update, row_number)?;

        let result = self
            .client
            .update_values(&range, vec![to_values(row)])
            .await
            .map_err(|e| remote_failure(Operation::Update, Some(row_number), e))?;

        info!("Successfully updated row {}", row_number);
        Ok(UpdatedRow {
            updated_range: range,
            updated_cells: result.updated_cells,
        })
    }

    /// Blank columns A to C of `row_number`. Later rows keep their numbers.
    pub async fn clear_row(&self, row_number: i64) -> Result<ClearedRow, SheetError> {
        let range = data_row_range(Operation::Clear, row_number)?;

        self.client
            .clear_values(&range)
            .await
            .map_err(|e| remote_failure(Operation::Clear, Some(row_number), e))?;

        info!("Successfully cleared row {}", row_number);
        Ok(ClearedRow {
            cleared_range: range,
        })
    }
}

fn data_row_range(operation: Operation, row_number: i64) -> Result<String, SheetError> {
    row_range(row_number).map_err(|_| SheetError::InvalidRowNumber {
        operation,
        row_number,
    })
}

/// Log the full client error, then classify it
fn remote_failure(operation: Operation, row_number: Option<i64>, err: ClientError) -> SheetError {
    let target = row_number.map(|n| format!(" {}", n)).unwrap_or_default();
    match &err {
        ClientError::Status { .. } => {
            error!("Google API HTTP Error {}{}: {}", operation, target, err)
        }
        _ => error!("Unexpected error {}{}: {}", operation, target, err),
    }
    SheetError::from_client(operation, err)
}
