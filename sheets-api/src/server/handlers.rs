//! Route handlers for the `/api/v1` surface

use axum::extract::State;
use serde_json::json;

use super::AppState;
use super::response::{ApiError, ApiResponse};
use super::validation::{RowNumber, ValidRow};
use crate::sheets::{AppendedRow, ClearedRow, Row, UpdatedRow};

/// GET /health
pub async fn health_check() -> ApiResponse<serde_json::Value> {
    ApiResponse::success(json!({"status": "healthy"}), "API is up and running")
}

/// GET /data
pub async fn read_data(State(state): State<AppState>) -> Result<ApiResponse<Vec<Row>>, ApiError> {
    let rows = state.gateway.list_rows().await?;
    Ok(ApiResponse::success(rows, "Successfully retrieved data"))
}

/// POST /data
pub async fn create_data(
    State(state): State<AppState>,
    ValidRow(row): ValidRow,
) -> Result<ApiResponse<AppendedRow>, ApiError> {
    let result = state.gateway.append_row(&row).await?;
    Ok(ApiResponse::success(result, "Successfully added new row"))
}

/// PUT /data/{row_number}
pub async fn modify_data(
    State(state): State<AppState>,
    RowNumber(row_number): RowNumber,
    ValidRow(row): ValidRow,
) -> Result<ApiResponse<UpdatedRow>, ApiError> {
    let result = state.gateway.update_row(row_number, &row).await?;
    Ok(ApiResponse::success(
        result,
        format!("Successfully updated row {}", row_number),
    ))
}

/// DELETE /data/{row_number}
///
/// Clears the row's cells; the row itself stays and nothing below it moves.
pub async fn remove_data(
    State(state): State<AppState>,
    RowNumber(row_number): RowNumber,
) -> Result<ApiResponse<ClearedRow>, ApiError> {
    let result = state.gateway.clear_row(row_number).await?;
    Ok(ApiResponse::success(
        result,
        format!("Successfully cleared row {}", row_number),
    ))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
