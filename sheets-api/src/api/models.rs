//! Wire models for the Sheets v4 `spreadsheets.values` endpoints

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A raw grid of cell values, row-major, as the API reports them
pub type Grid = Vec<Vec<String>>;

/// Response of `values.get`
///
/// `values` is absent entirely when the range holds no data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_grid")]
    pub values: Option<Grid>,
}

/// Request body for `values.append` and `values.update`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRangeBody<'a> {
    pub range: &'a str,
    pub major_dimension: &'static str,
    pub values: &'a [Vec<Value>],
}

/// Response of `values.append`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendValuesResponse {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub table_range: Option<String>,
    #[serde(default)]
    pub updates: UpdateValuesResponse,
}

/// Response of `values.update`, also nested in append responses
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    #[serde(default)]
    pub updated_range: String,
    #[serde(default)]
    pub updated_rows: u64,
    #[serde(default)]
    pub updated_columns: u64,
    #[serde(default)]
    pub updated_cells: u64,
}

/// Response of `values.clear`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearValuesResponse {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub cleared_range: String,
}

/// Error payload returned by Google APIs on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorBody {
    pub error: GoogleErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorDetail {
    #[serde(default)]
    pub message: String,
}

/// Cells normally arrive as strings, but numbers and booleans show up when a
/// different render option is in play. Flatten them all to text.
fn deserialize_grid<'de, D>(deserializer: D) -> Result<Option<Grid>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<Vec<Vec<Value>>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|rows| {
        rows.into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }))
}

fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_range_without_values() {
        let parsed: ValueRange =
            serde_json::from_value(json!({"range": "Sheet1!A1:Z1000", "majorDimension": "ROWS"}))
                .unwrap();
        assert_eq!(parsed.range, "Sheet1!A1:Z1000");
        assert!(parsed.values.is_none());
    }

    #[test]
    fn test_value_range_flattens_non_string_cells() {
        let parsed: ValueRange = serde_json::from_value(json!({
            "range": "Sheet1!A1:C2",
            "values": [["Name", "Email", "Age"], ["Alice", "a@x.com", 30]]
        }))
        .unwrap();
        let values = parsed.values.unwrap();
        assert_eq!(values[1], vec!["Alice", "a@x.com", "30"]);
    }

    #[test]
    fn test_append_response_nested_updates() {
        let parsed: AppendValuesResponse = serde_json::from_value(json!({
            "spreadsheetId": "abc",
            "tableRange": "Sheet1!A1:C2",
            "updates": {
                "spreadsheetId": "abc",
                "updatedRange": "Sheet1!A3:C3",
                "updatedRows": 1,
                "updatedColumns": 3,
                "updatedCells": 3
            }
        }))
        .unwrap();
        assert_eq!(parsed.updates.updated_range, "Sheet1!A3:C3");
        assert_eq!(parsed.updates.updated_cells, 3);
    }

    #[test]
    fn test_append_response_missing_updates_defaults() {
        let parsed: AppendValuesResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(parsed.updates.updated_range, "");
    }

    #[test]
    fn test_google_error_body() {
        let parsed: GoogleErrorBody = serde_json::from_value(json!({
            "error": {
                "code": 403,
                "message": "The caller does not have permission",
                "status": "PERMISSION_DENIED"
            }
        }))
        .unwrap();
        assert_eq!(parsed.error.message, "The caller does not have permission");
    }
}
