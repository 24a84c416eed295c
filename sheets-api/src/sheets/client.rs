//! Capability seam between the gateway and whatever stores the cells

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{
    AppendValuesResponse, ClearValuesResponse, ClientError, UpdateValuesResponse, ValueRange,
};

/// Range-based access to one spreadsheet.
///
/// One call is one round trip; implementations never retry. Shared across
/// request handlers behind an `Arc`, so it must be `Send + Sync`.
#[async_trait]
pub trait SheetClient: Send + Sync {
    /// Read every value in `range`
    async fn get_values(&self, range: &str) -> Result<ValueRange, ClientError>;

    /// Insert `values` as new rows after the table found in `range`
    async fn append_values(
        &self,
        range: &str,
        values: Vec<Vec<Value>>,
    ) -> Result<AppendValuesResponse, ClientError>;

    /// Overwrite the cells of `range` with `values`
    async fn update_values(
        &self,
        range: &str,
        values: Vec<Vec<Value>>,
    ) -> Result<UpdateValuesResponse, ClientError>;

    /// Blank the contents of `range`, leaving the rows in place
    async fn clear_values(&self, range: &str) -> Result<ClearValuesResponse, ClientError>;
}
