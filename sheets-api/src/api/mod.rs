//! Google Sheets API Module
//!
//! Talks to the Sheets v4 REST API on behalf of a service account: token
//! handling, the `spreadsheets.values` endpoints and their wire models.

pub mod auth;
pub mod client;
pub mod constants;
pub mod error;
pub mod models;

pub use client::SheetsClient;
pub use error::ClientError;
pub use models::{AppendValuesResponse, ClearValuesResponse, UpdateValuesResponse, ValueRange};
