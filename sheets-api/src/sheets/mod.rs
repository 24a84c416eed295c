//! Spreadsheet rows as CRUD resources
//!
//! `rows` maps between raw cell grids and typed records, `gateway` runs the
//! four row operations through a [`SheetClient`].

pub mod client;
pub mod error;
pub mod gateway;
#[cfg(test)]
pub mod memory;
pub mod rows;

pub use client::SheetClient;
pub use error::SheetError;
pub use gateway::{AppendedRow, ClearedRow, SheetGateway, UpdatedRow};
pub use rows::{Row, RowData};
