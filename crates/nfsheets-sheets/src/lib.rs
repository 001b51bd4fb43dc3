//! Client for the Google Sheets v4 REST API.
//!
//! Scope is exactly what the sync pipeline needs: authenticate as a
//! service account, push a batch of cell values, and push a batch of
//! cell-format requests. Everything else the API offers is out of scope.

pub mod auth;
pub mod client;
pub mod credentials;
pub mod error;
pub mod types;

pub use client::SheetsClient;
pub use credentials::ServiceAccountKey;
pub use error::SheetsError;
pub use types::{
    CellFormat, Color, GridRange, Request, RepeatCellRequest, ValueRange, USER_ENTERED,
};
