// --- File: crates/deskbook_sheets/src/service.rs ---
//! Google Sheets ledger implementation.
//!
//! This module provides an implementation of the LedgerService trait backed by
//! a single worksheet of a Google spreadsheet.

use deskbook_common::services::{BoxFuture, CellRef, CellUpdate, LedgerService};
use google_sheets4::api::{BatchUpdateValuesRequest, Scope, ValueRange};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::auth::HubType;

/// Errors that can occur when talking to a ledger.
#[derive(Error, Debug)]
pub enum SheetsServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_sheets4::Error),
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid cell: row {row}, col {col}")]
    InvalidCell { row: u32, col: u32 },
    #[error("Authentication failed: {0}")]
    Auth(String),
}

/// Converts a 1-based column index into its A1 letters (1 -> A, 27 -> AA).
pub fn column_letters(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// A1 reference for a 1-based cell, qualified with the sheet name.
pub fn a1_range(sheet_name: &str, row: u32, col: u32) -> Result<String, SheetsServiceError> {
    if row == 0 || col == 0 {
        return Err(SheetsServiceError::InvalidCell { row, col });
    }
    Ok(format!(
        "{}!{}{}",
        quote_sheet_name(sheet_name),
        column_letters(col),
        row
    ))
}

fn quote_sheet_name(sheet_name: &str) -> String {
    format!("'{}'", sheet_name.replace('\'', "''"))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// First cell, scanning rows top to bottom and each row left to right,
/// whose whole text equals `query`.
pub fn first_match(values: &[Vec<Value>], query: &str) -> Option<CellRef> {
    values.iter().enumerate().find_map(|(r, row)| {
        row.iter()
            .position(|value| cell_text(value) == query)
            .map(|c| CellRef::new(r as u32 + 1, c as u32 + 1))
    })
}

/// Ledger stored in one worksheet of a Google spreadsheet.
pub struct GoogleSheetsLedger {
    hub: Arc<HubType>,
    spreadsheet_id: String,
    sheet_name: String,
}

impl GoogleSheetsLedger {
    pub fn new(
        hub: Arc<HubType>,
        spreadsheet_id: impl Into<String>,
        sheet_name: impl Into<String>,
    ) -> Self {
        Self {
            hub,
            spreadsheet_id: spreadsheet_id.into(),
            sheet_name: sheet_name.into(),
        }
    }
}

impl LedgerService for GoogleSheetsLedger {
    type Error = SheetsServiceError;

    /// Reads the whole worksheet and scans it locally, the way the Sheets UI
    /// "find" does. Matching is on the formatted cell text.
    fn find(&self, query: &str) -> BoxFuture<'_, Option<CellRef>, Self::Error> {
        let query = query.to_string();
        Box::pin(async move {
            let (_response, value_range) = self
                .hub
                .spreadsheets()
                .values_get(&self.spreadsheet_id, &quote_sheet_name(&self.sheet_name))
                .value_render_option("FORMATTED_VALUE")
                .major_dimension("ROWS")
                .add_scope(Scope::Spreadsheet)
                .doit()
                .await?;

            let values = value_range.values.unwrap_or_default();
            debug!("Scanned {} ledger rows for {:?}", values.len(), query);
            Ok(first_match(&values, &query))
        })
    }

    fn read_cell(&self, row: u32, col: u32) -> BoxFuture<'_, String, Self::Error> {
        Box::pin(async move {
            let range = a1_range(&self.sheet_name, row, col)?;
            let (_response, value_range) = self
                .hub
                .spreadsheets()
                .values_get(&self.spreadsheet_id, &range)
                .value_render_option("FORMATTED_VALUE")
                .add_scope(Scope::Spreadsheet)
                .doit()
                .await?;

            Ok(value_range
                .values
                .and_then(|rows| rows.into_iter().next())
                .and_then(|row| row.into_iter().next())
                .map(|value| cell_text(&value))
                .unwrap_or_default())
        })
    }

    /// Writes every cell in one `values.batchUpdate` call with RAW input, so
    /// keys such as `09/21/22-AM-vacant` are stored verbatim.
    fn write_cells(&self, cells: Vec<CellUpdate>) -> BoxFuture<'_, (), Self::Error> {
        Box::pin(async move {
            let data = cells
                .iter()
                .map(|update| {
                    Ok(ValueRange {
                        range: Some(a1_range(&self.sheet_name, update.cell.row, update.cell.col)?),
                        major_dimension: Some("ROWS".to_string()),
                        values: Some(vec![vec![Value::String(update.value.clone())]]),
                        ..Default::default()
                    })
                })
                .collect::<Result<Vec<_>, SheetsServiceError>>()?;

            let request = BatchUpdateValuesRequest {
                data: Some(data),
                value_input_option: Some("RAW".to_string()),
                ..Default::default()
            };

            self.hub
                .spreadsheets()
                .values_batch_update(request, &self.spreadsheet_id)
                .add_scope(Scope::Spreadsheet)
                .doit()
                .await?;
            Ok(())
        })
    }
}
