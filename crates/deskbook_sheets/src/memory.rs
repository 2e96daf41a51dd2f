// --- File: crates/deskbook_sheets/src/memory.rs ---
//! In-memory ledger.
//!
//! Behaves like the worksheet: 1-based addressing, row-major `find`, and the
//! grid grows when a write lands outside it. Used for local development
//! (`use_sheets = false`) and throughout the tests.

use chrono::{Duration, NaiveDate};
use deskbook_common::services::{BoxFuture, CellRef, CellUpdate, LedgerService};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::dates::LedgerDate;
use crate::keys::{BookingKey, KeyOrder, Timeslot, VACANT};
use crate::service::SheetsServiceError;

/// Column layout of a ledger row.
pub mod columns {
    pub const LOCATION: u32 = 1;
    pub const DATE: u32 = 2;
    pub const AM_OCCUPANT: u32 = 3;
    pub const AM_KEY: u32 = 4;
    pub const PM_OCCUPANT: u32 = 5;
    pub const PM_KEY: u32 = 6;
}

/// A fresh row for `location` on `date` with both halves vacant.
pub fn vacant_row(location: &str, date: LedgerDate, order: KeyOrder) -> Vec<String> {
    vec![
        location.to_string(),
        date.to_short(),
        VACANT.to_string(),
        BookingKey::vacancy(date, Timeslot::Am).encode(order),
        VACANT.to_string(),
        BookingKey::vacancy(date, Timeslot::Pm).encode(order),
    ]
}

#[derive(Default)]
pub struct InMemoryLedger {
    rows: Mutex<Vec<Vec<String>>>,
    unavailable: AtomicBool,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: Mutex::new(rows),
            unavailable: AtomicBool::new(false),
        }
    }

    /// One vacant row per desk for each date from `start` through `days` days
    /// later, grouped by date.
    pub fn seed_window(start: NaiveDate, days: u32, desks: &[String], order: KeyOrder) -> Self {
        let rows = (0..=i64::from(days))
            .map(|offset| LedgerDate::new(start + Duration::days(offset)))
            .flat_map(|date| desks.iter().map(move |desk| vacant_row(desk, date, order)))
            .collect();
        Self::from_rows(rows)
    }

    /// Makes every subsequent call fail as if the ledger host were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Copy of the current grid.
    pub fn snapshot(&self) -> Result<Vec<Vec<String>>, SheetsServiceError> {
        Ok(self.lock()?.clone())
    }

    /// Value at a 1-based position, `None` outside the grid.
    pub fn cell(&self, row: u32, col: u32) -> Option<String> {
        let rows = self.rows.lock().ok()?;
        rows.get((row as usize).checked_sub(1)?)?
            .get((col as usize).checked_sub(1)?)
            .cloned()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Vec<String>>>, SheetsServiceError> {
        self.rows
            .lock()
            .map_err(|_| SheetsServiceError::Unavailable("ledger lock poisoned".to_string()))
    }

    fn ensure_available(&self) -> Result<(), SheetsServiceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SheetsServiceError::Unavailable(
                "in-memory ledger switched off".to_string(),
            ));
        }
        Ok(())
    }

    fn find_now(&self, query: &str) -> Result<Option<CellRef>, SheetsServiceError> {
        self.ensure_available()?;
        let rows = self.lock()?;
        Ok(rows.iter().enumerate().find_map(|(r, row)| {
            row.iter()
                .position(|value| value == query)
                .map(|c| CellRef::new(r as u32 + 1, c as u32 + 1))
        }))
    }

    fn read_now(&self, row: u32, col: u32) -> Result<String, SheetsServiceError> {
        self.ensure_available()?;
        if row == 0 || col == 0 {
            return Err(SheetsServiceError::InvalidCell { row, col });
        }
        Ok(self.cell(row, col).unwrap_or_default())
    }

    fn write_now(&self, cells: Vec<CellUpdate>) -> Result<(), SheetsServiceError> {
        self.ensure_available()?;
        // Validate the whole batch first so a bad cell leaves the grid untouched.
        if let Some(bad) = cells.iter().find(|u| u.cell.row == 0 || u.cell.col == 0) {
            return Err(SheetsServiceError::InvalidCell {
                row: bad.cell.row,
                col: bad.cell.col,
            });
        }
        let mut rows = self.lock()?;
        for update in cells {
            let r = update.cell.row as usize - 1;
            let c = update.cell.col as usize - 1;
            if rows.len() <= r {
                rows.resize_with(r + 1, Vec::new);
            }
            let row = &mut rows[r];
            if row.len() <= c {
                row.resize(c + 1, String::new());
            }
            row[c] = update.value;
        }
        Ok(())
    }
}

impl LedgerService for InMemoryLedger {
    type Error = SheetsServiceError;

    fn find(&self, query: &str) -> BoxFuture<'_, Option<CellRef>, Self::Error> {
        let result = self.find_now(query);
        Box::pin(async move { result })
    }

    fn read_cell(&self, row: u32, col: u32) -> BoxFuture<'_, String, Self::Error> {
        let result = self.read_now(row, col);
        Box::pin(async move { result })
    }

    fn write_cells(&self, cells: Vec<CellUpdate>) -> BoxFuture<'_, (), Self::Error> {
        let result = self.write_now(cells);
        Box::pin(async move { result })
    }
}
