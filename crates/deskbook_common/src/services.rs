// --- File: crates/deskbook_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! The booking logic only ever talks to the ledger through [`LedgerService`],
//! so the Google Sheets client can be swapped for an in-memory grid in tests
//! and local development.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A 1-based cell position in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// A single value to be written into the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub cell: CellRef,
    pub value: String,
}

impl CellUpdate {
    pub fn new(row: u32, col: u32, value: impl Into<String>) -> Self {
        Self {
            cell: CellRef::new(row, col),
            value: value.into(),
        }
    }
}

/// A row/column addressed tabular store holding desk occupancy.
///
/// Implementations make no atomicity promise across calls: a `find` followed
/// by a `write_cells` can race with another writer.
pub trait LedgerService: Send + Sync {
    /// Error type returned by ledger operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Locate the first cell, in row-major order, whose whole value equals `query`.
    fn find(&self, query: &str) -> BoxFuture<'_, Option<CellRef>, Self::Error>;

    /// Read the value of a single cell. Empty cells read as `""`.
    fn read_cell(&self, row: u32, col: u32) -> BoxFuture<'_, String, Self::Error>;

    /// Write all `cells` in one batch.
    fn write_cells(&self, cells: Vec<CellUpdate>) -> BoxFuture<'_, (), Self::Error>;
}

/// Check if a runtime-switchable feature is enabled: the flag must be set and
/// its config section present.
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}
