// --- File: crates/deskbook_sheets/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
pub mod dates;
pub mod doc;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod keys;
#[cfg(test)]
mod keys_proptest;
pub mod logic;
pub mod memory;
pub mod routes;
pub mod service;

pub use handlers::{DeskState, SharedLedger};
pub use logic::{BookingDesk, BookingError, BookingOutcome, BookingRequest, BookingResponse};
pub use memory::InMemoryLedger;
pub use service::{GoogleSheetsLedger, SheetsServiceError};
