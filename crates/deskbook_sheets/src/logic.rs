// --- File: crates/deskbook_sheets/src/logic.rs ---
use crate::dates::LedgerDate;
use crate::keys::{BookingKey, KeyOrder, Timeslot, VACANT};
use deskbook_common::services::{CellRef, CellUpdate, LedgerService};
use deskbook_common::{external_service_error, internal_error, validation_error, DeskbookError};
use deskbook_config::{BookingConfig, LedgerErrorPolicy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid format: {0}")]
    Format(String),
    #[error("Ledger unavailable: {0}")]
    LedgerUnavailable(String),
    #[error("Half-day booking requires AM or PM, got {0}")]
    NotHalfDay(Timeslot),
    #[error("Ledger layout error: {0}")]
    Layout(String),
}

impl From<BookingError> for DeskbookError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Format(_) | BookingError::NotHalfDay(_) => validation_error(err),
            BookingError::LedgerUnavailable(msg) => external_service_error("ledger", msg),
            BookingError::Layout(_) => internal_error(err),
        }
    }
}

fn ledger_fault<E: std::fmt::Display>(err: E) -> BookingError {
    BookingError::LedgerUnavailable(err.to_string())
}

/// Column holding the desk label on every ledger row.
pub const LOCATION_COLUMN: u32 = 1;

// --- Data Structures ---

/// One booking attempt by an authenticated staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub identity: String,
    pub date: LedgerDate,
    pub slot: Timeslot,
}

/// Request-scoped result of a booking attempt. None of these are failures of
/// the service itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// One location for a half day, two (AM then PM) for a whole day.
    Booked { locations: Vec<String> },
    Duplicate,
    InvalidDate,
    NoVacancy,
}

impl BookingOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BookingOutcome::Booked { .. })
    }

    /// User-facing message for this outcome.
    pub fn message(&self, request: &BookingRequest, window_days: u32) -> String {
        let long_date = request.date.to_long();
        match self {
            BookingOutcome::Booked { locations } => format!(
                "Success! Booked you a desk for {}, {}",
                long_date,
                format_locations(locations, request.slot)
            ),
            BookingOutcome::Duplicate => format!(
                "ERROR: Duplicate booking found for your requested reservation on {} ({})",
                long_date, request.slot
            ),
            BookingOutcome::InvalidDate => format!(
                "ERROR: Your requested date {} is not a valid booking date - acceptable dates are from today to {} days ahead only",
                long_date, window_days
            ),
            BookingOutcome::NoVacancy => format!(
                "ERROR: Sorry, no more desks available for {} ({})",
                long_date, request.slot
            ),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingResponse {
    pub success: bool,
    #[cfg_attr(
        feature = "openapi",
        schema(example = "Success! Booked you a desk for Wed, 21 Sep 2022, Desk 1 whole day")
    )]
    pub message: String,
    pub locations: Vec<String>,
}

impl BookingResponse {
    pub fn from_outcome(
        outcome: &BookingOutcome,
        request: &BookingRequest,
        window_days: u32,
    ) -> Self {
        let locations = match outcome {
            BookingOutcome::Booked { locations } => locations.clone(),
            _ => Vec::new(),
        };
        Self {
            success: outcome.is_success(),
            message: outcome.message(request, window_days),
            locations,
        }
    }
}

// --- Location Formatting ---

/// Renders assigned desks for the confirmation message.
///
/// `["A", "A"]` becomes `A whole day`, `["A", "B"]` becomes `A (AM), B (PM)`
/// and `["C"]` becomes `C (<slot>)`.
pub fn format_locations(locations: &[String], slot: Timeslot) -> String {
    match locations {
        [am, pm] if am == pm => format!("{} whole day", am),
        [am, pm] => format!("{} (AM), {} (PM)", am, pm),
        [single] => format!("{} ({})", single, slot),
        _ => locations.join(", "),
    }
}

// --- Booking Logic ---

/// Booking operations against a ledger.
///
/// There is no lock between finding a vacant cell and writing it: two
/// requests that find the same vacancy will both write, and the later write
/// wins the cell.
pub struct BookingDesk<L: ?Sized> {
    ledger: Arc<L>,
    key_order: KeyOrder,
    error_policy: LedgerErrorPolicy,
    window_days: u32,
}

impl<L> BookingDesk<L>
where
    L: LedgerService + ?Sized,
{
    pub fn new(ledger: Arc<L>, config: &BookingConfig) -> Self {
        Self {
            ledger,
            key_order: config.key_order,
            error_policy: config.ledger_error_policy,
            window_days: config.window_days,
        }
    }

    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    async fn find_key(&self, key: &BookingKey) -> Result<Option<CellRef>, BookingError> {
        let encoded = key.encode(self.key_order);
        let found = self.ledger.find(&encoded).await.map_err(ledger_fault)?;
        debug!("find {:?} -> {:?}", encoded, found);
        Ok(found)
    }

    /// Whether `identity` already holds `slot` on `date`, or a slot that overlaps it.
    ///
    /// A half-day request is blocked by the same half or by a whole-day key;
    /// a whole-day request is blocked by either half or a whole-day key.
    /// If the ledger cannot be read the configured [`LedgerErrorPolicy`]
    /// decides the answer.
    pub async fn has_existing_booking(
        &self,
        identity: &str,
        date: LedgerDate,
        slot: Timeslot,
    ) -> bool {
        for candidate in slot.overlapping() {
            let key = BookingKey::new(identity, date, *candidate);
            match self.find_key(&key).await {
                Ok(Some(_)) => return true,
                Ok(None) => continue,
                Err(e) => {
                    let assume_booked = self.error_policy == LedgerErrorPolicy::FailClosed;
                    warn!(
                        "Duplicate check for {} on {} ({}) could not reach the ledger, assuming {}: {}",
                        identity,
                        date,
                        slot,
                        if assume_booked { "booked" } else { "not booked" },
                        e
                    );
                    return assume_booked;
                }
            }
        }
        false
    }

    /// True iff the ledger has a row for `date`. The ledger's populated rows
    /// are the booking window.
    pub async fn is_bookable_date(&self, date: LedgerDate) -> Result<bool, BookingError> {
        let found = self
            .ledger
            .find(&date.to_short())
            .await
            .map_err(ledger_fault)?;
        Ok(found.is_some())
    }

    /// The identity cell sits directly left of its key cell and must never be
    /// the location column.
    fn claim(
        &self,
        cell: CellRef,
        identity: &str,
        date: LedgerDate,
        slot: Timeslot,
    ) -> Result<Vec<CellUpdate>, BookingError> {
        if cell.col <= LOCATION_COLUMN + 1 {
            return Err(BookingError::Layout(format!(
                "vacancy key at row {} col {} leaves no occupant column right of the location",
                cell.row, cell.col
            )));
        }
        let key = BookingKey::new(identity, date, slot).encode(self.key_order);
        Ok(vec![
            CellUpdate::new(cell.row, cell.col - 1, identity),
            CellUpdate::new(cell.row, cell.col, key),
        ])
    }

    async fn location_of(&self, cell: CellRef) -> Result<String, BookingError> {
        self.ledger
            .read_cell(cell.row, LOCATION_COLUMN)
            .await
            .map_err(ledger_fault)
    }

    async fn write(&self, updates: Vec<CellUpdate>) -> Result<(), BookingError> {
        self.ledger.write_cells(updates).await.map_err(|e| {
            error!("Ledger write failed, ledger state may be partial: {}", e);
            ledger_fault(e)
        })
    }

    /// Books the first vacant desk for a morning or afternoon.
    ///
    /// Returns the desk label, or an empty list when no desk is vacant.
    pub async fn book_half_day(
        &self,
        identity: &str,
        date: LedgerDate,
        slot: Timeslot,
    ) -> Result<Vec<String>, BookingError> {
        if slot == Timeslot::AmPm {
            return Err(BookingError::NotHalfDay(slot));
        }
        let Some(cell) = self.find_key(&BookingKey::vacancy(date, slot)).await? else {
            return Ok(Vec::new());
        };
        let updates = self.claim(cell, identity, date, slot)?;
        self.write(updates).await?;
        let location = self.location_of(cell).await?;
        info!("Booked {} for {} on {} ({})", location, identity, date, slot);
        Ok(vec![location])
    }

    /// Books a morning and an afternoon desk, possibly different ones.
    ///
    /// Both vacancies are located before anything is written, so when either
    /// half is full the ledger is left untouched and an empty list is returned.
    pub async fn book_whole_day(
        &self,
        identity: &str,
        date: LedgerDate,
    ) -> Result<Vec<String>, BookingError> {
        let am_vacancy = BookingKey::vacancy(date, Timeslot::Am);
        let Some(am_cell) = self.find_key(&am_vacancy).await? else {
            return Ok(Vec::new());
        };
        // AM is only written once PM is known to be free as well.
        let pm_vacancy = BookingKey::vacancy(date, Timeslot::Pm);
        let Some(pm_cell) = self.find_key(&pm_vacancy).await? else {
            return Ok(Vec::new());
        };

        let am_updates = self.claim(am_cell, identity, date, Timeslot::Am)?;
        let pm_updates = self.claim(pm_cell, identity, date, Timeslot::Pm)?;
        self.write(am_updates).await?;
        self.write(pm_updates).await?;

        let am_location = self.location_of(am_cell).await?;
        let pm_location = self.location_of(pm_cell).await?;
        info!(
            "Booked {} (AM) and {} (PM) for {} on {}",
            am_location, pm_location, identity, date
        );
        Ok(vec![am_location, pm_location])
    }

    /// Runs a booking request end to end: duplicate check, date check, allocation.
    pub async fn process_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingOutcome, BookingError> {
        info!(
            "Booking request {}/{}/{}",
            request.identity, request.date, request.slot
        );
        if request.identity.is_empty() || request.identity == VACANT {
            return Err(BookingError::Format(format!(
                "{:?} cannot hold a booking",
                request.identity
            )));
        }

        if self
            .has_existing_booking(&request.identity, request.date, request.slot)
            .await
        {
            return Ok(BookingOutcome::Duplicate);
        }
        if !self.is_bookable_date(request.date).await? {
            return Ok(BookingOutcome::InvalidDate);
        }

        let locations = match request.slot {
            Timeslot::AmPm => self.book_whole_day(&request.identity, request.date).await?,
            half => self.book_half_day(&request.identity, request.date, half).await?,
        };
        if locations.is_empty() {
            Ok(BookingOutcome::NoVacancy)
        } else {
            Ok(BookingOutcome::Booked { locations })
        }
    }
}
