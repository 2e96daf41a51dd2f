// --- File: crates/services/deskbook_backend/src/ledger_factory.rs ---
//! Picks the ledger the booking routes run against.
//!
//! The Google Sheets ledger is used when `use_sheets` is set and a `[sheets]`
//! section is present. Otherwise an in-memory ledger is seeded for today
//! through the booking window, which is what local development runs on.
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use deskbook_common::is_feature_enabled;
use deskbook_config::{AppConfig, BookingConfig};
use deskbook_sheets::auth::create_sheets_hub;
use deskbook_sheets::{GoogleSheetsLedger, InMemoryLedger, SharedLedger, SheetsServiceError};
use std::sync::Arc;
use tracing::{info, warn};

/// Today's date where the office is.
pub fn office_today(booking: &BookingConfig) -> NaiveDate {
    let tz = booking.time_zone.parse::<Tz>().unwrap_or_else(|e| {
        warn!(
            "Unknown time zone {:?} ({}), using UTC",
            booking.time_zone, e
        );
        Tz::UTC
    });
    Utc::now().with_timezone(&tz).date_naive()
}

pub fn memory_ledger(booking: &BookingConfig, today: NaiveDate) -> InMemoryLedger {
    info!(
        "Seeding in-memory ledger from {} for {} days with {} desks",
        today,
        booking.window_days,
        booking.memory_desks.len()
    );
    InMemoryLedger::seed_window(
        today,
        booking.window_days,
        &booking.memory_desks,
        booking.key_order,
    )
}

pub async fn build_ledger(config: &AppConfig) -> Result<Arc<SharedLedger>, SheetsServiceError> {
    match config.sheets.as_ref() {
        Some(sheets) if is_feature_enabled(config.use_sheets, Some(sheets)) => {
            info!(
                "Initializing Google Sheets ledger {} ({})",
                sheets.spreadsheet_id, sheets.sheet_name
            );
            let hub = create_sheets_hub(sheets)
                .await
                .map_err(|e| SheetsServiceError::Auth(e.to_string()))?;
            Ok(Arc::new(GoogleSheetsLedger::new(
                Arc::new(hub),
                sheets.spreadsheet_id.clone(),
                sheets.sheet_name.clone(),
            )))
        }
        _ => {
            if config.use_sheets {
                warn!("use_sheets is set but the [sheets] section is missing");
            }
            let today = office_today(&config.booking);
            Ok(Arc::new(memory_ledger(&config.booking, today)))
        }
    }
}
