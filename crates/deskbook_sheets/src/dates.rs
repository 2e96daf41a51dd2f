// --- File: crates/deskbook_sheets/src/dates.rs ---
//! Date handling for ledger rows.
//!
//! The ledger stores dates as `mm/dd/yy`; users are shown `Wed, 21 Sep 2022`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::logic::BookingError;

/// Format of the date column and of the date part of booking keys.
pub const SHORT_DATE_FORMAT: &str = "%m/%d/%y";

/// Format shown to users in confirmation and error messages.
pub const LONG_DATE_FORMAT: &str = "%a, %d %b %Y";

/// A calendar date as it appears in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LedgerDate(NaiveDate);

impl LedgerDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses a strict `mm/dd/yy` string. Unpadded fields such as `9/21/22`
    /// are rejected because they would never match the ledger's cells.
    pub fn parse_short(short_date: &str) -> Result<Self, BookingError> {
        let date = NaiveDate::parse_from_str(short_date, SHORT_DATE_FORMAT)
            .map_err(|e| BookingError::Format(format!("{:?}: {}", short_date, e)))?;
        let parsed = Self(date);
        if parsed.to_short() != short_date {
            return Err(BookingError::Format(format!(
                "{:?}: expected mm/dd/yy",
                short_date
            )));
        }
        Ok(parsed)
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn to_short(&self) -> String {
        self.0.format(SHORT_DATE_FORMAT).to_string()
    }

    pub fn to_long(&self) -> String {
        self.0.format(LONG_DATE_FORMAT).to_string()
    }
}

impl From<NaiveDate> for LedgerDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for LedgerDate {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_short(s)
    }
}

impl fmt::Display for LedgerDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_short())
    }
}

/// Converts a raw `mm/dd/yy` cell value into the long display form, e.g.
/// `Wed, 21 Sep 2022`.
///
/// String-level entry point for callers holding an unparsed ledger date.
/// Code that already has a [`LedgerDate`] calls [`LedgerDate::to_long`].
pub fn short_to_long(short_date: &str) -> Result<String, BookingError> {
    Ok(LedgerDate::parse_short(short_date)?.to_long())
}
