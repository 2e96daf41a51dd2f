// --- File: crates/deskbook_sheets/src/keys.rs ---
//! Booking keys: the strings written into ledger cells and searched for.
//!
//! A key is kept typed everywhere in this crate and is only turned into a
//! string at the ledger boundary, using the single [`KeyOrder`] the ledger was
//! set up with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use deskbook_config::KeyOrder;

use crate::dates::LedgerDate;
use crate::logic::BookingError;

/// Identity written into a slot that nobody holds yet.
pub const VACANT: &str = "vacant";

const SEPARATOR: char = '-';

/// Half-day or whole-day booking unit.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeslot {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
    /// Whole day. Occupies one AM cell and one PM cell, not a column of its own.
    #[default]
    #[serde(rename = "AMPM")]
    AmPm,
}

impl Timeslot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeslot::Am => "AM",
            Timeslot::Pm => "PM",
            Timeslot::AmPm => "AMPM",
        }
    }

    /// Keys that, if held by the requester, make a request for `self` a duplicate.
    /// Order is the order they are searched in.
    pub fn overlapping(&self) -> &'static [Timeslot] {
        match self {
            Timeslot::Am => &[Timeslot::Am, Timeslot::AmPm],
            Timeslot::Pm => &[Timeslot::Pm, Timeslot::AmPm],
            Timeslot::AmPm => &[Timeslot::Am, Timeslot::Pm, Timeslot::AmPm],
        }
    }
}

impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeslot {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AM" => Ok(Timeslot::Am),
            "PM" => Ok(Timeslot::Pm),
            "AMPM" => Ok(Timeslot::AmPm),
            other => Err(BookingError::Format(format!("unknown timeslot {:?}", other))),
        }
    }
}

/// `(identity, date, slot)` as stored in a ledger key cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookingKey {
    identity: String,
    date: LedgerDate,
    slot: Timeslot,
}

impl BookingKey {
    pub fn new(identity: impl Into<String>, date: LedgerDate, slot: Timeslot) -> Self {
        Self {
            identity: identity.into(),
            date,
            slot,
        }
    }

    /// The marker a free desk carries for `date`/`slot`.
    pub fn vacancy(date: LedgerDate, slot: Timeslot) -> Self {
        Self::new(VACANT, date, slot)
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn date(&self) -> LedgerDate {
        self.date
    }

    pub fn slot(&self) -> Timeslot {
        self.slot
    }

    /// Serializes the key for the ledger.
    ///
    /// Neither the date nor the slot can contain the separator, so both
    /// orders stay unambiguous even for identities containing `-`.
    pub fn encode(&self, order: KeyOrder) -> String {
        match order {
            KeyOrder::DateFirst => format!(
                "{}{sep}{}{sep}{}",
                self.date,
                self.slot,
                self.identity,
                sep = SEPARATOR
            ),
            KeyOrder::IdentityFirst => format!(
                "{}{sep}{}{sep}{}",
                self.identity,
                self.date,
                self.slot,
                sep = SEPARATOR
            ),
        }
    }

    /// Recovers a key previously produced by [`BookingKey::encode`] with the same order.
    pub fn parse(encoded: &str, order: KeyOrder) -> Result<Self, BookingError> {
        let malformed = || BookingError::Format(format!("malformed booking key {:?}", encoded));
        let (identity, date, slot) = match order {
            KeyOrder::DateFirst => {
                let mut parts = encoded.splitn(3, SEPARATOR);
                let date = parts.next().ok_or_else(malformed)?;
                let slot = parts.next().ok_or_else(malformed)?;
                let identity = parts.next().ok_or_else(malformed)?;
                (identity, date, slot)
            }
            KeyOrder::IdentityFirst => {
                let mut parts = encoded.rsplitn(3, SEPARATOR);
                let slot = parts.next().ok_or_else(malformed)?;
                let date = parts.next().ok_or_else(malformed)?;
                let identity = parts.next().ok_or_else(malformed)?;
                (identity, date, slot)
            }
        };
        if identity.is_empty() {
            return Err(malformed());
        }
        Ok(Self::new(identity, date.parse()?, slot.parse()?))
    }
}

/// Canonical (date-first) key string for `identity` on `date`/`slot`.
pub fn make_booking_key(identity: &str, date: LedgerDate, slot: Timeslot) -> String {
    BookingKey::new(identity, date, slot).encode(KeyOrder::DateFirst)
}
