// --- File: crates/deskbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Google Sheets Ledger Config ---
// Holds non-secret ledger config. The service account JSON is read from
// GOOGLE_SHEETS_SERVICE_ACCOUNT_JSON when key_path is not set.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String, // Mandatory
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    pub key_path: Option<String>,
}

fn default_sheet_name() -> String {
    "Sheet1".to_string()
}

/// Field order used when a booking key is serialized into a ledger cell.
///
/// Writes and searches always use the same order, so a ledger populated with
/// one order must keep being served with it.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum KeyOrder {
    /// `{date}-{slot}-{identity}`
    #[default]
    DateFirst,
    /// `{identity}-{date}-{slot}`
    IdentityFirst,
}

/// What the duplicate-booking check reports when the ledger cannot be read.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LedgerErrorPolicy {
    /// Report "no duplicate" and let the request continue.
    #[default]
    FailOpen,
    /// Report "already booked" and stop the request.
    FailClosed,
}

// --- Booking Rules ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingConfig {
    /// Days ahead of today the ledger is populated for. Only used in
    /// messages and when seeding the in-memory ledger.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default)]
    pub key_order: KeyOrder,
    #[serde(default)]
    pub ledger_error_policy: LedgerErrorPolicy,
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default = "default_memory_desks")]
    pub memory_desks: Vec<String>,
}

fn default_window_days() -> u32 {
    2
}

fn default_time_zone() -> String {
    "Asia/Manila".to_string()
}

fn default_memory_desks() -> Vec<String> {
    vec![
        "Desk 1".to_string(),
        "Desk 2".to_string(),
        "Desk 3".to_string(),
    ]
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            key_order: KeyOrder::default(),
            ledger_error_policy: LedgerErrorPolicy::default(),
            time_zone: default_time_zone(),
            memory_desks: default_memory_desks(),
        }
    }
}

// --- Logging ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for daily-rolling log files; stdout only when unset.
    pub directory: Option<String>,
    #[serde(default)]
    pub journald: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
            journald: false,
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_sheets: bool,

    #[serde(default)]
    pub sheets: Option<SheetsConfig>,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Link back to the intranet home page shown on the profile endpoint.
    #[serde(default)]
    pub home_url: Option<String>,
}
