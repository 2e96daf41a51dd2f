// --- File: crates/deskbook_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP error responses
pub mod logging; // Logging utilities
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    external_service_error, internal_error, validation_error, DeskbookError, HttpStatusCode,
};

pub use http::IntoHttpResponse;

pub use logging::init_with_config;

pub use services::{is_feature_enabled, BoxFuture, CellRef, CellUpdate, LedgerService};
