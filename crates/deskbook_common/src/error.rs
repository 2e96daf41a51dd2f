// --- File: crates/deskbook_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for the desk booking service.
///
/// Feature crates convert their own errors into this one at the HTTP boundary.
#[derive(Error, Debug)]
pub enum DeskbookError {
    /// The request carried no usable identity
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Maps an error onto the HTTP status code it should be reported with.
pub trait HttpStatusCode {
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for DeskbookError {
    fn status_code(&self) -> u16 {
        match self {
            DeskbookError::AuthError(_) => 401,
            DeskbookError::ValidationError(_) => 400,
            DeskbookError::ExternalServiceError { .. } => 502,
            DeskbookError::InternalError(_) => 500,
        }
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> DeskbookError {
    DeskbookError::ValidationError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> DeskbookError {
    DeskbookError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> DeskbookError {
    DeskbookError::InternalError(message.to_string())
}
