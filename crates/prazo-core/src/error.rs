//! Core error types for prazo-core.
//!
//! This module defines the error hierarchy using thiserror. The engine
//! never catches its own errors: anything raised during date arithmetic
//! or validation propagates to the caller unchanged.

use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for prazo-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Calendar-data errors
    #[error("Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Calendar-specific errors.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// The exception maps are absent or empty. A calculation must never
    /// silently proceed as if no holidays existed.
    #[error("Calendar data is missing: {0}")]
    MissingData(String),

    /// A snapshot document could not be parsed
    #[error("Failed to parse calendar snapshot: {0}")]
    ParseFailed(String),

    /// No acceptable business day was found within the scan window
    #[error("No business day found within {scanned} days after {from}")]
    NoBusinessDay { from: NaiveDate, scanned: u32 },

    /// Date arithmetic walked past the representable range
    #[error("Date arithmetic out of range past {0}")]
    DateOutOfRange(NaiveDate),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Deadline length is malformed
    #[error("Invalid deadline length {value}: {message}")]
    InvalidLength { value: u32, message: String },

    /// A date string could not be parsed
    #[error("Invalid date '{value}': {message}")]
    InvalidDate { value: String, message: String },

    /// Availability dates earlier than the legal cutoff are rejected
    /// before any date arithmetic runs
    #[error("Availability date {date} precedes the legal cutoff {cutoff}")]
    BeforeCutoff { date: NaiveDate, cutoff: NaiveDate },
}

impl From<toml::de::Error> for CalendarError {
    fn from(err: toml::de::Error) -> Self {
        CalendarError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
