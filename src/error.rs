//! Error types for the payroll summary engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while ingesting payroll exports,
//! aggregating them, and writing reports.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll summary engine.
///
/// All fallible operations in the crate return this error type, making it
/// easy to handle errors consistently from the CLI and the HTTP API.
///
/// # Example
///
/// ```
/// use payroll_summary::error::EngineError;
///
/// let error = EngineError::MissingColumn {
///     column: "Pay_Date".to_string(),
/// };
/// assert_eq!(error.to_string(), "Payroll export is missing required column: Pay_Date");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A payroll export is missing one of the required header columns.
    #[error("Payroll export is missing required column: {column}")]
    MissingColumn {
        /// The expected column name.
        column: String,
    },

    /// A pay record was malformed or violated an input invariant.
    #[error("Invalid pay record at row {row}, field '{field}': {message}")]
    InvalidRecord {
        /// The 1-based data row, or 0 when the record did not come from a file.
        row: usize,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Two deduplicated records share the same employee/date/store key.
    #[error(
        "Duplicate pay record key after deduplication: '{employee_name}' on {pay_date} at '{store_name}'"
    )]
    DuplicateRecordKey {
        /// The employee name of the duplicated key.
        employee_name: String,
        /// The pay date of the duplicated key.
        pay_date: NaiveDate,
        /// The store name of the duplicated key.
        store_name: String,
    },

    /// A record table was requested that has never been uploaded.
    #[error("Record table not found: {table}")]
    TableNotFound {
        /// The requested table name.
        table: String,
    },

    /// The rendered report could not be written.
    #[error("Failed to write report '{path}': {message}")]
    ReportWriteError {
        /// The output path.
        path: String,
        /// A description of the I/O failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
