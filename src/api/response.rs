//! Response types for the payroll summary API.
//!
//! This module defines the upload acknowledgement, the table listing and
//! the error response structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::ingest::{ExportFormat, TableInfo};

/// Body returned after a table was replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// The table that was written.
    pub table: String,
    /// The format the upload was read as; absent for JSON uploads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ExportFormat>,
    /// How many records the table now holds.
    pub records: usize,
    /// How many records the table held before, if it existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced: Option<usize>,
}

/// Body returned by `GET /tables`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablesResponse {
    /// Stored tables, ordered by name.
    pub tables: Vec<TableInfo>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an unsupported file error response.
    pub fn unsupported_file(filename: &str) -> Self {
        Self::with_details(
            "UNSUPPORTED_FILE",
            format!("Unsupported file: {}", filename),
            "Only .xlsx and .csv payroll exports can be uploaded",
        )
    }

    /// Creates an error response for a request body that could not be read.
    pub fn unreadable_body(message: impl Into<String>) -> Self {
        Self::new("UNREADABLE_BODY", message)
    }

    /// Creates an empty upload error response.
    pub fn empty_upload() -> Self {
        Self::new("EMPTY_UPLOAD", "Upload body is empty")
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::MissingColumn { column } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "MISSING_COLUMN",
                    format!("Payroll export is missing required column: {}", column),
                    "The export must have Employee_Name, Pay_Date, Week_1, Week_2 and Store_Name columns",
                ),
            },
            EngineError::InvalidRecord {
                row,
                field,
                message,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_RECORD",
                    format!("Invalid pay record at row {}, field '{}'", row, field),
                    message,
                ),
            },
            EngineError::DuplicateRecordKey {
                employee_name,
                pay_date,
                store_name,
            } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "AGGREGATION_ERROR",
                    "Aggregation failed",
                    format!(
                        "Duplicate key '{}' on {} at '{}'",
                        employee_name, pay_date, store_name
                    ),
                ),
            },
            EngineError::TableNotFound { table } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "TABLE_NOT_FOUND",
                    format!("Record table not found: {}", table),
                    "Upload a payroll export to this table first",
                ),
            },
            EngineError::ReportWriteError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "REPORT_ERROR",
                    "Report could not be written",
                    format!("{}: {}", path, message),
                ),
            },
        }
    }
}
