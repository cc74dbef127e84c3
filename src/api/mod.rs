//! HTTP API module for the payroll summary engine.
//!
//! This module provides the endpoints for uploading payroll exports and
//! fetching the employee summary as JSON or as an HTML report.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PayRecordRequest, RecordsUpload, ReportQuery, UploadQuery};
pub use response::{ApiError, TablesResponse, UploadResponse};
pub use state::AppState;
