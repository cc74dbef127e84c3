//! Request types for the payroll summary API.
//!
//! This module defines the query strings and JSON bodies accepted by the
//! upload and report endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ingest::DEFAULT_TABLE;
use crate::models::PayRecord;

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

/// Query string for `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadQuery {
    /// The table to replace.
    #[serde(default = "default_table")]
    pub table: String,
    /// The name of the uploaded file; must end in `.csv`.
    pub filename: String,
}

/// Query string for `GET /summary` and `GET /report`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportQuery {
    /// The table to report on; defaults to `payroll`.
    #[serde(default)]
    pub table: Option<String>,
    /// The report date; defaults to today (UTC).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl ReportQuery {
    /// Returns the requested table, or the default table.
    pub fn table(&self) -> &str {
        self.table.as_deref().unwrap_or(DEFAULT_TABLE)
    }
}

/// Request body for `POST /records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsUpload {
    /// The table to replace.
    #[serde(default = "default_table")]
    pub table: String,
    /// The records making up the new table.
    pub records: Vec<PayRecordRequest>,
}

/// One pay record in a JSON upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayRecordRequest {
    /// The employee's name; surrounding whitespace is trimmed.
    pub employee_name: String,
    /// The pay date.
    pub pay_date: NaiveDate,
    /// Hours worked in the first week.
    #[serde(default)]
    pub week1_hours: Decimal,
    /// Hours worked in the second week.
    #[serde(default)]
    pub week2_hours: Decimal,
    /// The store name.
    pub store_name: String,
}

impl From<PayRecordRequest> for PayRecord {
    fn from(req: PayRecordRequest) -> Self {
        PayRecord {
            employee_name: req.employee_name.trim().to_string(),
            pay_date: req.pay_date,
            week1_hours: req.week1_hours,
            week2_hours: req.week2_hours,
            store_name: req.store_name.trim().to_string(),
        }
    }
}
