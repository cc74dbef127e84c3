//! CSV payroll export parsing.
//!
//! Column presence and cell types are checked here so the aggregator only
//! ever sees well-formed records.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::PayRecord;

use super::columns::{ColumnIndexes, WEEK_1_COLUMN, WEEK_2_COLUMN, parse_hours, parse_pay_date};
use super::format::{ExportFormat, check_extension};

/// Reads pay records from CSV text.
///
/// The first row must be a header naming at least `Employee_Name`,
/// `Pay_Date`, `Week_1`, `Week_2` and `Store_Name` (case-insensitive, any
/// order, extra columns ignored).
///
/// # Returns
///
/// Returns the records in file order, or an error if:
/// - A required column is missing
/// - A pay date is not `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or `MM/DD/YYYY`
/// - An hours cell is not a decimal number, or is negative
/// - An employee name is blank
///
/// Blank hours cells read as zero.
///
/// # Examples
///
/// ```
/// use payroll_summary::ingest::read_csv;
///
/// let data = "Employee_Name,Pay_Date,Week_1,Week_2,Store_Name\n\
///             Jane Doe,2026-10-09,38,36.5,main st\n";
/// let records = read_csv(data.as_bytes()).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].store_name, "main st");
/// ```
pub fn read_csv<R: Read>(reader: R) -> EngineResult<Vec<PayRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| EngineError::InvalidRecord {
            row: 0,
            field: "header".to_string(),
            message: e.to_string(),
        })?
        .iter()
        .map(str::to_string)
        .collect();
    let columns = ColumnIndexes::from_headers(&headers)?;

    let mut records = Vec::new();
    for (position, result) in csv_reader.records().enumerate() {
        let row = position + 1;
        let raw = result.map_err(|e| EngineError::InvalidRecord {
            row,
            field: "row".to_string(),
            message: e.to_string(),
        })?;

        if raw.iter().all(str::is_empty) {
            continue;
        }

        let record = PayRecord {
            employee_name: cell(&raw, columns.employee_name).to_string(),
            pay_date: parse_pay_date(cell(&raw, columns.pay_date), row)?,
            week1_hours: parse_hours(cell(&raw, columns.week1), WEEK_1_COLUMN, row)?,
            week2_hours: parse_hours(cell(&raw, columns.week2), WEEK_2_COLUMN, row)?,
            store_name: cell(&raw, columns.store_name).to_string(),
        };
        record.validate(row)?;
        records.push(record);
    }

    debug!(records = records.len(), "Parsed CSV payroll export");
    Ok(records)
}

/// Reads pay records from a CSV file on disk.
///
/// # Returns
///
/// Returns an error if the file does not have an accepted extension or
/// cannot be opened, or for any of the reasons [`read_csv`] fails.
pub fn load_csv_file<P: AsRef<Path>>(path: P) -> EngineResult<Vec<PayRecord>> {
    let path = path.as_ref();
    check_extension(path, ExportFormat::Csv)?;

    let file = File::open(path).map_err(|e| EngineError::InvalidRecord {
        row: 0,
        field: "file".to_string(),
        message: format!("cannot open '{}': {}", path.display(), e),
    })?;
    read_csv(file)
}

fn cell(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}
