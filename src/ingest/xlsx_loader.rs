//! Excel workbook payroll export parsing.
//!
//! The first worksheet is read; its first used row is the header. Date cells
//! may be real Excel dates, date serials, or date text.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use calamine::{Data, Reader, Xlsx};
use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::PayRecord;

use super::columns::{
    ColumnIndexes, WEEK_1_COLUMN, WEEK_2_COLUMN, invalid_pay_date, parse_hours, parse_pay_date,
};
use super::format::{ExportFormat, check_extension};

fn workbook_error(message: impl std::fmt::Display) -> EngineError {
    EngineError::InvalidRecord {
        row: 0,
        field: "workbook".to_string(),
        message: message.to_string(),
    }
}

/// Reads pay records from the first worksheet of an `.xlsx` workbook.
///
/// Header matching, blank-row skipping and cell validation follow
/// [`read_csv`](super::read_csv); numeric hours cells are read as written.
///
/// # Returns
///
/// Returns the records in sheet order, or an error if:
/// - The bytes are not a readable workbook, or it has no worksheet
/// - A required column is missing
/// - A pay date cell is neither an Excel date nor recognizable date text
/// - An hours cell is not a number, or is negative
/// - An employee name is blank
pub fn read_xlsx<RS: Read + Seek>(reader: RS) -> EngineResult<Vec<PayRecord>> {
    let mut workbook: Xlsx<RS> = Xlsx::new(reader).map_err(workbook_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| workbook_error("workbook has no worksheets"))?
        .map_err(workbook_error)?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(cell_text).collect())
        .unwrap_or_default();
    let columns = ColumnIndexes::from_headers(&headers)?;

    let mut records = Vec::new();
    for (position, raw) in rows.enumerate() {
        let row = position + 1;

        if raw.iter().all(|c| cell_text(c).is_empty()) {
            continue;
        }

        let text = |index: usize| raw.get(index).map(cell_text).unwrap_or_default();
        let record = PayRecord {
            employee_name: text(columns.employee_name),
            pay_date: cell_date(raw.get(columns.pay_date).unwrap_or(&Data::Empty), row)?,
            week1_hours: parse_hours(&text(columns.week1), WEEK_1_COLUMN, row)?,
            week2_hours: parse_hours(&text(columns.week2), WEEK_2_COLUMN, row)?,
            store_name: text(columns.store_name),
        };
        record.validate(row)?;
        records.push(record);
    }

    debug!(records = records.len(), "Parsed xlsx payroll export");
    Ok(records)
}

/// Reads pay records from an `.xlsx` file on disk.
///
/// # Returns
///
/// Returns an error if the file does not have the `.xlsx` extension or
/// cannot be opened, or for any of the reasons [`read_xlsx`] fails.
pub fn load_xlsx_file<P: AsRef<Path>>(path: P) -> EngineResult<Vec<PayRecord>> {
    let path = path.as_ref();
    check_extension(path, ExportFormat::Xlsx)?;

    let file = File::open(path).map_err(|e| EngineError::InvalidRecord {
        row: 0,
        field: "file".to_string(),
        message: format!("cannot open '{}': {}", path.display(), e),
    })?;
    read_xlsx(BufReader::new(file))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

// Serial 1 is 1900-01-01 with Excel's phantom 1900-02-29 counted, so modern
// serials are days since 1899-12-30.
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0; // 9999-12-31

fn from_excel_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..MAX_EXCEL_SERIAL + 1.0).contains(&serial) {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(Duration::days(serial.trunc() as i64))
}

fn cell_date(cell: &Data, row: usize) -> EngineResult<NaiveDate> {
    match cell {
        Data::DateTime(datetime) => datetime
            .as_datetime()
            .map(|d| d.date())
            .ok_or_else(|| invalid_pay_date(&cell_text(cell), row)),
        Data::Float(serial) => {
            from_excel_serial(*serial).ok_or_else(|| invalid_pay_date(&serial.to_string(), row))
        }
        Data::Int(serial) => from_excel_serial(*serial as f64)
            .ok_or_else(|| invalid_pay_date(&serial.to_string(), row)),
        Data::String(text) | Data::DateTimeIso(text) => parse_pay_date(text, row),
        other => Err(invalid_pay_date(&cell_text(other), row)),
    }
}
