//! Column layout and cell parsing shared by every payroll export format.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Header of the employee name column.
pub const EMPLOYEE_NAME_COLUMN: &str = "Employee_Name";
/// Header of the pay date column.
pub const PAY_DATE_COLUMN: &str = "Pay_Date";
/// Header of the first week's hours column.
pub const WEEK_1_COLUMN: &str = "Week_1";
/// Header of the second week's hours column.
pub const WEEK_2_COLUMN: &str = "Week_2";
/// Header of the store name column.
pub const STORE_NAME_COLUMN: &str = "Store_Name";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Positions of the required columns within a header row.
pub(super) struct ColumnIndexes {
    pub(super) employee_name: usize,
    pub(super) pay_date: usize,
    pub(super) week1: usize,
    pub(super) week2: usize,
    pub(super) store_name: usize,
}

impl ColumnIndexes {
    /// Locates the required columns, matching headers case-insensitively.
    pub(super) fn from_headers<S: AsRef<str>>(headers: &[S]) -> EngineResult<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|header| header.as_ref().trim().eq_ignore_ascii_case(column))
                .ok_or_else(|| EngineError::MissingColumn {
                    column: column.to_string(),
                })
        };

        Ok(Self {
            employee_name: find(EMPLOYEE_NAME_COLUMN)?,
            pay_date: find(PAY_DATE_COLUMN)?,
            week1: find(WEEK_1_COLUMN)?,
            week2: find(WEEK_2_COLUMN)?,
            store_name: find(STORE_NAME_COLUMN)?,
        })
    }
}

/// Parses a pay date cell, discarding any time component.
///
/// Accepts `YYYY-MM-DD`, `MM/DD/YYYY`, `YYYY-MM-DD HH:MM:SS` and
/// `YYYY-MM-DDTHH:MM:SS`.
///
/// # Examples
///
/// ```
/// use payroll_summary::ingest::parse_pay_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2026, 10, 9).unwrap();
/// assert_eq!(parse_pay_date("10/09/2026", 1).unwrap(), expected);
/// assert_eq!(parse_pay_date("2026-10-09 00:00:00", 1).unwrap(), expected);
/// assert!(parse_pay_date("next friday", 1).is_err());
/// ```
pub fn parse_pay_date(value: &str, row: usize) -> EngineResult<NaiveDate> {
    let value = value.trim();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|datetime| datetime.date())
        })
        .ok_or_else(|| invalid_pay_date(value, row))
}

pub(super) fn invalid_pay_date(value: &str, row: usize) -> EngineError {
    EngineError::InvalidRecord {
        row,
        field: PAY_DATE_COLUMN.to_string(),
        message: format!("unrecognized date '{}'", value),
    }
}

/// Parses an hours cell; blank reads as zero.
pub(super) fn parse_hours(value: &str, field: &str, row: usize) -> EngineResult<Decimal> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Decimal::ZERO);
    }

    Decimal::from_str(value).map_err(|_| EngineError::InvalidRecord {
        row,
        field: field.to_string(),
        message: format!("'{}' is not a number of hours", value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_columns_found_in_any_order() {
        let headers = ["store_name", "WEEK_2", "week_1", " Pay_Date ", "Employee_Name"];
        let columns = ColumnIndexes::from_headers(&headers).unwrap();
        assert_eq!(columns.store_name, 0);
        assert_eq!(columns.week2, 1);
        assert_eq!(columns.week1, 2);
        assert_eq!(columns.pay_date, 3);
        assert_eq!(columns.employee_name, 4);
    }

    #[test]
    fn test_first_missing_column_is_named() {
        let headers = ["Employee_Name", "Pay_Date", "Week_1", "Week_2"];
        match ColumnIndexes::from_headers(&headers) {
            Err(EngineError::MissingColumn { column }) => assert_eq!(column, "Store_Name"),
            _ => panic!("expected MissingColumn"),
        }
    }

    #[test]
    fn test_parse_pay_date_formats() {
        assert_eq!(parse_pay_date("2026-10-09", 1).unwrap(), make_date("2026-10-09"));
        assert_eq!(
            parse_pay_date("2026-10-09T13:30:00", 1).unwrap(),
            make_date("2026-10-09")
        );
        match parse_pay_date("09.10.2026", 4).unwrap_err() {
            EngineError::InvalidRecord { row, field, .. } => {
                assert_eq!(row, 4);
                assert_eq!(field, PAY_DATE_COLUMN);
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_hours("", WEEK_1_COLUMN, 1).unwrap(), Decimal::ZERO);
        assert_eq!(
            parse_hours(" 36.5 ", WEEK_1_COLUMN, 1).unwrap(),
            Decimal::from_str("36.5").unwrap()
        );
        assert!(parse_hours("eight", WEEK_2_COLUMN, 1).is_err());
    }
}
