//! Pay record models.
//!
//! This module contains the raw [`PayRecord`] read from a payroll export and the
//! [`DedupedRecord`] produced once records sharing a [`RecordKey`] are collapsed.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One employee/date/store hours entry from a payroll export.
///
/// Records arrive from the ingest layer already typed: names are trimmed and
/// dates carry no time component.
///
/// # Example
///
/// ```
/// use payroll_summary::models::PayRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = PayRecord {
///     employee_name: "Jane Doe".to_string(),
///     pay_date: NaiveDate::from_ymd_opt(2026, 3, 6).unwrap(),
///     week1_hours: Decimal::new(380, 1),
///     week2_hours: Decimal::new(365, 1),
///     store_name: "main st".to_string(),
/// };
/// assert_eq!(record.total_hours(), Decimal::new(745, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRecord {
    /// The employee's name, trimmed, case as supplied.
    pub employee_name: String,
    /// The date the paycheck was issued.
    pub pay_date: NaiveDate,
    /// Hours worked in the first week of the pay period.
    pub week1_hours: Decimal,
    /// Hours worked in the second week of the pay period.
    pub week2_hours: Decimal,
    /// The store the hours were worked at, as supplied.
    pub store_name: String,
}

impl PayRecord {
    /// Returns the combined hours of both weeks.
    pub fn total_hours(&self) -> Decimal {
        self.week1_hours + self.week2_hours
    }

    /// Returns the grouping key for this record.
    pub fn key(&self) -> RecordKey {
        RecordKey {
            employee_name: self.employee_name.clone(),
            pay_date: self.pay_date,
            store_name: self.store_name.clone(),
        }
    }

    /// Checks the invariants the aggregator relies on.
    ///
    /// `row` is reported back in the error; pass 0 for records that did not
    /// come from a file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecord` if the employee name is blank or either week
    /// carries negative hours.
    pub fn validate(&self, row: usize) -> EngineResult<()> {
        if self.employee_name.trim().is_empty() {
            return Err(EngineError::InvalidRecord {
                row,
                field: "employee_name".to_string(),
                message: "employee name must not be empty".to_string(),
            });
        }
        for (field, hours) in [
            ("week1_hours", self.week1_hours),
            ("week2_hours", self.week2_hours),
        ] {
            if hours < Decimal::ZERO {
                return Err(EngineError::InvalidRecord {
                    row,
                    field: field.to_string(),
                    message: format!("hours must not be negative, got {}", hours),
                });
            }
        }
        Ok(())
    }
}

/// The identity of a pay entry: employee, pay date and store.
///
/// Field order defines the ordering, so a `BTreeMap<RecordKey, _>` iterates
/// employee by employee with each employee's dates ascending.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    /// The employee's name.
    pub employee_name: String,
    /// The pay date.
    pub pay_date: NaiveDate,
    /// The store name, as supplied.
    pub store_name: String,
}

/// A pay entry after all raw records sharing its key were summed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupedRecord {
    /// The employee's name.
    pub employee_name: String,
    /// The pay date.
    pub pay_date: NaiveDate,
    /// The store name, as supplied.
    pub store_name: String,
    /// Sum of week 1 hours across the collapsed records.
    pub week1_hours: Decimal,
    /// Sum of week 2 hours across the collapsed records.
    pub week2_hours: Decimal,
    /// How many raw records were collapsed into this one.
    pub source_rows: usize,
}

impl DedupedRecord {
    /// Returns `week1_hours + week2_hours`.
    pub fn total_hours(&self) -> Decimal {
        self.week1_hours + self.week2_hours
    }

    /// Returns the grouping key for this record.
    pub fn key(&self) -> RecordKey {
        RecordKey {
            employee_name: self.employee_name.clone(),
            pay_date: self.pay_date,
            store_name: self.store_name.clone(),
        }
    }

    /// Converts back into a plain [`PayRecord`], dropping the source row count.
    pub fn to_pay_record(&self) -> PayRecord {
        PayRecord {
            employee_name: self.employee_name.clone(),
            pay_date: self.pay_date,
            week1_hours: self.week1_hours,
            week2_hours: self.week2_hours,
            store_name: self.store_name.clone(),
        }
    }
}
