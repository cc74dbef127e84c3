//! Duplicate pay record collapsing.
//!
//! Payroll exports can carry several rows for the same employee, pay date and
//! store (re-submitted corrections, split entries). Those rows are additive:
//! their hours are summed rather than overwritten.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{DedupedRecord, PayRecord, RecordKey};

/// Collapses raw records sharing a [`RecordKey`], summing both weeks' hours.
///
/// The output is ordered by key (employee name, then pay date, then store),
/// and holds at most one record per key. Running it again on its own output
/// (converted back with [`DedupedRecord::to_pay_record`]) yields the same
/// keys and hours.
///
/// # Examples
///
/// ```
/// use payroll_summary::aggregation::deduplicate;
/// use payroll_summary::models::PayRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 9).unwrap();
/// let row = |w1: i64, w2: i64| PayRecord {
///     employee_name: "Jane Doe".to_string(),
///     pay_date: date,
///     week1_hours: Decimal::from(w1),
///     week2_hours: Decimal::from(w2),
///     store_name: "main st".to_string(),
/// };
///
/// let deduped = deduplicate(&[row(10, 5), row(2, 0)]);
/// assert_eq!(deduped.len(), 1);
/// assert_eq!(deduped[0].total_hours(), Decimal::from(17));
/// assert_eq!(deduped[0].source_rows, 2);
/// ```
pub fn deduplicate(records: &[PayRecord]) -> Vec<DedupedRecord> {
    let mut groups: BTreeMap<RecordKey, (Decimal, Decimal, usize)> = BTreeMap::new();

    for record in records {
        let entry = groups
            .entry(record.key())
            .or_insert((Decimal::ZERO, Decimal::ZERO, 0));
        entry.0 += record.week1_hours;
        entry.1 += record.week2_hours;
        entry.2 += 1;
    }

    groups
        .into_iter()
        .map(|(key, (week1_hours, week2_hours, source_rows))| DedupedRecord {
            employee_name: key.employee_name,
            pay_date: key.pay_date,
            store_name: key.store_name,
            week1_hours,
            week2_hours,
            source_rows,
        })
        .collect()
}
