//! Employee eligibility partitioning.
//!
//! An employee is reported when they were paid inside the trailing window
//! ending at the report date, or when they have reached the paycheck count
//! threshold. Which rule admitted them decides how much history is kept:
//!
//! | recent | over threshold | outcome                         |
//! |--------|----------------|---------------------------------|
//! | yes    | yes            | all records                     |
//! | yes    | no             | in-window records only          |
//! | no     | yes            | all records (unless the policy requires a recent paycheck) |
//! | no     | no             | excluded                        |

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::config::AggregationPolicy;
use crate::models::{DedupedRecord, Eligibility};

/// Returns the earliest pay date that still falls inside the window.
///
/// The window is inclusive: a paycheck dated exactly `window_days` before
/// `as_of` counts as recent. Dates after `as_of` count as recent too.
///
/// # Examples
///
/// ```
/// use payroll_summary::aggregation::window_cutoff;
/// use chrono::NaiveDate;
///
/// let as_of = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
/// assert_eq!(
///     window_cutoff(as_of, 365),
///     NaiveDate::from_ymd_opt(2025, 10, 18).unwrap()
/// );
/// ```
pub fn window_cutoff(as_of: NaiveDate, window_days: u32) -> NaiveDate {
    as_of
        .checked_sub_signed(Duration::days(i64::from(window_days)))
        .unwrap_or(NaiveDate::MIN)
}

/// An employee admitted to the report with the records kept for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetainedRecords {
    /// The rule that admitted the employee.
    pub eligibility: Eligibility,
    /// Retained records, ordered by pay date then store.
    pub records: Vec<DedupedRecord>,
}

/// The result of splitting employees by eligibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibilityPartition {
    /// Admitted employees keyed by name.
    pub included: BTreeMap<String, RetainedRecords>,
    /// Names of employees that met neither rule, ascending.
    pub excluded: Vec<String>,
}

impl EligibilityPartition {
    /// Counts admitted employees admitted by the given rule.
    pub fn count(&self, eligibility: Eligibility) -> usize {
        self.included
            .values()
            .filter(|retained| retained.eligibility == eligibility)
            .count()
    }
}

/// Splits deduplicated records by employee and applies the eligibility rules.
///
/// Every employee present in `records` ends up either in `included` (with
/// exactly one [`Eligibility`]) or in `excluded`, never both. Records need not
/// be sorted on input.
///
/// # Examples
///
/// ```
/// use payroll_summary::aggregation::{deduplicate, partition_eligibility};
/// use payroll_summary::config::AggregationPolicy;
/// use payroll_summary::models::{Eligibility, PayRecord};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let as_of = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
/// let records = vec![PayRecord {
///     employee_name: "John Smith".to_string(),
///     pay_date: NaiveDate::from_ymd_opt(2026, 10, 8).unwrap(),
///     week1_hours: Decimal::from(20),
///     week2_hours: Decimal::from(20),
///     store_name: "elm st".to_string(),
/// }];
///
/// let partition = partition_eligibility(&deduplicate(&records), as_of, &AggregationPolicy::default());
/// assert_eq!(partition.included["John Smith"].eligibility, Eligibility::RecentOnly);
/// ```
pub fn partition_eligibility(
    records: &[DedupedRecord],
    as_of: NaiveDate,
    policy: &AggregationPolicy,
) -> EligibilityPartition {
    let cutoff = window_cutoff(as_of, policy.window_days);

    let mut by_employee: BTreeMap<&str, Vec<&DedupedRecord>> = BTreeMap::new();
    for record in records {
        by_employee
            .entry(record.employee_name.as_str())
            .or_default()
            .push(record);
    }

    let mut partition = EligibilityPartition::default();

    for (employee_name, mut employee_records) in by_employee {
        employee_records.sort_by(|a, b| {
            a.pay_date
                .cmp(&b.pay_date)
                .then_with(|| a.store_name.cmp(&b.store_name))
        });

        let recent = employee_records.iter().any(|r| r.pay_date >= cutoff);
        let tenured = employee_records.len() >= policy.min_pay_dates;

        let eligibility = match (recent, tenured) {
            (true, true) => Some(Eligibility::RecentAndTenured),
            (true, false) => Some(Eligibility::RecentOnly),
            (false, true) if !policy.count_rule_requires_recent => Some(Eligibility::TenuredOnly),
            _ => None,
        };

        match eligibility {
            Some(eligibility) => {
                let records: Vec<DedupedRecord> = employee_records
                    .into_iter()
                    .filter(|r| eligibility.keeps_full_history() || r.pay_date >= cutoff)
                    .cloned()
                    .collect();
                partition.included.insert(
                    employee_name.to_string(),
                    RetainedRecords {
                        eligibility,
                        records,
                    },
                );
            }
            None => partition.excluded.push(employee_name.to_string()),
        }
    }

    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::deduplicate;
    use crate::models::PayRecord;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use std::collections::BTreeSet;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn as_of() -> NaiveDate {
        make_date("2026-10-18")
    }

    fn make_deduped(name: &str, pay_date: NaiveDate) -> DedupedRecord {
        DedupedRecord {
            employee_name: name.to_string(),
            pay_date,
            store_name: "main st".to_string(),
            week1_hours: Decimal::from(38),
            week2_hours: Decimal::from(38),
            source_rows: 1,
        }
    }

    /// `count` fortnightly records ending on `last`.
    fn fortnightly(name: &str, last: NaiveDate, count: i64) -> Vec<DedupedRecord> {
        (0..count)
            .rev()
            .map(|i| make_deduped(name, last - Duration::days(14 * i)))
            .collect()
    }

    #[test]
    fn test_window_cutoff_is_inclusive() {
        let policy = AggregationPolicy::default();
        let on_boundary = vec![make_deduped("Amy Lee", make_date("2025-10-18"))];
        let just_outside = vec![make_deduped("Amy Lee", make_date("2025-10-17"))];

        let included = partition_eligibility(&on_boundary, as_of(), &policy);
        let excluded = partition_eligibility(&just_outside, as_of(), &policy);

        assert_eq!(included.included.len(), 1);
        assert_eq!(excluded.excluded, vec!["Amy Lee".to_string()]);
    }

    #[test]
    fn test_future_dated_paycheck_counts_as_recent() {
        let records = vec![make_deduped("Amy Lee", make_date("2026-11-06"))];
        let partition = partition_eligibility(&records, as_of(), &AggregationPolicy::default());
        assert_eq!(
            partition.included["Amy Lee"].eligibility,
            Eligibility::RecentOnly
        );
    }

    #[test]
    fn test_recent_only_keeps_in_window_records() {
        let records = vec![
            make_deduped("John Smith", make_date("2023-10-20")),
            make_deduped("John Smith", make_date("2024-11-15")),
            make_deduped("John Smith", make_date("2026-10-08")),
        ];

        let partition = partition_eligibility(&records, as_of(), &AggregationPolicy::default());
        let retained = &partition.included["John Smith"];

        assert_eq!(retained.eligibility, Eligibility::RecentOnly);
        assert_eq!(retained.records.len(), 1);
        assert_eq!(retained.records[0].pay_date, make_date("2026-10-08"));
    }

    #[test]
    fn test_recent_and_tenured_keeps_full_history() {
        let mut records = fortnightly("Jane Doe", make_date("2026-10-09"), 30);
        records.push(make_deduped("Jane Doe", make_date("2022-01-07")));

        let partition = partition_eligibility(&records, as_of(), &AggregationPolicy::default());
        let retained = &partition.included["Jane Doe"];

        assert_eq!(retained.eligibility, Eligibility::RecentAndTenured);
        assert_eq!(retained.records.len(), 31);
        assert_eq!(retained.records[0].pay_date, make_date("2022-01-07"));
    }

    #[test]
    fn test_tenured_only_keeps_full_history() {
        let records = fortnightly("Old Timer", make_date("2024-06-07"), 26);
        let partition = partition_eligibility(&records, as_of(), &AggregationPolicy::default());
        let retained = &partition.included["Old Timer"];

        assert_eq!(retained.eligibility, Eligibility::TenuredOnly);
        assert_eq!(retained.records.len(), 26);
    }

    #[test]
    fn test_tenured_only_excluded_when_recent_paycheck_required() {
        let records = fortnightly("Old Timer", make_date("2024-06-07"), 26);
        let policy = AggregationPolicy {
            count_rule_requires_recent: true,
            ..AggregationPolicy::default()
        };

        let partition = partition_eligibility(&records, as_of(), &policy);

        assert!(partition.included.is_empty());
        assert_eq!(partition.excluded, vec!["Old Timer".to_string()]);
    }

    #[test]
    fn test_twenty_five_old_records_are_excluded() {
        let records = fortnightly("Almost", make_date("2024-06-07"), 25);
        let partition = partition_eligibility(&records, as_of(), &AggregationPolicy::default());
        assert_eq!(partition.excluded, vec!["Almost".to_string()]);
    }

    #[test]
    fn test_two_stale_records_are_excluded() {
        let last = as_of() - Duration::days(400);
        let records = vec![
            make_deduped("Gone Away", last - Duration::days(14)),
            make_deduped("Gone Away", last),
        ];

        let partition = partition_eligibility(&records, as_of(), &AggregationPolicy::default());

        assert!(partition.included.is_empty());
        assert_eq!(partition.excluded, vec!["Gone Away".to_string()]);
    }

    #[test]
    fn test_count_by_eligibility() {
        let mut records = fortnightly("Jane Doe", make_date("2026-10-09"), 30);
        records.push(make_deduped("John Smith", make_date("2026-10-09")));
        records.extend(fortnightly("Old Timer", make_date("2024-06-07"), 26));

        let partition = partition_eligibility(&records, as_of(), &AggregationPolicy::default());

        assert_eq!(partition.count(Eligibility::RecentAndTenured), 1);
        assert_eq!(partition.count(Eligibility::RecentOnly), 1);
        assert_eq!(partition.count(Eligibility::TenuredOnly), 1);
    }

    fn arb_records() -> impl Strategy<Value = Vec<PayRecord>> {
        prop::collection::vec(
            (
                prop::sample::select(vec!["A", "B", "C", "D", "E"]),
                0i64..1200,
            )
                .prop_map(|(name, days_back)| PayRecord {
                    employee_name: name.to_string(),
                    pay_date: as_of() - Duration::days(days_back),
                    week1_hours: Decimal::from(8),
                    week2_hours: Decimal::from(8),
                    store_name: "main st".to_string(),
                }),
            0..200,
        )
    }

    proptest! {
        #[test]
        fn prop_every_employee_lands_in_exactly_one_class(raw in arb_records()) {
            let deduped = deduplicate(&raw);
            let policy = AggregationPolicy::default();
            let partition = partition_eligibility(&deduped, as_of(), &policy);

            let seen: BTreeSet<&str> = raw.iter().map(|r| r.employee_name.as_str()).collect();
            let included: BTreeSet<&str> = partition.included.keys().map(String::as_str).collect();
            let excluded: BTreeSet<&str> = partition.excluded.iter().map(String::as_str).collect();

            prop_assert!(included.is_disjoint(&excluded));
            let union: BTreeSet<&str> = included.union(&excluded).copied().collect();
            prop_assert_eq!(union, seen);

            let cutoff = window_cutoff(as_of(), policy.window_days);
            for (name, retained) in &partition.included {
                let all = deduped.iter().filter(|r| &r.employee_name == name).count();
                let in_window = deduped
                    .iter()
                    .filter(|r| &r.employee_name == name && r.pay_date >= cutoff)
                    .count();
                prop_assert!(!retained.records.is_empty());
                if retained.eligibility.keeps_full_history() {
                    prop_assert_eq!(retained.records.len(), all);
                } else {
                    prop_assert!(retained.records.iter().all(|r| r.pay_date >= cutoff));
                    prop_assert_eq!(retained.records.len(), in_window);
                }
            }
        }
    }
}
