//! Employee summary assembly.
//!
//! This module ties the aggregation stages together: deduplicate, partition
//! by eligibility, derive per-employee fields, and index the result for
//! presentation.

use std::collections::BTreeSet;
use std::time::Instant;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::AggregationPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AggregationResult, AggregationTotals, AuditStep, AuditTrace, AuditWarning, DedupedRecord,
    Eligibility, EmployeeSummary, PayRecord, ReportRow,
};

use super::dedup::deduplicate;
use super::eligibility::{RetainedRecords, partition_eligibility, window_cutoff};
use super::store_name::title_case_store;
use super::tenure::reconstruct_start_date;

/// Runs the full aggregation over raw pay records.
///
/// This function:
/// 1. Validates each record (non-blank name, non-negative hours)
/// 2. Collapses duplicate employee/date/store rows, summing hours
/// 3. Partitions employees by the eligibility rules
/// 4. Derives store, last pay date, start date, YTD hours and count per employee
/// 5. Orders rows by employee name and assigns 1-based indexes
///
/// `as_of` is the report date the eligibility window ends on; it is never
/// read from the clock here, so identical input always gives an identical
/// result.
///
/// # Returns
///
/// Returns the indexed rows with totals and an audit trace, or an error if:
/// - A record has a blank employee name or negative hours
///
/// Empty input yields an empty report, not an error.
///
/// # Examples
///
/// ```
/// use payroll_summary::aggregation::aggregate;
/// use payroll_summary::config::AggregationPolicy;
/// use payroll_summary::models::PayRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let as_of = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
/// let records = vec![PayRecord {
///     employee_name: "John Smith".to_string(),
///     pay_date: NaiveDate::from_ymd_opt(2026, 10, 8).unwrap(),
///     week1_hours: Decimal::from(20),
///     week2_hours: Decimal::from(18),
///     store_name: "elm st".to_string(),
/// }];
///
/// let result = aggregate(&records, as_of, &AggregationPolicy::default()).unwrap();
/// assert_eq!(result.rows.len(), 1);
/// assert_eq!(result.rows[0].index, 1);
/// assert_eq!(result.rows[0].summary.store_name, "Elm St");
/// assert_eq!(result.rows[0].summary.ytd_hours.to_string(), "38.00");
/// ```
pub fn aggregate(
    records: &[PayRecord],
    as_of: NaiveDate,
    policy: &AggregationPolicy,
) -> EngineResult<AggregationResult> {
    let start_time = Instant::now();

    for (position, record) in records.iter().enumerate() {
        record.validate(position + 1)?;
    }

    let deduped = deduplicate(records);
    let collapsed_rows = records.len() - deduped.len();

    let mut trace = AuditTrace::default();
    trace.steps.push(AuditStep {
        step_number: 1,
        rule_id: "deduplicate".to_string(),
        rule_name: "Duplicate Pay Record Collapse".to_string(),
        input: serde_json::json!({
            "raw_records": records.len()
        }),
        output: serde_json::json!({
            "deduped_records": deduped.len(),
            "collapsed_rows": collapsed_rows
        }),
        reasoning: format!(
            "{} raw records collapsed to {} by employee/date/store ({} duplicate rows summed)",
            records.len(),
            deduped.len(),
            collapsed_rows
        ),
    });

    let mut result = assemble(&deduped, as_of, policy, trace)?;
    result.totals.raw_records = records.len();

    debug!(
        as_of = %as_of,
        raw_records = records.len(),
        deduped_records = deduped.len(),
        employees_included = result.totals.employees_included,
        employees_excluded = result.totals.employees_excluded,
        duration_us = start_time.elapsed().as_micros(),
        "Aggregation completed"
    );

    Ok(result)
}

/// Runs the aggregation with the default policy and returns only the rows.
pub fn summarize(records: &[PayRecord], as_of: NaiveDate) -> EngineResult<Vec<ReportRow>> {
    Ok(aggregate(records, as_of, &AggregationPolicy::default())?.rows)
}

/// Runs the aggregation stages after deduplication over caller-supplied records.
///
/// # Returns
///
/// Returns an error if:
/// - Two records share the same employee/date/store key
/// - A record has a blank employee name or negative hours
pub fn summarize_deduped(
    deduped: &[DedupedRecord],
    as_of: NaiveDate,
    policy: &AggregationPolicy,
) -> EngineResult<AggregationResult> {
    let mut seen = BTreeSet::new();
    for (position, record) in deduped.iter().enumerate() {
        record.to_pay_record().validate(position + 1)?;
        if !seen.insert(record.key()) {
            return Err(EngineError::DuplicateRecordKey {
                employee_name: record.employee_name.clone(),
                pay_date: record.pay_date,
                store_name: record.store_name.clone(),
            });
        }
    }

    let mut result = assemble(deduped, as_of, policy, AuditTrace::default())?;
    result.totals.raw_records = deduped.iter().map(|r| r.source_rows).sum();
    Ok(result)
}

fn assemble(
    deduped: &[DedupedRecord],
    as_of: NaiveDate,
    policy: &AggregationPolicy,
    mut trace: AuditTrace,
) -> EngineResult<AggregationResult> {
    let mut step_number = trace.steps.len() as u32 + 1;

    let partition = partition_eligibility(deduped, as_of, policy);
    let cutoff = window_cutoff(as_of, policy.window_days);
    let employees_seen = partition.included.len() + partition.excluded.len();

    trace.steps.push(AuditStep {
        step_number,
        rule_id: "eligibility".to_string(),
        rule_name: "Eligibility Partition".to_string(),
        input: serde_json::json!({
            "as_of": as_of.to_string(),
            "window_days": policy.window_days,
            "window_start": cutoff.to_string(),
            "min_pay_dates": policy.min_pay_dates,
            "count_rule_requires_recent": policy.count_rule_requires_recent,
            "employees": employees_seen
        }),
        output: serde_json::json!({
            "recent_and_tenured": partition.count(Eligibility::RecentAndTenured),
            "recent_only": partition.count(Eligibility::RecentOnly),
            "tenured_only": partition.count(Eligibility::TenuredOnly),
            "excluded": partition.excluded
        }),
        reasoning: format!(
            "{} of {} employees paid since {} or holding at least {} paychecks",
            partition.included.len(),
            employees_seen,
            cutoff,
            policy.min_pay_dates
        ),
    });
    step_number += 1;

    let mut rows = Vec::with_capacity(partition.included.len());
    for (position, (employee_name, retained)) in partition.included.iter().enumerate() {
        let summary = summarize_employee(employee_name, retained, policy, &mut trace.warnings)?;

        trace.steps.push(AuditStep {
            step_number,
            rule_id: "employee_summary".to_string(),
            rule_name: "Employee Summary".to_string(),
            input: serde_json::json!({
                "employee_name": employee_name,
                "eligibility": summary.eligibility,
                "retained_records": retained.records.len(),
                "tenure_gap_days": policy.tenure_gap_days
            }),
            output: serde_json::json!({
                "store_name": summary.store_name,
                "ytd_hours": summary.ytd_hours.to_string(),
                "last_pay_date": summary.last_pay_date.to_string(),
                "pay_date_count": summary.pay_date_count,
                "start_date": summary.start_date.to_string()
            }),
            reasoning: format!(
                "{} pay dates from {} to {} total {} hours",
                summary.pay_date_count,
                summary.start_date,
                summary.last_pay_date,
                summary.ytd_hours
            ),
        });
        step_number += 1;

        rows.push(ReportRow {
            index: position + 1,
            summary,
        });
    }

    let total_ytd_hours: Decimal = rows.iter().map(|row| row.summary.ytd_hours).sum();

    Ok(AggregationResult {
        as_of,
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        totals: AggregationTotals {
            raw_records: 0,
            deduped_records: deduped.len(),
            employees_seen,
            employees_included: rows.len(),
            employees_excluded: partition.excluded.len(),
            total_ytd_hours,
        },
        rows,
        audit_trace: trace,
    })
}

/// Derives the summary fields for one admitted employee.
///
/// `retained.records` must be ordered by pay date then store, as
/// [`partition_eligibility`] produces them.
fn summarize_employee(
    employee_name: &str,
    retained: &RetainedRecords,
    policy: &AggregationPolicy,
    warnings: &mut Vec<AuditWarning>,
) -> EngineResult<EmployeeSummary> {
    let latest = retained
        .records
        .last()
        .ok_or_else(|| EngineError::InvalidRecord {
            row: 0,
            field: "employee_name".to_string(),
            message: format!("employee '{}' has no retained records", employee_name),
        })?;

    let store_name = title_case_store(&latest.store_name);
    let stores_on_last_date: BTreeSet<String> = retained
        .records
        .iter()
        .filter(|r| r.pay_date == latest.pay_date)
        .map(|r| title_case_store(&r.store_name))
        .collect();
    if stores_on_last_date.len() > 1 {
        warnings.push(AuditWarning {
            code: "STORE_TIE".to_string(),
            message: format!(
                "{} was paid at {} stores on {}; reporting '{}'",
                employee_name,
                stores_on_last_date.len(),
                latest.pay_date,
                store_name
            ),
            severity: "medium".to_string(),
        });
    }

    let tenure = reconstruct_start_date(
        retained.records.iter().map(|r| r.pay_date),
        policy.tenure_gap_days,
    )
    .ok_or_else(|| EngineError::InvalidRecord {
        row: 0,
        field: "pay_date".to_string(),
        message: format!("employee '{}' has no pay dates", employee_name),
    })?;
    if tenure.resets > 0 {
        warnings.push(AuditWarning {
            code: "TENURE_RESET".to_string(),
            message: format!(
                "{} had {} gap(s) over {} days; start date reset to {}",
                employee_name, tenure.resets, policy.tenure_gap_days, tenure.start_date
            ),
            severity: "low".to_string(),
        });
    }

    let raw_ytd: Decimal = retained.records.iter().map(DedupedRecord::total_hours).sum();

    Ok(EmployeeSummary {
        employee_name: employee_name.to_string(),
        store_name,
        ytd_hours: policy.rounding.round(raw_ytd, policy.decimal_places),
        last_pay_date: latest.pay_date,
        pay_date_count: retained.records.len(),
        start_date: tenure.start_date,
        eligibility: retained.eligibility,
    })
}
