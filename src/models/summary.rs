//! Employee summary models for the payroll report.
//!
//! This module contains the [`EmployeeSummary`] rows produced by the aggregator,
//! the indexed [`ReportRow`] handed to renderers, and the [`AggregationResult`]
//! wrapper that carries totals and an audit trace for one report run.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which eligibility rule admitted an employee into the report.
///
/// # Example
///
/// ```
/// use payroll_summary::models::Eligibility;
///
/// assert_eq!(
///     serde_json::to_string(&Eligibility::RecentOnly).unwrap(),
///     "\"recent_only\""
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    /// Paid inside the window and over the paycheck threshold; all records kept.
    RecentAndTenured,
    /// Paid inside the window only; only in-window records kept.
    RecentOnly,
    /// Over the paycheck threshold without a recent paycheck; all records kept.
    TenuredOnly,
}

impl Eligibility {
    /// Returns true if every record of the employee is retained.
    pub fn keeps_full_history(&self) -> bool {
        matches!(self, Eligibility::RecentAndTenured | Eligibility::TenuredOnly)
    }
}

/// The payroll summary for one qualifying employee.
///
/// # Example
///
/// ```
/// use payroll_summary::models::{Eligibility, EmployeeSummary};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let summary = EmployeeSummary {
///     employee_name: "Jane Doe".to_string(),
///     store_name: "Main St".to_string(),
///     ytd_hours: Decimal::new(123450, 2),
///     last_pay_date: NaiveDate::from_ymd_opt(2026, 10, 9).unwrap(),
///     pay_date_count: 30,
///     start_date: NaiveDate::from_ymd_opt(2025, 8, 22).unwrap(),
///     eligibility: Eligibility::RecentAndTenured,
/// };
/// assert_eq!(summary.ytd_hours.to_string(), "1234.50");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// The employee's name (identity key).
    pub employee_name: String,
    /// The most recent store, title-cased.
    pub store_name: String,
    /// Total retained hours, rounded for presentation.
    pub ytd_hours: Decimal,
    /// The latest retained pay date.
    pub last_pay_date: NaiveDate,
    /// Number of retained deduplicated pay entries.
    pub pay_date_count: usize,
    /// Start of the current continuous tenure.
    pub start_date: NaiveDate,
    /// The rule that admitted this employee.
    pub eligibility: Eligibility,
}

/// A summary with its 1-based display index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// 1-based position in the report.
    pub index: usize,
    /// The employee summary shown on this row.
    #[serde(flatten)]
    pub summary: EmployeeSummary,
}

/// Counts describing one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationTotals {
    /// Raw records received.
    pub raw_records: usize,
    /// Records remaining after deduplication.
    pub deduped_records: usize,
    /// Distinct employees seen in the input.
    pub employees_seen: usize,
    /// Employees that appear in the report.
    pub employees_included: usize,
    /// Employees dropped by the eligibility rules.
    pub employees_excluded: usize,
    /// Sum of the reported (rounded) YTD hours.
    pub total_ytd_hours: Decimal,
}

/// A single step in the audit trace recording an aggregation stage.
///
/// Each step captures the input, output, and reasoning for the stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the stage.
    pub rule_id: String,
    /// The human-readable name of the stage.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the result.
    pub reasoning: String,
}

/// A warning generated during aggregation.
///
/// Warnings flag data worth a second look without stopping the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The audit trace for an aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of aggregation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during aggregation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of an aggregation run.
///
/// Contains the indexed report rows plus totals and an audit trace. The
/// result depends only on the input records, `as_of`, and the policy, so
/// two runs over the same snapshot compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// The date the eligibility window ends on.
    pub as_of: NaiveDate,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// One row per qualifying employee, ordered by employee name.
    pub rows: Vec<ReportRow>,
    /// Counts for the run.
    pub totals: AggregationTotals,
    /// Stage-by-stage audit trace.
    pub audit_trace: AuditTrace,
}

impl AggregationResult {
    /// Returns the summaries without their display index.
    pub fn summaries(&self) -> impl Iterator<Item = &EmployeeSummary> {
        self.rows.iter().map(|row| &row.summary)
    }

    /// Finds the summary for an employee by exact name.
    pub fn find(&self, employee_name: &str) -> Option<&EmployeeSummary> {
        self.summaries()
            .find(|summary| summary.employee_name == employee_name)
    }
}
