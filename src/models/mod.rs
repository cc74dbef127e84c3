//! Core data models for the payroll summary engine.
//!
//! This module contains all the domain models used throughout the engine.

mod pay_record;
mod summary;

pub use pay_record::{DedupedRecord, PayRecord, RecordKey};
pub use summary::{
    AggregationResult, AggregationTotals, AuditStep, AuditTrace, AuditWarning, Eligibility,
    EmployeeSummary, ReportRow,
};
