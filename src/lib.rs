//! Payroll Summary Engine
//!
//! This crate ingests periodic payroll exports and derives a per-employee
//! summary: year-to-date hours, most recent store and pay date,
//! continuous-employment start date, and paycheck count, rendered as a
//! filterable HTML report.

#![warn(missing_docs)]

pub mod aggregation;
pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod report;
