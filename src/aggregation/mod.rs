//! Aggregation logic for the payroll summary engine.
//!
//! This module turns raw pay records into per-employee summaries: duplicate
//! record collapsing, eligibility partitioning over a trailing window and a
//! paycheck count threshold, tenure start reconstruction across employment
//! gaps, store name normalization, and YTD hour totals.
//!
//! Everything here is pure: the report date is always passed in, and no
//! function performs I/O.

mod dedup;
mod eligibility;
mod store_name;
mod summary;
mod tenure;

pub use dedup::deduplicate;
pub use eligibility::{EligibilityPartition, RetainedRecords, partition_eligibility, window_cutoff};
pub use store_name::title_case_store;
pub use summary::{aggregate, summarize, summarize_deduped};
pub use tenure::{TenureStart, reconstruct_start_date};
