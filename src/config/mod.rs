//! Configuration loading and management for the payroll summary engine.
//!
//! This module loads the report policy from a YAML file: the eligibility
//! window, the paycheck count threshold, the tenure gap, YTD rounding, and
//! the HTML report title.
//!
//! # Example
//!
//! ```no_run
//! use payroll_summary::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Report title: {}", config.report_settings().title);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AggregationPolicy, DEFAULT_DECIMAL_PLACES, DEFAULT_MIN_PAY_DATES, DEFAULT_TENURE_GAP_DAYS,
    DEFAULT_WINDOW_DAYS, EligibilityConfig, ReportConfig, ReportSettings, RoundingConfig,
    RoundingStrategy, TenureConfig,
};
