//! Configuration types for payroll aggregation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML policy file, plus the [`AggregationPolicy`]
//! and [`ReportSettings`] values the rest of the crate consumes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default length of the eligibility window, in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 365;

/// Default paycheck count that qualifies an employee regardless of recency.
pub const DEFAULT_MIN_PAY_DATES: usize = 26;

/// Default gap between paychecks, in days, beyond which tenure restarts.
pub const DEFAULT_TENURE_GAP_DAYS: u32 = 365;

/// Default number of decimal places for YTD hours.
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// How YTD hours are rounded at the midpoint.
///
/// # Example
///
/// ```
/// use payroll_summary::config::RoundingStrategy;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let value = Decimal::from_str("12.345").unwrap();
/// assert_eq!(RoundingStrategy::HalfAwayFromZero.round(value, 2).to_string(), "12.35");
/// assert_eq!(RoundingStrategy::HalfEven.round(value, 2).to_string(), "12.34");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingStrategy {
    /// 12.345 -> 12.35, -12.345 -> -12.35.
    #[default]
    HalfAwayFromZero,
    /// Banker's rounding: 12.345 -> 12.34, 12.355 -> 12.36.
    HalfEven,
}

impl RoundingStrategy {
    /// Rounds `value` to `decimal_places`, always carrying exactly that scale.
    pub fn round(&self, value: Decimal, decimal_places: u32) -> Decimal {
        let strategy = match self {
            RoundingStrategy::HalfAwayFromZero => {
                rust_decimal::RoundingStrategy::MidpointAwayFromZero
            }
            RoundingStrategy::HalfEven => rust_decimal::RoundingStrategy::MidpointNearestEven,
        };
        let mut rounded = value.round_dp_with_strategy(decimal_places, strategy);
        rounded.rescale(decimal_places);
        rounded
    }
}

/// Eligibility section of the policy file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    /// Length of the trailing window ending at the report date.
    pub window_days: u32,
    /// Paycheck count that qualifies an employee on its own.
    pub min_pay_dates: usize,
    /// When true, employees over the count threshold still need a recent paycheck.
    #[serde(default)]
    pub count_rule_requires_recent: bool,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            min_pay_dates: DEFAULT_MIN_PAY_DATES,
            count_rule_requires_recent: false,
        }
    }
}

/// Tenure section of the policy file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenureConfig {
    /// A gap strictly longer than this restarts the start date.
    pub gap_days: u32,
}

impl Default for TenureConfig {
    fn default() -> Self {
        Self {
            gap_days: DEFAULT_TENURE_GAP_DAYS,
        }
    }
}

/// Rounding section of the policy file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingConfig {
    /// Decimal places kept in YTD hours.
    pub decimal_places: u32,
    /// Midpoint rounding strategy.
    #[serde(default)]
    pub strategy: RoundingStrategy,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self {
            decimal_places: DEFAULT_DECIMAL_PLACES,
            strategy: RoundingStrategy::default(),
        }
    }
}

/// Report section of the policy file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Document and heading title of the HTML report.
    pub title: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: "Employee Data".to_string(),
        }
    }
}

/// The complete policy file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Eligibility rules.
    #[serde(default)]
    pub eligibility: EligibilityConfig,
    /// Tenure reconstruction.
    #[serde(default)]
    pub tenure: TenureConfig,
    /// YTD rounding.
    #[serde(default)]
    pub rounding: RoundingConfig,
    /// HTML report presentation.
    #[serde(default)]
    pub report: ReportSettings,
}

impl ReportConfig {
    /// Returns the aggregation policy described by this configuration.
    pub fn policy(&self) -> AggregationPolicy {
        AggregationPolicy {
            window_days: self.eligibility.window_days,
            min_pay_dates: self.eligibility.min_pay_dates,
            count_rule_requires_recent: self.eligibility.count_rule_requires_recent,
            tenure_gap_days: self.tenure.gap_days,
            decimal_places: self.rounding.decimal_places,
            rounding: self.rounding.strategy,
        }
    }
}

/// The parameters the aggregator runs with.
///
/// `AggregationPolicy::default()` is the standard report: a 365-day window,
/// 26 paychecks, a 365-day tenure gap, and YTD hours rounded half away from
/// zero to 2 places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationPolicy {
    /// Length of the trailing eligibility window in days.
    pub window_days: u32,
    /// Paycheck count that qualifies an employee on its own.
    pub min_pay_dates: usize,
    /// When true, the count rule alone does not admit an employee.
    pub count_rule_requires_recent: bool,
    /// Gap in days beyond which tenure restarts.
    pub tenure_gap_days: u32,
    /// Decimal places kept in YTD hours.
    pub decimal_places: u32,
    /// Midpoint rounding strategy for YTD hours.
    pub rounding: RoundingStrategy,
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        ReportConfig::default().policy()
    }
}
