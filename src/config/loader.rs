//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! report policy from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{AggregationPolicy, ReportConfig, ReportSettings};

/// Upper bound for `rounding.decimal_places`; `Decimal` carries at most 28.
const MAX_DECIMAL_PLACES: u32 = 28;

/// Loads and provides access to the report configuration.
///
/// The `ConfigLoader` reads a single YAML policy file:
/// ```text
/// config/payroll.yaml
/// ├── eligibility   # window_days, min_pay_dates, count_rule_requires_recent
/// ├── tenure        # gap_days
/// ├── rounding      # decimal_places, strategy
/// └── report        # title
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_summary::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
/// println!("Window: {} days", loader.policy().window_days);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ReportConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - A value is out of range (zero window, zero paycheck threshold,
    ///   too many decimal places)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_summary::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/payroll.yaml")?;
    /// # Ok::<(), payroll_summary::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::from_yaml_str(&content).map_err(|err| match err {
            EngineError::ConfigParseError { message, .. } => EngineError::ConfigParseError {
                path: path_str.clone(),
                message,
            },
            other => other,
        })?;

        debug!(path = %path_str, "Loaded report configuration");
        Ok(loader)
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let config: ReportConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        Self::from_config(config)
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: ReportConfig) -> EngineResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    fn validate(config: &ReportConfig) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::ConfigParseError {
            path: "<inline>".to_string(),
            message: message.to_string(),
        };

        if config.eligibility.window_days == 0 {
            return Err(invalid("eligibility.window_days must be greater than zero"));
        }
        if config.eligibility.min_pay_dates == 0 {
            return Err(invalid("eligibility.min_pay_dates must be greater than zero"));
        }
        if config.rounding.decimal_places > MAX_DECIMAL_PLACES {
            return Err(invalid("rounding.decimal_places must be at most 28"));
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Returns the aggregation policy.
    pub fn policy(&self) -> AggregationPolicy {
        self.config.policy()
    }

    /// Returns the HTML report settings.
    pub fn report_settings(&self) -> &ReportSettings {
        &self.config.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundingStrategy;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_shipped_config() {
        let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
        assert_eq!(loader.policy(), AggregationPolicy::default());
        assert_eq!(loader.report_settings().title, "Employee Data");
    }

    #[test]
    fn test_load_custom_values() {
        let file = write_config(
            r#"
eligibility:
  window_days: 90
  min_pay_dates: 12
  count_rule_requires_recent: true
tenure:
  gap_days: 180
rounding:
  decimal_places: 1
  strategy: half_even
report:
  title: Store Payroll
"#,
        );

        let loader = ConfigLoader::load(file.path()).unwrap();
        let policy = loader.policy();
        assert_eq!(policy.window_days, 90);
        assert_eq!(policy.min_pay_dates, 12);
        assert!(policy.count_rule_requires_recent);
        assert_eq!(policy.tenure_gap_days, 180);
        assert_eq!(policy.decimal_places, 1);
        assert_eq!(policy.rounding, RoundingStrategy::HalfEven);
        assert_eq!(loader.report_settings().title, "Store Payroll");
    }

    #[test]
    fn test_missing_file_returns_config_not_found() {
        let result = ConfigLoader::load("./nonexistent/payroll.yaml");
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_invalid_yaml_reports_file_path() {
        let file = write_config("eligibility: [unclosed");
        let err = ConfigLoader::load(file.path()).unwrap_err();
        match err {
            EngineError::ConfigParseError { path, .. } => {
                assert_eq!(path, file.path().display().to_string());
            }
            other => panic!("expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let result = ConfigLoader::from_yaml_str("eligibility:\n  window_days: 0\n  min_pay_dates: 26\n");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_zero_min_pay_dates_is_rejected() {
        let result = ConfigLoader::from_yaml_str("eligibility:\n  window_days: 365\n  min_pay_dates: 0\n");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_empty_mapping_uses_defaults() {
        let loader = ConfigLoader::from_yaml_str("{}").unwrap();
        assert_eq!(loader.policy(), AggregationPolicy::default());
    }
}
