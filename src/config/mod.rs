//! Engine policies.
//!
//! The calculator behaves identically across deployments except for a few
//! policy choices: what an operator key does while an error is shown,
//! whether the decimal key recovers from an error, what a second press of
//! equals does, and how many fractional digits results keep.
//!
//! Validation uses Stillwater's `Validation` type so that every problem in a
//! configuration is reported at once.
//!
//! # Example
//!
//! ```rust
//! use abacus::config::{EngineConfig, EqualsPolicy};
//!
//! let config = EngineConfig::from_json(r#"{ "equals": "repeat_last", "precision": 4 }"#).unwrap();
//! assert_eq!(config.equals, EqualsPolicy::RepeatLast);
//! assert_eq!(config.precision, 4);
//! ```

pub mod builder;
pub mod error;

pub use builder::CalculatorBuilder;
pub use error::{BuildError, ConfigError};

use crate::core::{DEFAULT_PRECISION, MAX_PRECISION};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Default number of key presses kept in history.
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// What an operator key does while the display shows an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorOperatorPolicy {
    /// The key is ignored; only digit, decimal or clear recover
    #[default]
    Ignore,

    /// The display is reset to `0` and the operator is applied to it
    ResetAndProceed,
}

/// What equals does when pressed again right after producing a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualsPolicy {
    /// Nothing; the result stays on the display
    #[default]
    Once,

    /// Re-apply the last operator and right operand to the result
    RepeatLast,
}

/// Policy flags selected when a calculator is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub operator_in_error: ErrorOperatorPolicy,
    pub decimal_recovers_error: bool,
    pub equals: EqualsPolicy,
    /// Fractional digits kept in computed results
    pub precision: u32,
    /// Maximum key presses kept in history, `None` for no limit
    pub history_limit: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl EngineConfig {
    /// Operators are ignored while an error is shown and equals does not
    /// repeat.
    pub fn classic() -> Self {
        Self {
            operator_in_error: ErrorOperatorPolicy::Ignore,
            decimal_recovers_error: true,
            equals: EqualsPolicy::Once,
            precision: DEFAULT_PRECISION,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }

    /// Operators recover from an error by starting over from `0`, and
    /// equals repeats the last operation.
    pub fn forgiving() -> Self {
        Self {
            operator_in_error: ErrorOperatorPolicy::ResetAndProceed,
            equals: EqualsPolicy::RepeatLast,
            ..Self::classic()
        }
    }

    /// Load a configuration from JSON. Missing fields take their
    /// [`classic`](Self::classic) values.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BuildError::InvalidConfig(vec![ConfigError::Malformed(e.to_string())]))?;
        config.checked()
    }

    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = Vec::new();

        let precision = if self.precision > MAX_PRECISION {
            Validation::fail(ConfigError::PrecisionOutOfRange {
                precision: self.precision,
                max: MAX_PRECISION,
            })
        } else {
            Validation::success(())
        };
        checks.push(precision);

        let history = if self.history_limit == Some(0) {
            Validation::fail(ConfigError::ZeroHistoryLimit)
        } else {
            Validation::success(())
        };
        checks.push(history);

        Validation::all_vec(checks).map(|_| ())
    }

    /// The configuration itself if valid, otherwise every problem found.
    pub fn checked(self) -> Result<Self, BuildError> {
        match self.validate() {
            Validation::Success(_) => Ok(self),
            Validation::Failure(errors) => Err(BuildError::InvalidConfig(
                errors.iter().cloned().collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_classic() {
        let config = EngineConfig::default();
        assert_eq!(config, EngineConfig::classic());
        assert_eq!(config.operator_in_error, ErrorOperatorPolicy::Ignore);
        assert_eq!(config.equals, EqualsPolicy::Once);
        assert_eq!(config.precision, 7);
        assert!(config.decimal_recovers_error);
    }

    #[test]
    fn forgiving_changes_only_recovery_and_equals() {
        let config = EngineConfig::forgiving();
        assert_eq!(config.operator_in_error, ErrorOperatorPolicy::ResetAndProceed);
        assert_eq!(config.equals, EqualsPolicy::RepeatLast);
        assert_eq!(config.precision, EngineConfig::classic().precision);
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let config = EngineConfig {
            precision: 40,
            history_limit: Some(0),
            ..EngineConfig::classic()
        };

        match config.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigError::PrecisionOutOfRange { precision: 40, .. })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigError::ZeroHistoryLimit)));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(EngineConfig::forgiving().validate().is_success());
        let unbounded = EngineConfig {
            history_limit: None,
            ..EngineConfig::classic()
        };
        assert!(unbounded.checked().is_ok());
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let config = EngineConfig::from_json(r#"{ "operator_in_error": "reset_and_proceed" }"#)
            .unwrap();
        assert_eq!(config.operator_in_error, ErrorOperatorPolicy::ResetAndProceed);
        assert_eq!(config.equals, EqualsPolicy::Once);
        assert_eq!(config.history_limit, Some(DEFAULT_HISTORY_LIMIT));
    }

    #[test]
    fn from_json_reports_malformed_input() {
        let err = EngineConfig::from_json(r#"{ "equals": "sometimes" }"#).unwrap_err();
        assert!(matches!(err.problems(), [ConfigError::Malformed(_)]));
    }

    #[test]
    fn from_json_reports_invalid_values() {
        let err = EngineConfig::from_json(r#"{ "precision": 99 }"#).unwrap_err();
        assert_eq!(
            err.problems(),
            &[ConfigError::PrecisionOutOfRange {
                precision: 99,
                max: MAX_PRECISION
            }]
        );
    }

    #[test]
    fn config_serializes_correctly() {
        let config = EngineConfig::forgiving();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"reset_and_proceed\""));
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
