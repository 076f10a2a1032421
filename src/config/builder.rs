//! Builder API for configuring a calculator.

use crate::config::error::BuildError;
use crate::config::{EngineConfig, EqualsPolicy, ErrorOperatorPolicy};
use crate::engine::Calculator;

/// Fluent builder for a [`Calculator`].
///
/// Starts from [`EngineConfig::classic`]. `build` validates the result and
/// reports every problem at once.
///
/// # Example
///
/// ```rust
/// use abacus::config::{CalculatorBuilder, EqualsPolicy};
///
/// let calculator = CalculatorBuilder::new()
///     .equals(EqualsPolicy::RepeatLast)
///     .precision(4)
///     .build()
///     .unwrap();
/// assert_eq!(calculator.display(), "0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CalculatorBuilder {
    config: EngineConfig,
}

impl CalculatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Set what operator keys do while an error is shown
    pub fn operator_in_error(mut self, policy: ErrorOperatorPolicy) -> Self {
        self.config.operator_in_error = policy;
        self
    }

    /// Set whether the decimal key recovers from an error
    pub fn decimal_recovers_error(mut self, recovers: bool) -> Self {
        self.config.decimal_recovers_error = recovers;
        self
    }

    /// Set what a repeated equals press does
    pub fn equals(mut self, policy: EqualsPolicy) -> Self {
        self.config.equals = policy;
        self
    }

    /// Set fractional digits kept in results
    pub fn precision(mut self, digits: u32) -> Self {
        self.config.precision = digits;
        self
    }

    /// Keep at most `limit` key presses in history
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = Some(limit);
        self
    }

    /// Keep every key press in history
    pub fn unbounded_history(mut self) -> Self {
        self.config.history_limit = None;
        self
    }

    /// Build the calculator.
    /// Returns every configuration problem if validation fails.
    pub fn build(self) -> Result<Calculator, BuildError> {
        Calculator::with_config(self.config)
    }
}
