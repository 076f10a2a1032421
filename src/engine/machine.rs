//! Calculator engine that owns state and applies key presses.

use crate::config::{BuildError, CalculatorBuilder, EngineConfig};
use crate::core::{
    CalcState, Digit, Key, Operator, Pending, Phase, State, StateHistory, StateTransition,
};
use crate::engine::readout::{active_operator, clear_label, ClearLabel, Readout};
use crate::engine::transition;
use crate::script::{try_parse_keys, ScriptError};
use chrono::Utc;
use tracing::{debug, trace, warn};

/// Calculator engine.
///
/// Each key press runs the pure transition for that key, records it in the
/// history and replaces the current state.
///
/// # Example
///
/// ```rust
/// use abacus::engine::Calculator;
///
/// let mut calculator = Calculator::new();
/// calculator.press_script("5 + 3").unwrap();
/// assert_eq!(calculator.clear_label().as_str(), "C");
///
/// calculator.equals();
/// assert_eq!(calculator.display(), "8");
/// assert_eq!(calculator.active_operator(), None);
/// ```
#[derive(Debug, Clone)]
pub struct Calculator {
    state: CalcState,
    config: EngineConfig,
    history: StateHistory<Phase>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Create a calculator with the classic policies.
    pub fn new() -> Self {
        Self::from_checked(EngineConfig::classic())
    }

    /// Create a calculator with `config`, validating it first.
    pub fn with_config(config: EngineConfig) -> Result<Self, BuildError> {
        config.checked().map(Self::from_checked)
    }

    pub fn builder() -> CalculatorBuilder {
        CalculatorBuilder::new()
    }

    fn from_checked(config: EngineConfig) -> Self {
        let history = match config.history_limit {
            Some(limit) => StateHistory::bounded(limit),
            None => StateHistory::new(),
        };
        Self {
            state: CalcState::Entry,
            config,
            history,
        }
    }

    /// Apply a key press and return the new state.
    pub fn press(&mut self, key: Key) -> &CalcState {
        let from = self.state.phase();
        let next = transition::step(&self.state, key, &self.config);

        if next == self.state {
            trace!(key = %key, phase = from.name(), "Key had no effect");
        }
        if let (Some(error), false) = (next.error(), self.state.is_error()) {
            warn!(key = %key, error = %error, "Computation failed");
        }

        let to = next.phase();
        debug!(
            key = %key,
            from = from.name(),
            to = to.name(),
            display = next.display(),
            "Key pressed"
        );

        let record = StateTransition {
            from,
            to,
            key,
            timestamp: Utc::now(),
        };
        self.history = self.history.record(record);
        self.state = next;
        &self.state
    }

    /// Apply key presses in order.
    pub fn press_all<I>(&mut self, keys: I) -> &CalcState
    where
        I: IntoIterator<Item = Key>,
    {
        for key in keys {
            self.press(key);
        }
        &self.state
    }

    /// Parse and apply a key script. Nothing is pressed unless every label
    /// in the script is valid.
    pub fn press_script(&mut self, script: &str) -> Result<&CalcState, ScriptError> {
        let keys = try_parse_keys(script)?;
        Ok(self.press_all(keys))
    }

    pub fn digit(&mut self, digit: Digit) -> &CalcState {
        self.press(Key::Digit(digit))
    }

    pub fn decimal(&mut self) -> &CalcState {
        self.press(Key::Decimal)
    }

    pub fn operator(&mut self, op: Operator) -> &CalcState {
        self.press(Key::Operator(op))
    }

    pub fn equals(&mut self) -> &CalcState {
        self.press(Key::Equals)
    }

    /// Tiered clear; see [`ClearLabel`].
    pub fn clear(&mut self) -> &CalcState {
        self.press(Key::Clear)
    }

    pub fn all_clear(&mut self) -> &CalcState {
        self.press(Key::AllClear)
    }

    pub fn sign_flip(&mut self) -> &CalcState {
        self.press(Key::SignFlip)
    }

    pub fn percent(&mut self) -> &CalcState {
        self.press(Key::Percent)
    }

    /// Get current state (pure)
    pub fn state(&self) -> &CalcState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn display(&self) -> &str {
        self.state.display()
    }

    pub fn clear_label(&self) -> ClearLabel {
        clear_label(&self.state)
    }

    pub fn active_operator(&self) -> Option<Operator> {
        active_operator(&self.state)
    }

    pub fn readout(&self) -> Readout {
        Readout::from(&self.state)
    }

    pub fn pending(&self) -> Option<&Pending> {
        self.state.pending()
    }

    pub fn awaiting_fresh_operand(&self) -> bool {
        self.state.awaiting_fresh_operand()
    }

    pub fn is_error(&self) -> bool {
        self.state.is_error()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get key press history (pure)
    pub fn history(&self) -> &StateHistory<Phase> {
        &self.history
    }
}
