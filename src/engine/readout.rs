//! What the presentation layer reads after each key press.

use crate::core::{CalcState, Operator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of the clear key, which depends on engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearLabel {
    /// "AC": the key resets everything
    AllClear,
    /// "C": the key clears the current entry
    Clear,
}

impl ClearLabel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AllClear => "AC",
            Self::Clear => "C",
        }
    }
}

impl fmt::Display for ClearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// `C` while there is something to clear short of a full reset: a typed
/// entry, an operator awaiting its operand, or an error. `AC` otherwise.
pub fn clear_label(state: &CalcState) -> ClearLabel {
    match state {
        CalcState::Error(_) | CalcState::OperatorPending { .. } => ClearLabel::Clear,
        CalcState::Accumulating { entry, .. } if !entry.is_resting_zero() => ClearLabel::Clear,
        _ => ClearLabel::AllClear,
    }
}

/// Operator whose key should be highlighted: the one waiting for its right
/// operand.
pub fn active_operator(state: &CalcState) -> Option<Operator> {
    match state {
        CalcState::OperatorPending { pending, .. } => Some(pending.operator),
        _ => None,
    }
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readout {
    pub display: String,
    pub clear_label: ClearLabel,
    pub active_operator: Option<Operator>,
}

impl From<&CalcState> for Readout {
    fn from(state: &CalcState) -> Self {
        Self {
            display: state.display().to_string(),
            clear_label: clear_label(state),
            active_operator: active_operator(state),
        }
    }
}
