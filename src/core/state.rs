//! Calculator states.
//!
//! [`CalcState`] is a sum type: each variant carries only the fields that are
//! meaningful in that state, so a pending operator without an operand or an
//! error display with a live calculation cannot be represented. [`Phase`] is
//! its fieldless projection, used for logging and history.

use super::error::{CalcError, ERROR_MARKER};
use super::numeral::Numeral;
use super::operator::Operator;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure - no side effects.
///
/// # Required Traits
///
/// - `Clone`: States must be cloneable for history tracking
/// - `PartialEq`: States must be comparable for transition logic
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States must be serializable for inspection
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Coarse position of the calculator in its input cycle.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Phase {
    /// Display shows the resting `"0"` and nothing is pending
    Entry,
    /// The user is typing a number
    Accumulating,
    /// An operator was pressed; the next digit starts its right operand
    OperatorPending,
    /// Equals produced a result; the next digit starts a new calculation
    Evaluated,
    /// A computation failed; the display shows the error marker
    Error,
}

impl Phase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "Entry",
            Self::Accumulating => "Accumulating",
            Self::OperatorPending => "OperatorPending",
            Self::Evaluated => "Evaluated",
            Self::Error => "Error",
        }
    }
}

impl State for Phase {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// Left operand and operator of a binary operation awaiting its right side.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Pending {
    pub operand: f64,
    pub operator: Operator,
}

/// The last operator and right operand applied by equals, kept so equals
/// can be repeated against the result.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Repeat {
    pub operator: Operator,
    pub operand: f64,
}

/// Full calculator state.
///
/// # Example
///
/// ```rust
/// use abacus::core::{CalcState, Phase, State};
///
/// let state = CalcState::default();
/// assert_eq!(state.display(), "0");
/// assert_eq!(state.phase(), Phase::Entry);
/// assert!(!state.is_error());
/// ```
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub enum CalcState {
    /// Resting state, display `"0"`
    #[default]
    Entry,

    /// Digits are being typed into `entry`, possibly as the right operand of
    /// `pending`
    Accumulating {
        entry: Numeral,
        pending: Option<Pending>,
    },

    /// `pending` awaits a fresh right operand; `shown` is what the display
    /// still shows
    OperatorPending { shown: Numeral, pending: Pending },

    /// Equals produced `shown`
    Evaluated {
        shown: Numeral,
        repeat: Option<Repeat>,
    },

    /// A computation failed
    Error(CalcError),
}

impl CalcState {
    /// Typing state for `entry`, folded back to [`CalcState::Entry`] when it
    /// is indistinguishable from it.
    pub fn accumulating(entry: Numeral, pending: Option<Pending>) -> Self {
        if pending.is_none() && entry.is_resting_zero() {
            Self::Entry
        } else {
            Self::Accumulating { entry, pending }
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Self::Entry => Phase::Entry,
            Self::Accumulating { .. } => Phase::Accumulating,
            Self::OperatorPending { .. } => Phase::OperatorPending,
            Self::Evaluated { .. } => Phase::Evaluated,
            Self::Error(_) => Phase::Error,
        }
    }

    /// Text for the display.
    pub fn display(&self) -> &str {
        match self {
            Self::Entry => "0",
            Self::Accumulating { entry, .. } => entry.as_str(),
            Self::OperatorPending { shown, .. } | Self::Evaluated { shown, .. } => shown.as_str(),
            Self::Error(_) => ERROR_MARKER,
        }
    }

    /// The numeral on the display, `None` in the error state.
    pub fn numeral(&self) -> Option<Numeral> {
        match self {
            Self::Entry => Some(Numeral::zero()),
            Self::Accumulating { entry, .. } => Some(entry.clone()),
            Self::OperatorPending { shown, .. } | Self::Evaluated { shown, .. } => {
                Some(shown.clone())
            }
            Self::Error(_) => None,
        }
    }

    /// Same state with a different numeral on the display.
    ///
    /// Pending operation and awaiting-fresh-operand status are preserved.
    /// The error state is returned unchanged.
    pub fn with_numeral(&self, numeral: Numeral) -> Self {
        match self {
            Self::Entry => Self::accumulating(numeral, None),
            Self::Accumulating { pending, .. } => Self::accumulating(numeral, *pending),
            Self::OperatorPending { pending, .. } => Self::OperatorPending {
                shown: numeral,
                pending: *pending,
            },
            Self::Evaluated { repeat, .. } => Self::Evaluated {
                shown: numeral,
                repeat: *repeat,
            },
            Self::Error(_) => self.clone(),
        }
    }

    pub fn pending(&self) -> Option<&Pending> {
        match self {
            Self::Accumulating { pending, .. } => pending.as_ref(),
            Self::OperatorPending { pending, .. } => Some(pending),
            _ => None,
        }
    }

    /// True when the next digit replaces the display instead of extending it.
    pub fn awaiting_fresh_operand(&self) -> bool {
        matches!(
            self,
            Self::OperatorPending { .. } | Self::Evaluated { .. } | Self::Error(_)
        )
    }

    pub fn error(&self) -> Option<&CalcError> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }
}

impl State for CalcState {
    fn name(&self) -> &str {
        self.phase().as_str()
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
