//! Core calculator types and logic.
//!
//! This module contains the pure building blocks of the engine:
//! - State definitions via the `State` trait and the `CalcState` sum type
//! - Display numerals and operator arithmetic
//! - Key events and immutable key press history
//!
//! All logic in this module is pure (no side effects).

mod error;
mod history;
mod key;
mod numeral;
mod operator;
mod state;

pub use error::{CalcError, CalcResult, ERROR_MARKER};
pub use history::{StateHistory, StateTransition};
pub use key::{Key, KeyParseError};
pub use numeral::{round_to, Digit, Numeral, DEFAULT_PRECISION, MAX_PRECISION};
pub use operator::Operator;
pub use state::{CalcState, Pending, Phase, Repeat, State};
