//! The calculator engine.
//!
//! `transition` holds the pure key functions; `Calculator` is the thin
//! shell around them that owns the state, logs each press and keeps the
//! key history. The presentation layer reads a `Readout` after each press.

mod machine;
mod readout;
mod transition;

pub use machine::Calculator;
pub use readout::{active_operator, clear_label, ClearLabel, Readout};
pub use transition::{
    clear, decimal, digit, equals, operator, percent, sign_flip, step,
};
