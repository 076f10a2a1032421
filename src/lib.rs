//! Abacus: a pure state machine for pocket-calculator keypad input
//!
//! Abacus turns a sequence of keypad presses into the text on a calculator
//! display. The transition logic is a set of pure functions over a tagged
//! state type; the `Calculator` engine is the thin shell that owns the state,
//! logs each press with `tracing` and records an in-memory key history.
//!
//! # Core Concepts
//!
//! - **State**: `CalcState` carries only the fields valid in each phase
//! - **Keys**: `Key` events, parsed from keypad labels or whole scripts
//! - **Policies**: `EngineConfig` selects error recovery and repeat-equals
//!   behaviour at construction time
//! - **Readout**: display text, clear-key label and highlighted operator
//!
//! Arithmetic failures never escape a key press; they put the engine in the
//! error state and the display shows `"Error"`.
//!
//! # Example
//!
//! ```rust
//! use abacus::{Calculator, ClearLabel, Digit, Key, Operator};
//!
//! let mut calculator = Calculator::new();
//! calculator.press(Key::Digit(Digit::new(1).unwrap()));
//! calculator.press(Key::Operator(Operator::Divide));
//! calculator.press(Key::Digit(Digit::new(3).unwrap()));
//! calculator.press(Key::Equals);
//! assert_eq!(calculator.display(), "0.3333333");
//!
//! calculator.press_script("÷ 0 =").unwrap();
//! assert_eq!(calculator.display(), "Error");
//! assert_eq!(calculator.clear_label(), ClearLabel::Clear);
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod script;

// Re-export commonly used types
pub use config::{BuildError, CalculatorBuilder, EngineConfig, EqualsPolicy, ErrorOperatorPolicy};
pub use self::core::{CalcError, CalcState, Digit, Key, Numeral, Operator, Phase, State};
pub use engine::{Calculator, ClearLabel, Readout};
pub use script::{parse_keys, ScriptError};
