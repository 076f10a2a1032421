//! Arithmetic failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Literal shown on the display while the engine is in the error state.
pub const ERROR_MARKER: &str = "Error";

/// Errors that can occur while applying an operator.
///
/// These never escape a key press. The engine moves into
/// [`CalcState::Error`](crate::core::CalcState::Error) and the display shows
/// [`ERROR_MARKER`] until the user recovers.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CalcError {
    /// Division with a zero right-hand operand
    #[error("Division by zero")]
    DivideByZero,

    /// An operand could not be read as a number
    #[error("Invalid operand '{input}'")]
    InvalidOperand { input: String },

    /// The result is not a finite number
    #[error("Result is not finite")]
    Overflow,
}

/// Result type for arithmetic on operands.
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        assert_eq!(CalcError::DivideByZero.to_string(), "Division by zero");
        assert_eq!(
            CalcError::InvalidOperand {
                input: "abc".to_string()
            }
            .to_string(),
            "Invalid operand 'abc'"
        );
        assert_eq!(CalcError::Overflow.to_string(), "Result is not finite");
    }

    #[test]
    fn error_serializes_correctly() {
        let error = CalcError::InvalidOperand {
            input: "-".to_string(),
        };
        let json = serde_json::to_string(&error).unwrap();
        let deserialized: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, deserialized);
    }
}
