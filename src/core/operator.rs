//! Binary operators and their evaluation.

use super::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic operator selected on the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operator {
    /// All operators in keypad order, top to bottom.
    pub const ALL: [Operator; 4] = [
        Operator::Divide,
        Operator::Multiply,
        Operator::Subtract,
        Operator::Add,
    ];

    /// Keypad label for this operator.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Whether percent on the right operand is taken relative to the left
    /// operand (`50 + 10%` is `50 + 5`).
    pub const fn is_additive(&self) -> bool {
        matches!(self, Self::Add | Self::Subtract)
    }

    /// Apply the operator to `lhs` and `rhs`.
    ///
    /// Fails with [`CalcError::InvalidOperand`] if either operand is NaN,
    /// [`CalcError::DivideByZero`] for a zero divisor and
    /// [`CalcError::Overflow`] if the result is infinite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use abacus::core::{CalcError, Operator};
    ///
    /// assert_eq!(Operator::Multiply.apply(6.0, 7.0), Ok(42.0));
    /// assert_eq!(Operator::Divide.apply(1.0, 0.0), Err(CalcError::DivideByZero));
    /// ```
    pub fn apply(&self, lhs: f64, rhs: f64) -> CalcResult<f64> {
        for operand in [lhs, rhs] {
            if operand.is_nan() {
                return Err(CalcError::InvalidOperand {
                    input: operand.to_string(),
                });
            }
        }

        let result = match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::DivideByZero);
                }
                lhs / rhs
            }
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalcError::Overflow)
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
