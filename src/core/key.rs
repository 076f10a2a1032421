//! Key events dispatched by the presentation layer.

use super::numeral::Digit;
use super::operator::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single keypad press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Digit(Digit),
    Decimal,
    Operator(Operator),
    Equals,
    /// Tiered clear: clears the entry while an operation is pending,
    /// otherwise resets everything
    Clear,
    /// Unconditional reset
    AllClear,
    SignFlip,
    Percent,
}

/// Errors produced when reading key labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("Unknown key label '{label}' at position {position}")]
    UnknownLabel { label: String, position: usize },

    #[error("Key script is empty")]
    Empty,
}

impl Key {
    /// Canonical keypad label.
    pub fn label(&self) -> String {
        match self {
            Self::Digit(digit) => digit.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "C".to_string(),
            Self::AllClear => "AC".to_string(),
            Self::SignFlip => "±".to_string(),
            Self::Percent => "%".to_string(),
        }
    }

    /// Read a key from a label. Accepts the keypad symbols and the usual
    /// ASCII stand-ins (`*`, `x`, `/`, `+/-`).
    pub fn from_label(label: &str) -> Option<Self> {
        let key = match label {
            "." | "," => Self::Decimal,
            "+" => Self::Operator(Operator::Add),
            "-" | "−" => Self::Operator(Operator::Subtract),
            "×" | "*" | "x" | "X" => Self::Operator(Operator::Multiply),
            "÷" | "/" => Self::Operator(Operator::Divide),
            "=" => Self::Equals,
            "C" | "c" => Self::Clear,
            "AC" | "ac" => Self::AllClear,
            "±" | "+/-" | "neg" => Self::SignFlip,
            "%" => Self::Percent,
            _ => {
                let mut chars = label.chars();
                let digit = chars.next().and_then(Digit::from_char)?;
                if chars.next().is_some() {
                    return None;
                }
                Self::Digit(digit)
            }
        };
        Some(key)
    }
}

impl From<Digit> for Key {
    fn from(digit: Digit) -> Self {
        Self::Digit(digit)
    }
}

impl From<Operator> for Key {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if label.is_empty() {
            return Err(KeyParseError::Empty);
        }
        Self::from_label(label).ok_or_else(|| KeyParseError::UnknownLabel {
            label: label.to_string(),
            position: 0,
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
