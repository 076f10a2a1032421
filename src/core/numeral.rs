//! Display numerals.
//!
//! A [`Numeral`] is the text on the calculator display while it holds a
//! number. It keeps exactly what the user typed (`"0."`, `"1.50"`) so digit
//! entry can append to it, and it can only be built in valid shapes: never
//! empty, an optional leading minus, at least one digit and at most one
//! decimal point.

use super::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of fractional digits kept in computed results.
pub const DEFAULT_PRECISION: u32 = 7;

/// Largest supported precision. Beyond this `f64` has no digits left to keep.
pub const MAX_PRECISION: u32 = 15;

/// Magnitude above which a value has no fractional digits worth rounding.
const ROUNDING_CUTOFF: f64 = 1e15;

/// A single decimal digit key, 0 through 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Create a digit, returning `None` for values above 9.
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Digit from its character, `'0'..='9'`.
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<u8> for Digit {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("digit out of range: {value}"))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text of a number on the display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Numeral(String);

impl Numeral {
    /// The resting display, `"0"`.
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    /// The display after starting a number with the decimal key, `"0."`.
    pub fn zero_point() -> Self {
        Self("0.".to_string())
    }

    /// A fresh single-digit entry.
    pub fn from_digit(digit: Digit) -> Self {
        Self(digit.as_char().to_string())
    }

    /// Render a computed value: rounded to `precision` fractional digits,
    /// no trailing zeros, no exponent, and `-0` shown as `"0"`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use abacus::core::Numeral;
    ///
    /// assert_eq!(Numeral::from_value(1.0 / 3.0, 7).unwrap().as_str(), "0.3333333");
    /// assert_eq!(Numeral::from_value(6.0, 7).unwrap().as_str(), "6");
    /// assert_eq!(Numeral::from_value(-0.0, 7).unwrap().as_str(), "0");
    /// ```
    pub fn from_value(value: f64, precision: u32) -> CalcResult<Self> {
        if value.is_nan() {
            return Err(CalcError::InvalidOperand {
                input: value.to_string(),
            });
        }
        if !value.is_finite() {
            return Err(CalcError::Overflow);
        }

        let rounded = round_to(value, precision);
        if rounded == 0.0 {
            return Ok(Self::zero());
        }
        Ok(Self(format!("{rounded}")))
    }

    /// Parse display text, rejecting anything the keypad could not produce.
    pub fn parse(text: &str) -> CalcResult<Self> {
        let body = text.strip_prefix('-').unwrap_or(text);
        let points = body.chars().filter(|c| *c == '.').count();
        let well_formed = points <= 1
            && body.chars().any(|c| c.is_ascii_digit())
            && body.chars().all(|c| c.is_ascii_digit() || c == '.');

        if well_formed {
            Ok(Self(text.to_string()))
        } else {
            Err(CalcError::InvalidOperand {
                input: text.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True only for the literal `"0"`, not `"0."` or `"0.0"`.
    pub fn is_resting_zero(&self) -> bool {
        self.0 == "0"
    }

    pub fn has_point(&self) -> bool {
        self.0.contains('.')
    }

    /// Numeric value of the display.
    pub fn value(&self) -> CalcResult<f64> {
        self.0.parse::<f64>().map_err(|_| CalcError::InvalidOperand {
            input: self.0.clone(),
        })
    }

    /// Append a typed digit. A resting `"0"` is replaced instead.
    pub fn push_digit(&self, digit: Digit) -> Self {
        if self.is_resting_zero() {
            Self::from_digit(digit)
        } else {
            let mut text = self.0.clone();
            text.push(digit.as_char());
            Self(text)
        }
    }

    /// Append a decimal point unless one is already present.
    pub fn push_point(&self) -> Self {
        if self.has_point() {
            self.clone()
        } else {
            Self(format!("{}.", self.0))
        }
    }

    /// Toggle the leading minus sign, keeping every typed digit.
    pub fn negated(&self) -> Self {
        match self.0.strip_prefix('-') {
            Some(magnitude) => Self(magnitude.to_string()),
            None => Self(format!("-{}", self.0)),
        }
    }
}

impl Default for Numeral {
    fn default() -> Self {
        Self::zero()
    }
}

impl TryFrom<String> for Numeral {
    type Error = CalcError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

impl From<Numeral> for String {
    fn from(numeral: Numeral) -> Self {
        numeral.0
    }
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Round `value` to `precision` fractional digits, half away from zero.
///
/// Values too large to carry fractional digits are returned unchanged.
pub fn round_to(value: f64, precision: u32) -> f64 {
    if !value.is_finite() || value.abs() >= ROUNDING_CUTOFF {
        return value;
    }
    let factor = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(d: u8) -> Digit {
        Digit::new(d).unwrap()
    }

    #[test]
    fn digit_rejects_out_of_range() {
        assert!(Digit::new(9).is_some());
        assert!(Digit::new(10).is_none());
        assert_eq!(Digit::from_char('7'), Some(digit(7)));
        assert_eq!(Digit::from_char('x'), None);
        assert_eq!(digit(4).as_char(), '4');
    }

    #[test]
    fn push_digit_replaces_resting_zero() {
        let numeral = Numeral::zero().push_digit(digit(5));
        assert_eq!(numeral.as_str(), "5");

        let numeral = numeral.push_digit(digit(0)).push_digit(digit(2));
        assert_eq!(numeral.as_str(), "502");
    }

    #[test]
    fn push_digit_keeps_leading_zero_after_point() {
        let numeral = Numeral::zero_point().push_digit(digit(0)).push_digit(digit(1));
        assert_eq!(numeral.as_str(), "0.01");
    }

    #[test]
    fn negated_toggles_sign_on_text() {
        let numeral = Numeral::parse("0.00000001").unwrap().negated();
        assert_eq!(numeral.as_str(), "-0.00000001");
        assert_eq!(numeral.value().unwrap(), -0.00000001);
        assert_eq!(numeral.negated().as_str(), "0.00000001");
        assert_eq!(Numeral::parse("12.50").unwrap().negated().as_str(), "-12.50");
    }

    #[test]
    fn push_point_is_idempotent() {
        let numeral = Numeral::from_digit(digit(3)).push_point();
        assert_eq!(numeral.as_str(), "3.");
        assert_eq!(numeral.push_point().as_str(), "3.");
    }

    #[test]
    fn value_parses_trailing_point() {
        assert_eq!(Numeral::zero_point().value(), Ok(0.0));
        assert_eq!(Numeral::parse("5.").unwrap().value(), Ok(5.0));
        assert_eq!(Numeral::parse("-1.25").unwrap().value(), Ok(-1.25));
    }

    #[test]
    fn from_value_rounds_to_precision() {
        assert_eq!(Numeral::from_value(2.0 / 3.0, 7).unwrap().as_str(), "0.6666667");
        assert_eq!(Numeral::from_value(0.1 + 0.2, 7).unwrap().as_str(), "0.3");
        assert_eq!(Numeral::from_value(1.23456, 2).unwrap().as_str(), "1.23");
        assert_eq!(Numeral::from_value(-8.5, 7).unwrap().as_str(), "-8.5");
    }

    #[test]
    fn from_value_collapses_negative_zero() {
        assert_eq!(Numeral::from_value(-0.0, 7).unwrap().as_str(), "0");
        assert_eq!(Numeral::from_value(-0.00000001, 7).unwrap().as_str(), "0");
    }

    #[test]
    fn from_value_rejects_non_finite() {
        assert_eq!(Numeral::from_value(f64::INFINITY, 7), Err(CalcError::Overflow));
        assert!(matches!(
            Numeral::from_value(f64::NAN, 7),
            Err(CalcError::InvalidOperand { .. })
        ));
    }

    #[test]
    fn parse_rejects_malformed_text() {
        assert!(Numeral::parse("").is_err());
        assert!(Numeral::parse("-").is_err());
        assert!(Numeral::parse(".").is_err());
        assert!(Numeral::parse("1.2.3").is_err());
        assert!(Numeral::parse("Error").is_err());
        assert!(Numeral::parse("1e5").is_err());
        assert!(Numeral::parse("0.").is_ok());
    }

    #[test]
    fn round_to_leaves_large_values() {
        assert_eq!(round_to(1e20, 7), 1e20);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
    }

    #[test]
    fn numeral_deserialization_validates() {
        let numeral: Numeral = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(numeral.as_str(), "12.5");
        assert!(serde_json::from_str::<Numeral>("\"1..2\"").is_err());
        assert!(serde_json::from_str::<Digit>("12").is_err());
    }
}
