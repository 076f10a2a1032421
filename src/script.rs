//! Key scripts: whitespace-separated key labels such as `"12.5 × 4 ="`.
//!
//! Parsing uses Stillwater's `Validation` to report every unknown label in a
//! script in one pass instead of stopping at the first.

use crate::core::{Digit, Key, KeyParseError};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A key script that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Key script has {} invalid label(s)", .errors.len())]
pub struct ScriptError {
    pub errors: Vec<KeyParseError>,
}

/// Parse a key script.
///
/// Tokens made only of digits and decimal points (`12.5`) expand to one key
/// per character. Every other token must be a single key label.
///
/// # Example
///
/// ```rust
/// use abacus::core::{Key, Operator};
/// use abacus::script::parse_keys;
///
/// let keys = parse_keys("12 + 3 =");
/// assert!(keys.is_success());
///
/// let bad = parse_keys("2 ^ 3 sqrt");
/// assert!(bad.is_failure());
/// ```
pub fn parse_keys(script: &str) -> Validation<Vec<Key>, NonEmptyVec<KeyParseError>> {
    let tokens: Vec<&str> = script.split_whitespace().collect();
    if tokens.is_empty() {
        return Validation::fail(KeyParseError::Empty);
    }

    let parsed: Vec<Validation<Vec<Key>, NonEmptyVec<KeyParseError>>> = tokens
        .iter()
        .enumerate()
        .map(|(position, token)| parse_token(position, token))
        .collect();

    Validation::all_vec(parsed).map(|groups| groups.into_iter().flatten().collect())
}

/// Parse a key script into a `Result`, collecting every error.
pub fn try_parse_keys(script: &str) -> Result<Vec<Key>, ScriptError> {
    match parse_keys(script) {
        Validation::Success(keys) => Ok(keys),
        Validation::Failure(errors) => Err(ScriptError {
            errors: errors.iter().cloned().collect(),
        }),
    }
}

fn parse_token(position: usize, token: &str) -> Validation<Vec<Key>, NonEmptyVec<KeyParseError>> {
    if let Some(keys) = expand_number(token) {
        return Validation::success(keys);
    }
    match Key::from_label(token) {
        Some(key) => Validation::success(vec![key]),
        None => Validation::fail(KeyParseError::UnknownLabel {
            label: token.to_string(),
            position,
        }),
    }
}

fn expand_number(token: &str) -> Option<Vec<Key>> {
    if !token.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    token
        .chars()
        .map(|c| match c {
            '.' => Some(Key::Decimal),
            _ => Digit::from_char(c).map(Key::Digit),
        })
        .collect()
}
