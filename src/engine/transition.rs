//! Pure key transitions.
//!
//! Every function here maps the current state and a key to the next state.
//! Arithmetic failures never escape: they become [`CalcState::Error`].

use crate::config::{EngineConfig, EqualsPolicy, ErrorOperatorPolicy};
use crate::core::{
    round_to, CalcResult, CalcState, Digit, Key, Numeral, Operator, Pending, Repeat, State,
};
use crate::engine::readout::{clear_label, ClearLabel};

/// Apply one key press.
///
/// # Example
///
/// ```rust
/// use abacus::config::EngineConfig;
/// use abacus::core::{CalcState, Digit, Key, Operator};
/// use abacus::engine::step;
///
/// let config = EngineConfig::default();
/// let keys = [
///     Key::Digit(Digit::new(5).unwrap()),
///     Key::Operator(Operator::Add),
///     Key::Digit(Digit::new(3).unwrap()),
///     Key::Equals,
/// ];
/// let state = keys
///     .into_iter()
///     .fold(CalcState::default(), |state, key| step(&state, key, &config));
/// assert_eq!(state.display(), "8");
/// ```
pub fn step(state: &CalcState, key: Key, config: &EngineConfig) -> CalcState {
    match key {
        Key::Digit(d) => digit(state, d),
        Key::Decimal => decimal(state, config),
        Key::Operator(op) => operator(state, op, config),
        Key::Equals => equals(state, config),
        Key::Clear => clear(state),
        Key::AllClear => CalcState::Entry,
        Key::SignFlip => sign_flip(state),
        Key::Percent => percent(state, config),
    }
}

pub fn digit(state: &CalcState, digit: Digit) -> CalcState {
    match state {
        CalcState::Accumulating { entry, pending } => {
            CalcState::accumulating(entry.push_digit(digit), *pending)
        }
        CalcState::OperatorPending { pending, .. } => {
            CalcState::accumulating(Numeral::from_digit(digit), Some(*pending))
        }
        CalcState::Entry | CalcState::Evaluated { .. } | CalcState::Error(_) => {
            CalcState::accumulating(Numeral::from_digit(digit), None)
        }
    }
}

pub fn decimal(state: &CalcState, config: &EngineConfig) -> CalcState {
    match state {
        CalcState::Error(_) if !config.decimal_recovers_error => state.clone(),
        CalcState::Accumulating { entry, pending } => {
            CalcState::accumulating(entry.push_point(), *pending)
        }
        CalcState::OperatorPending { pending, .. } => {
            CalcState::accumulating(Numeral::zero_point(), Some(*pending))
        }
        CalcState::Entry | CalcState::Evaluated { .. } | CalcState::Error(_) => {
            CalcState::accumulating(Numeral::zero_point(), None)
        }
    }
}

pub fn operator(state: &CalcState, op: Operator, config: &EngineConfig) -> CalcState {
    if state.is_error() {
        return match config.operator_in_error {
            ErrorOperatorPolicy::Ignore => state.clone(),
            ErrorOperatorPolicy::ResetAndProceed => operator(&CalcState::Entry, op, config),
        };
    }

    let next = match state {
        // A right operand was typed since the last operator: chain.
        CalcState::Accumulating {
            entry,
            pending: Some(pending),
        } => entry.value().and_then(|rhs| {
            let (value, shown) = evaluate(pending, rhs, config.precision)?;
            Ok(CalcState::OperatorPending {
                shown,
                pending: Pending {
                    operand: value,
                    operator: op,
                },
            })
        }),
        _ => select_operator(state, op),
    };
    next.unwrap_or_else(CalcState::Error)
}

fn select_operator(state: &CalcState, op: Operator) -> CalcResult<CalcState> {
    let shown = state.numeral().unwrap_or_default();
    let operand = shown.value()?;
    Ok(CalcState::OperatorPending {
        shown,
        pending: Pending {
            operand,
            operator: op,
        },
    })
}

pub fn equals(state: &CalcState, config: &EngineConfig) -> CalcState {
    let next = match state {
        CalcState::Accumulating {
            entry,
            pending: Some(pending),
        } => complete(pending, entry, config),
        CalcState::OperatorPending { shown, pending } => complete(pending, shown, config),
        CalcState::Evaluated {
            shown,
            repeat: Some(repeat),
        } if config.equals == EqualsPolicy::RepeatLast => shown.value().and_then(|lhs| {
            let pending = Pending {
                operand: lhs,
                operator: repeat.operator,
            };
            let (_, shown) = evaluate(&pending, repeat.operand, config.precision)?;
            Ok(CalcState::Evaluated {
                shown,
                repeat: Some(*repeat),
            })
        }),
        _ => return state.clone(),
    };
    next.unwrap_or_else(CalcState::Error)
}

fn complete(pending: &Pending, rhs: &Numeral, config: &EngineConfig) -> CalcResult<CalcState> {
    let operand = rhs.value()?;
    let (_, shown) = evaluate(pending, operand, config.precision)?;
    Ok(CalcState::Evaluated {
        shown,
        repeat: Some(Repeat {
            operator: pending.operator,
            operand,
        }),
    })
}

/// Apply `pending` to `rhs`, returning the rounded value and its rendering.
fn evaluate(pending: &Pending, rhs: f64, precision: u32) -> CalcResult<(f64, Numeral)> {
    let raw = pending.operator.apply(pending.operand, rhs)?;
    let value = round_to(raw, precision);
    let shown = Numeral::from_value(value, precision)?;
    Ok((value, shown))
}

/// Tiered clear: `C` zeroes the display of a pending operation and leaves the
/// operation itself alone, `AC` resets.
pub fn clear(state: &CalcState) -> CalcState {
    match (state, clear_label(state)) {
        (CalcState::OperatorPending { pending, .. }, _) => CalcState::OperatorPending {
            shown: Numeral::zero(),
            pending: *pending,
        },
        (
            CalcState::Accumulating {
                pending: Some(pending),
                ..
            },
            ClearLabel::Clear,
        ) => CalcState::Accumulating {
            entry: Numeral::zero(),
            pending: Some(*pending),
        },
        _ => CalcState::Entry,
    }
}

/// Negate the shown numeral as typed. Zero has no sign to flip.
pub fn sign_flip(state: &CalcState) -> CalcState {
    let Some(shown) = state.numeral() else {
        return state.clone();
    };
    match shown.value() {
        Ok(value) if value == 0.0 => state.clone(),
        Ok(_) => state.with_numeral(shown.negated()),
        Err(error) => CalcState::Error(error),
    }
}

pub fn percent(state: &CalcState, config: &EngineConfig) -> CalcState {
    let Some(shown) = state.numeral() else {
        return state.clone();
    };
    let result = shown.value().and_then(|current| {
        let value = match state.pending() {
            Some(pending) if pending.operator.is_additive() => {
                pending.operand * current / 100.0
            }
            _ => current / 100.0,
        };
        Numeral::from_value(value, config.precision)
    });
    match result {
        Ok(numeral) => state.with_numeral(numeral),
        Err(error) => CalcState::Error(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CalcError, Phase};

    fn d(value: u8) -> Key {
        Key::Digit(Digit::new(value).unwrap())
    }

    fn run(config: &EngineConfig, keys: &[Key]) -> CalcState {
        keys.iter()
            .fold(CalcState::default(), |state, key| step(&state, *key, config))
    }

    fn classic(keys: &[Key]) -> CalcState {
        run(&EngineConfig::classic(), keys)
    }

    const ADD: Key = Key::Operator(Operator::Add);
    const SUB: Key = Key::Operator(Operator::Subtract);
    const MUL: Key = Key::Operator(Operator::Multiply);
    const DIV: Key = Key::Operator(Operator::Divide);

    #[test]
    fn digits_accumulate() {
        let state = classic(&[d(1), d(2), Key::Decimal, d(0), d(5)]);
        assert_eq!(state.display(), "12.05");
        assert_eq!(state.phase(), Phase::Accumulating);
    }

    #[test]
    fn leading_zero_is_replaced() {
        assert_eq!(classic(&[d(0), d(0)]), CalcState::Entry);
        assert_eq!(classic(&[d(0), d(7)]).display(), "7");
    }

    #[test]
    fn second_decimal_is_ignored() {
        assert_eq!(classic(&[d(1), Key::Decimal, d(5), Key::Decimal, d(2)]).display(), "1.52");
    }

    #[test]
    fn decimal_after_operator_starts_fresh() {
        let state = classic(&[d(9), ADD, Key::Decimal, d(5)]);
        assert_eq!(state.display(), "0.5");
        assert_eq!(state.pending().map(|p| p.operand), Some(9.0));
    }

    #[test]
    fn operator_awaits_fresh_operand() {
        let state = classic(&[d(4), MUL]);
        assert_eq!(state.phase(), Phase::OperatorPending);
        assert_eq!(state.display(), "4");
        assert_eq!(classic(&[d(4), MUL, d(2)]).display(), "2");
    }

    #[test]
    fn operators_chain_left_to_right() {
        let state = classic(&[d(2), ADD, d(3), MUL]);
        assert_eq!(state.display(), "5");
        assert_eq!(
            state.pending(),
            Some(&Pending {
                operand: 5.0,
                operator: Operator::Multiply
            })
        );
        assert_eq!(classic(&[d(2), ADD, d(3), MUL, d(4), Key::Equals]).display(), "20");
    }

    #[test]
    fn consecutive_operators_replace_the_operator() {
        let state = classic(&[d(8), ADD, SUB, d(3), Key::Equals]);
        assert_eq!(state.display(), "5");
    }

    #[test]
    fn equals_without_right_operand_reuses_display() {
        assert_eq!(classic(&[d(5), ADD, Key::Equals]).display(), "10");
    }

    #[test]
    fn equals_without_pending_is_noop() {
        let state = classic(&[d(4), d(2)]);
        assert_eq!(equals(&state, &EngineConfig::classic()), state);
    }

    #[test]
    fn division_rounds_to_precision() {
        assert_eq!(classic(&[d(1), DIV, d(3), Key::Equals]).display(), "0.3333333");
        let config = EngineConfig {
            precision: 2,
            ..EngineConfig::classic()
        };
        assert_eq!(run(&config, &[d(2), DIV, d(3), Key::Equals]).display(), "0.67");
    }

    #[test]
    fn chained_divide_by_zero_errors() {
        let state = classic(&[d(7), DIV, d(0), ADD]);
        assert_eq!(state, CalcState::Error(CalcError::DivideByZero));
        assert_eq!(state.display(), "Error");
        assert!(state.pending().is_none());
    }

    #[test]
    fn equals_once_does_not_repeat() {
        let state = classic(&[d(2), MUL, d(3), Key::Equals, Key::Equals]);
        assert_eq!(state.display(), "6");
    }

    #[test]
    fn equals_repeat_last_reapplies_operation() {
        let config = EngineConfig::forgiving();
        let state = run(&config, &[d(2), MUL, d(3), Key::Equals, Key::Equals]);
        assert_eq!(state.display(), "18");
        let state = run(&config, &[d(1), d(0), SUB, d(4), Key::Equals, Key::Equals, Key::Equals]);
        assert_eq!(state.display(), "-2");
    }

    #[test]
    fn digit_after_equals_starts_new_number() {
        let state = classic(&[d(2), ADD, d(2), Key::Equals, d(9)]);
        assert_eq!(state.display(), "9");
        assert!(state.pending().is_none());
    }

    #[test]
    fn operator_after_equals_continues_from_result() {
        let state = classic(&[d(2), ADD, d(2), Key::Equals, MUL, d(3), Key::Equals]);
        assert_eq!(state.display(), "12");
    }

    #[test]
    fn digit_recovers_from_error() {
        let state = classic(&[d(1), DIV, d(0), Key::Equals, d(4)]);
        assert_eq!(state.display(), "4");
        assert_eq!(state.phase(), Phase::Accumulating);
    }

    #[test]
    fn decimal_recovery_follows_policy() {
        let errored = [d(1), DIV, d(0), Key::Equals, Key::Decimal];
        assert_eq!(classic(&errored).display(), "0.");

        let strict = EngineConfig {
            decimal_recovers_error: false,
            ..EngineConfig::classic()
        };
        assert!(run(&strict, &errored).is_error());
    }

    #[test]
    fn operator_in_error_follows_policy() {
        let keys = [d(1), DIV, d(0), Key::Equals, ADD];
        assert!(classic(&keys).is_error());

        let state = run(&EngineConfig::forgiving(), &keys);
        assert_eq!(state.phase(), Phase::OperatorPending);
        assert_eq!(state.display(), "0");
        assert_eq!(
            state.pending(),
            Some(&Pending {
                operand: 0.0,
                operator: Operator::Add
            })
        );
    }

    #[test]
    fn soft_clear_keeps_pending_operation() {
        let state = classic(&[d(5), ADD, d(3), Key::Clear]);
        assert_eq!(state.display(), "0");
        assert_eq!(state.pending().map(|p| p.operand), Some(5.0));
        assert_eq!(classic(&[d(5), ADD, d(3), Key::Clear, d(1), Key::Equals]).display(), "6");
    }

    #[test]
    fn soft_clear_while_awaiting_only_zeroes_display() {
        let state = classic(&[d(5), ADD, Key::Clear]);
        assert_eq!(state.display(), "0");
        assert_eq!(state.phase(), Phase::OperatorPending);
        assert!(state.awaiting_fresh_operand());
        assert_eq!(
            state.pending(),
            Some(&Pending {
                operand: 5.0,
                operator: Operator::Add
            })
        );
        assert_eq!(clear_label(&state), ClearLabel::Clear);
        assert_eq!(clear(&state), state);
        assert_eq!(step(&state, Key::AllClear, &EngineConfig::classic()), CalcState::Entry);
    }

    #[test]
    fn operator_after_soft_clear_selects_from_display() {
        let state = classic(&[d(5), ADD, Key::Clear, MUL]);
        assert_eq!(
            state.pending(),
            Some(&Pending {
                operand: 0.0,
                operator: Operator::Multiply
            })
        );
        assert_eq!(classic(&[d(5), ADD, Key::Clear, MUL, d(2), Key::Equals]).display(), "0");
        assert_eq!(classic(&[d(5), ADD, Key::Clear, d(2), Key::Equals]).display(), "7");
    }

    #[test]
    fn clear_without_pending_resets() {
        assert_eq!(classic(&[d(4), d(2), Key::Clear]), CalcState::Entry);
        assert_eq!(classic(&[d(1), DIV, d(0), Key::Equals, Key::Clear]), CalcState::Entry);
    }

    #[test]
    fn all_clear_resets_everything() {
        assert_eq!(classic(&[d(5), ADD, d(3), Key::AllClear]), CalcState::Entry);
    }

    #[test]
    fn sign_flip_negates_typed_text() {
        assert_eq!(classic(&[d(1), Key::Decimal, d(5), d(0), Key::SignFlip]).display(), "-1.50");
        assert_eq!(classic(&[d(3), Key::SignFlip, Key::SignFlip]).display(), "3");
        assert_eq!(classic(&[d(4), Key::Decimal, Key::SignFlip]).display(), "-4.");
    }

    #[test]
    fn sign_flip_keeps_every_typed_digit() {
        let state = classic(&[
            Key::Decimal,
            d(0),
            d(0),
            d(0),
            d(0),
            d(0),
            d(0),
            d(0),
            d(1),
            Key::SignFlip,
        ]);
        assert_eq!(state.display(), "-0.00000001");

        let state = classic(&[
            d(1),
            Key::Decimal,
            d(2),
            d(3),
            d(4),
            d(5),
            d(6),
            d(7),
            d(8),
            d(9),
            Key::SignFlip,
        ]);
        assert_eq!(state.display(), "-1.23456789");
        assert_eq!(sign_flip(&state).display(), "1.23456789");
    }

    #[test]
    fn digits_continue_after_sign_flip() {
        assert_eq!(classic(&[d(7), Key::SignFlip, d(2)]).display(), "-72");
    }

    #[test]
    fn sign_flip_on_zero_is_noop() {
        assert_eq!(classic(&[Key::SignFlip]), CalcState::Entry);
        let state = classic(&[Key::Decimal, d(0)]);
        assert_eq!(sign_flip(&state), state);
    }

    #[test]
    fn sign_flip_keeps_awaiting_status() {
        let state = classic(&[d(6), MUL, Key::SignFlip]);
        assert_eq!(state.display(), "-6");
        assert!(state.awaiting_fresh_operand());
        assert_eq!(state.pending().map(|p| p.operand), Some(6.0));
    }

    #[test]
    fn percent_of_pending_operand_for_additive_operators() {
        assert_eq!(classic(&[d(5), ADD, Key::Percent]).display(), "0.25");
        assert_eq!(classic(&[d(5), d(0), SUB, d(1), d(0), Key::Percent]).display(), "5");
        assert_eq!(
            classic(&[d(5), d(0), SUB, d(1), d(0), Key::Percent, Key::Equals]).display(),
            "45"
        );
    }

    #[test]
    fn percent_divides_by_hundred_otherwise() {
        assert_eq!(classic(&[d(5), d(0), Key::Percent]).display(), "0.5");
        assert_eq!(classic(&[d(8), MUL, d(5), d(0), Key::Percent]).display(), "0.5");
        assert_eq!(classic(&[Key::Percent]), CalcState::Entry);
    }

    #[test]
    fn percent_in_error_is_noop() {
        let state = classic(&[d(1), DIV, d(0), Key::Equals]);
        assert_eq!(percent(&state, &EngineConfig::classic()), state);
        assert_eq!(sign_flip(&state), state);
    }

    #[test]
    fn overflow_becomes_error() {
        let state = CalcState::OperatorPending {
            shown: Numeral::from_value(1e300, 7).unwrap(),
            pending: Pending {
                operand: 1e300,
                operator: Operator::Multiply,
            },
        };
        let state = equals(&state, &EngineConfig::classic());
        assert_eq!(state, CalcState::Error(CalcError::Overflow));
    }
}
