//! Key press history.
//!
//! Provides immutable tracking of the transitions caused by key presses,
//! following functional programming principles. History lives in memory only.

use super::key::Key;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single key press and the transition it caused.
///
/// # Example
///
/// ```rust
/// use abacus::core::{Key, Phase, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Phase::Entry,
///     to: Phase::Accumulating,
///     key: Key::Decimal,
///     timestamp: Utc::now(),
/// };
/// assert!(transition.changed_phase());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state before the key press
    pub from: S,
    /// The state after the key press
    pub to: S,
    /// The key that was pressed
    pub key: Key,
    /// When the key was pressed
    pub timestamp: DateTime<Utc>,
}

impl<S: State> StateTransition<S> {
    pub fn changed_phase(&self) -> bool {
        self.from != self.to
    }
}

/// Ordered history of key presses.
///
/// History is immutable - `record` returns a new history with the
/// transition added. A bounded history keeps only the most recent
/// `limit` transitions.
///
/// # Example
///
/// ```rust
/// use abacus::core::{Key, Operator, Phase, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new();
///
/// let history = history.record(StateTransition {
///     from: Phase::Entry,
///     to: Phase::Accumulating,
///     key: Key::Decimal,
///     timestamp: Utc::now(),
/// });
///
/// let history = history.record(StateTransition {
///     from: Phase::Accumulating,
///     to: Phase::OperatorPending,
///     key: Key::Operator(Operator::Add),
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // Entry -> Accumulating -> OperatorPending
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
    limit: Option<usize>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty, unbounded history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            limit: None,
        }
    }

    /// Create an empty history that retains at most `limit` transitions.
    pub fn bounded(limit: usize) -> Self {
        Self {
            transitions: Vec::new(),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Record a transition, returning a new history.
    ///
    /// This is a pure function - it does not mutate the existing history
    /// but returns a new one with the transition added. When the history is
    /// bounded the oldest transitions are dropped.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        if let Some(limit) = self.limit {
            let excess = transitions.len().saturating_sub(limit);
            transitions.drain(..excess);
        }
        Self {
            transitions,
            limit: self.limit,
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the `from` state of the
    /// oldest retained transition, then the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Keys pressed, oldest first.
    pub fn keys(&self) -> Vec<Key> {
        self.transitions.iter().map(|t| t.key).collect()
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all transitions.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
