//! State Machine Runtime
//!
//! Flat state machines over caller-defined state and event types.
//! Supports:
//! - Transitions from a specific state or from any state
//! - Transition history for diagnostics

use std::fmt::Debug;

/// A transition in the state machine
///
/// `from == None` matches every current state.
pub struct Transition<S, E> {
    pub from: Option<S>,
    pub event: E,
    pub to: S,
}

impl<S, E> Transition<S, E> {
    /// Create a transition out of a single state
    pub fn new(from: S, event: E, to: S) -> Self {
        Self {
            from: Some(from),
            event,
            to,
        }
    }

    /// Create a transition that fires regardless of the current state
    pub fn from_any(event: E, to: S) -> Self {
        Self {
            from: None,
            event,
            to,
        }
    }
}

/// A state machine instance
pub struct StateMachine<S, E> {
    current: S,
    transitions: Vec<Transition<S, E>>,
    /// History of state transitions (for debugging)
    history: Vec<(S, E, S)>,
    history_limit: usize,
}

impl<S, E> StateMachine<S, E>
where
    S: Copy + Eq + Debug,
    E: Copy + Eq + Debug,
{
    /// Create a new state machine with an initial state and transitions
    pub fn new(initial: S, transitions: Vec<Transition<S, E>>) -> Self {
        Self {
            current: initial,
            transitions,
            history: Vec::new(),
            history_limit: 64,
        }
    }

    /// Cap the number of retained history entries (oldest are dropped)
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, E, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn find(&self, event: E) -> Option<usize> {
        let current = self.current;
        self.transitions.iter().position(|t| {
            t.from.map_or(true, |from| from == current) && t.event == event
        })
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: E) -> bool {
        self.find(event).is_some()
    }

    /// Send an event to the state machine, potentially triggering a transition
    ///
    /// Returns the state after the event. Unmatched events leave the state
    /// unchanged and are not recorded.
    pub fn send(&mut self, event: E) -> S {
        let from = self.current;
        let Some(idx) = self.find(event) else {
            tracing::trace!(?from, ?event, "no transition");
            return from;
        };

        let to = self.transitions[idx].to;
        self.current = to;

        if self.history_limit > 0 {
            if self.history.len() == self.history_limit {
                self.history.remove(0);
            }
            self.history.push((from, event, to));
        }
        tracing::trace!(?from, ?event, ?to, "transition");
        to
    }
}
