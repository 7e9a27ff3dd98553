//! State Machine Runtime
//!
//! Flat state machines whose states are plain enums. Each state type maps
//! `(state, event)` pairs to successor states in a single `match`, which
//! keeps the whole transition table visible in one place and makes it
//! testable as a pure function.
//!
//! [`StateMachine`] wraps such a state, applies events, and records a
//! transition history for debugging.

use std::fmt::Debug;
use std::hash::Hash;

/// Identifier for an event type
pub type EventId = u32;

/// Trait for enum states that define their own transition table
///
/// # Example
///
/// ```rust
/// use glide_core::fsm::{EventId, StateTransitions};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// enum Press {
///     Idle,
///     Pressed,
/// }
///
/// const DOWN: EventId = 1;
/// const UP: EventId = 2;
///
/// impl StateTransitions for Press {
///     fn on_event(&self, event: EventId) -> Option<Self> {
///         match (self, event) {
///             (Press::Idle, DOWN) => Some(Press::Pressed),
///             (Press::Pressed, UP) => Some(Press::Idle),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventId) -> Option<Self>;
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine<S: StateTransitions> {
    initial_state: S,
    current_state: S,
    /// History of state transitions (for debugging)
    history: Vec<(S, EventId, S)>,
    /// Maximum retained history entries (0 disables recording)
    history_limit: usize,
}

impl<S: StateTransitions> StateMachine<S> {
    /// Default number of retained history entries
    pub const DEFAULT_HISTORY_LIMIT: usize = 64;

    /// Create a new state machine in its initial state
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            current_state: initial_state,
            history: Vec::new(),
            history_limit: Self::DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Limit how many transitions are kept in the history
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.history.truncate(limit);
        self
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, EventId, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.current_state.on_event(event).is_some()
    }

    /// Send an event, returning the state after it was handled
    pub fn send(&mut self, event: EventId) -> S {
        let current = self.current_state;

        let Some(to_state) = current.on_event(event) else {
            return current;
        };

        self.current_state = to_state;

        if to_state != current {
            tracing::trace!("fsm {:?} --{}--> {:?}", current, event, to_state);
        }

        if self.history_limit > 0 {
            if self.history.len() == self.history_limit {
                self.history.remove(0);
            }
            self.history.push((current, event, to_state));
        }

        to_state
    }

    /// Return to the initial state without recording a transition
    pub fn reset(&mut self) {
        self.current_state = self.initial_state;
    }
}
