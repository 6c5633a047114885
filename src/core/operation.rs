//! Per-operation state machine
//!
//! ```text
//! Idle -> Authenticating -> Authenticated -> Operating -> Succeeded | Failed
//!                        \-> AuthFailed
//! ```
//!
//! There is no retry state: a caller that wants another attempt starts a new
//! operation from `Idle` with fresh credentials.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationState {
    Idle,
    Authenticating,
    Authenticated,
    Operating,
    Succeeded,
    Failed,
    AuthFailed,
}

impl OperationState {
    pub fn can_transition_to(self, next: OperationState) -> bool {
        use OperationState::*;
        matches!(
            (self, next),
            (Idle, Authenticating)
                | (Authenticating, Authenticated)
                | (Authenticating, AuthFailed)
                | (Authenticated, Operating)
                | (Operating, Succeeded)
                | (Operating, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OperationState::Succeeded | OperationState::Failed | OperationState::AuthFailed
        )
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Tracks one logical operation through its states
#[derive(Debug)]
pub struct OperationTracker {
    operation: &'static str,
    state: OperationState,
}

impl OperationTracker {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            state: OperationState::Idle,
        }
    }

    pub fn state(&self) -> OperationState {
        self.state
    }

    /// Moves to `next` if the transition is allowed
    ///
    /// Returns false and leaves the state unchanged otherwise.
    pub fn advance(&mut self, next: OperationState) -> bool {
        if !self.state.can_transition_to(next) {
            tracing::warn!(
                operation = self.operation,
                from = %self.state,
                to = %next,
                "Rejected invalid operation state transition"
            );
            return false;
        }

        tracing::debug!(
            operation = self.operation,
            from = %self.state,
            to = %next,
            "Operation state changed"
        );
        self.state = next;
        true
    }
}
