//! Session lifecycle state machine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected state transition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot transition from {from:?} to {to:?}")]
pub struct InvalidTransition {
    /// State the transition started from.
    pub from: SessionState,
    /// Rejected target state.
    pub to: SessionState,
}

/// Trait for status enums that represent state machines.
///
/// Implementors define valid transitions and get a validated
/// `transition_to` for free.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Checks if the current state is terminal.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

/// Lifecycle of one verification session.
///
/// - `Init`: created, handshake not yet sent
/// - `AwaitingReply`: an outbound turn is on the wire, expecting inbound
/// - `Sent`: an answer was just sent for the current round
/// - `Terminal`: an outcome has been produced
///
/// The `AwaitingReply`/`Sent` alternation enforces the invariant that two
/// outbound turns are never sent without an intervening inbound turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Session created, opening handshake not yet sent.
    #[default]
    Init,

    /// Waiting for the verifier's next inbound turn.
    AwaitingReply,

    /// A reply for the current round has been sent.
    Sent,

    /// An outcome has been produced; no further turns are sent.
    Terminal,
}

impl StateMachine for SessionState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionState::*;
        matches!(
            (self, target),
            // Handshake goes out
            (Init, AwaitingReply) |
            // A question was answered
            (AwaitingReply, Sent) |
            // The answer produced the next inbound turn
            (Sent, AwaitingReply) |
            // Any non-terminal state may resolve
            (Init, Terminal) |
            (AwaitingReply, Terminal) |
            (Sent, Terminal)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionState::*;
        match self {
            Init => vec![AwaitingReply, Terminal],
            AwaitingReply => vec![Sent, Terminal],
            Sent => vec![AwaitingReply, Terminal],
            Terminal => vec![],
        }
    }
}

impl SessionState {
    /// Performs a transition with validation.
    pub fn transition_to(self, target: SessionState) -> Result<SessionState, InvalidTransition> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(InvalidTransition {
                from: self,
                to: target,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_init() {
        assert_eq!(SessionState::default(), SessionState::Init);
    }

    #[test]
    fn handshake_moves_init_to_awaiting() {
        assert!(SessionState::Init.can_transition_to(&SessionState::AwaitingReply));
    }

    #[test]
    fn awaiting_and_sent_alternate() {
        assert!(SessionState::AwaitingReply.can_transition_to(&SessionState::Sent));
        assert!(SessionState::Sent.can_transition_to(&SessionState::AwaitingReply));
        // No outbound twice in a row
        assert!(!SessionState::Sent.can_transition_to(&SessionState::Sent));
    }

    #[test]
    fn init_cannot_skip_to_sent() {
        assert!(!SessionState::Init.can_transition_to(&SessionState::Sent));
    }

    #[test]
    fn every_active_state_can_terminate() {
        for state in [
            SessionState::Init,
            SessionState::AwaitingReply,
            SessionState::Sent,
        ] {
            assert!(state.can_transition_to(&SessionState::Terminal));
        }
    }

    #[test]
    fn terminal_is_terminal() {
        assert!(SessionState::Terminal.is_terminal());
        assert!(SessionState::Terminal.valid_transitions().is_empty());
    }

    #[test]
    fn transition_to_rejects_invalid_moves() {
        let err = SessionState::Terminal
            .transition_to(SessionState::AwaitingReply)
            .unwrap_err();
        assert_eq!(err.from, SessionState::Terminal);
        assert_eq!(err.to, SessionState::AwaitingReply);
    }

    #[test]
    fn valid_transitions_agree_with_can_transition_to() {
        for state in [
            SessionState::Init,
            SessionState::AwaitingReply,
            SessionState::Sent,
            SessionState::Terminal,
        ] {
            for target in state.valid_transitions() {
                assert!(state.can_transition_to(&target));
            }
        }
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&SessionState::AwaitingReply).unwrap();
        assert_eq!(json, "\"awaiting_reply\"");
    }
}
