//! Domain types for the verification client.
//!
//! Pure data and decision logic: extracted rules, the canonical fact
//! override table, conversation turns, termination classification, and
//! the session lifecycle state machine. No I/O lives here.

mod facts;
mod outcome;
mod rules;
mod session_state;
mod turn;

pub use facts::{overrides_as_guidance, FactOverride, CANONICAL_OVERRIDES};
pub use outcome::{classify_reply, find_flag, FlagToken, ReplyClass, VerificationOutcome};
pub use rules::{Rule, RuleSet, DEGRADED_SUMMARY};
pub use session_state::{InvalidTransition, SessionState, StateMachine};
pub use turn::{ConversationTurn, Direction, TurnMessage};
