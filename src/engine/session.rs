//! Conversation state machine.
//!
//! Owns one verification session end to end: the opening handshake, the
//! question/answer loop, termination detection, and the round limit. Reply
//! construction is delegated to the response policy; the state machine
//! itself stays protocol-shape-agnostic and only classifies inbound text.
//!
//! A session is strictly sequential: one exchange is outstanding at a
//! time, and the turn log plus round counter are owned exclusively by the
//! session instance. Concurrent verifications need independent sessions.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::DEFAULT_MAX_ROUNDS;
use crate::domain::{
    classify_reply, find_flag, ConversationTurn, ReplyClass, RuleSet, SessionState, TurnMessage,
    VerificationOutcome,
};
use crate::engine::policy::{ResponsePolicy, READY_REPLY};
use crate::ports::{AIProvider, VerifierTransport};

/// Failure reason reported when the policy engine cannot produce a reply.
const POLICY_FAILURE_REASON: &str = "policy engine unavailable";

/// Failure reason reported when a turn exchange fails.
const TRANSPORT_FAILURE_REASON: &str = "transport error";

/// One verification session against one verifier.
///
/// Consumed by [`run`](Self::run); exactly one outcome is produced per
/// session and the session cannot be reused afterwards.
pub struct VerificationSession<'a> {
    id: Uuid,
    policy: ResponsePolicy<'a>,
    transport: &'a dyn VerifierTransport,
    rule_set: RuleSet,
    max_rounds: u32,
    state: SessionState,
    turn_log: Vec<ConversationTurn>,
    rounds_used: u32,
}

impl<'a> VerificationSession<'a> {
    /// Creates a session over explicit provider and transport handles.
    ///
    /// The rule set is typically the output of
    /// [`RuleExtractor::extract_rules`](crate::engine::RuleExtractor::extract_rules)
    /// or a set loaded from a [`RuleStore`](crate::ports::RuleStore).
    pub fn new(
        provider: &'a dyn AIProvider,
        transport: &'a dyn VerifierTransport,
        rule_set: RuleSet,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            policy: ResponsePolicy::new(provider),
            transport,
            rule_set,
            max_rounds: DEFAULT_MAX_ROUNDS,
            state: SessionState::Init,
            turn_log: Vec::new(),
            rounds_used: 0,
        }
    }

    /// Overrides the counted-round limit.
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Runs the session to a terminal outcome.
    pub async fn run(self) -> VerificationOutcome {
        self.run_with_log().await.0
    }

    /// Runs the session and also returns the full turn log.
    ///
    /// The log alternates Outbound/Inbound starting with the id-0
    /// handshake; it is the authoritative record of the conversation.
    pub async fn run_with_log(mut self) -> (VerificationOutcome, Vec<ConversationTurn>) {
        info!(session_id = %self.id, rules = self.rule_set.len(), "starting verification session");
        let outcome = self.drive().await;
        match &outcome {
            VerificationOutcome::Success { flag } if flag.is_empty() => {
                info!(session_id = %self.id, "verification succeeded");
            }
            VerificationOutcome::Success { flag } => {
                let name = find_flag(flag).map(|f| f.name).unwrap_or_default();
                info!(session_id = %self.id, flag = %flag, flag_name = %name, "verification succeeded with flag");
            }
            VerificationOutcome::Failed { reason } => {
                warn!(session_id = %self.id, reason = %reason, "verification failed");
            }
            VerificationOutcome::Exhausted => {
                warn!(session_id = %self.id, rounds = self.rounds_used, "round limit reached without resolution");
            }
        }
        (outcome, self.turn_log)
    }

    async fn drive(&mut self) -> VerificationOutcome {
        // Opening handshake, the one id the client mints itself.
        let mut inbound = match self
            .exchange(TurnMessage::new(0, READY_REPLY), SessionState::AwaitingReply)
            .await
        {
            Ok(reply) => reply,
            Err(outcome) => return outcome,
        };

        loop {
            match classify_reply(&inbound.text) {
                ReplyClass::Success { flag } => {
                    return self.terminate(VerificationOutcome::Success { flag });
                }
                ReplyClass::Failure => {
                    return self.terminate(VerificationOutcome::failed(inbound.text));
                }
                ReplyClass::Question => {}
            }

            let reply = match self.policy.decide_reply(&inbound.text, &self.rule_set).await {
                Ok(reply) => reply,
                Err(err) => {
                    warn!(session_id = %self.id, error = %err, "aborting session");
                    return self.terminate(VerificationOutcome::failed(POLICY_FAILURE_REASON));
                }
            };

            // Handshake rounds are free; only real questions count.
            let counted = !ResponsePolicy::is_control_token(&inbound.text);

            // The protocol pairs request and response by id: echo the
            // inbound id, never mint a new one.
            let outbound = TurnMessage::new(inbound.msg_id, reply);
            if let Err(outcome) = self.advance(SessionState::Sent) {
                return outcome;
            }
            inbound = match self.exchange(outbound, SessionState::AwaitingReply).await {
                Ok(next) => next,
                Err(outcome) => return outcome,
            };

            if counted {
                self.rounds_used += 1;
                if self.rounds_used > self.max_rounds {
                    // Regardless of what the last reply said.
                    return self.terminate(VerificationOutcome::Exhausted);
                }
            }
        }
    }

    /// Sends one outbound turn, records both directions in the turn log,
    /// and moves to `next_state`. Transport failures resolve the session.
    async fn exchange(
        &mut self,
        outbound: TurnMessage,
        next_state: SessionState,
    ) -> Result<TurnMessage, VerificationOutcome> {
        debug!(session_id = %self.id, msg_id = outbound.msg_id, text = %outbound.text, "sending turn");
        self.turn_log
            .push(ConversationTurn::outbound(outbound.msg_id, outbound.text.as_str()));

        let reply = match self.transport.exchange(outbound).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(session_id = %self.id, error = %err, "turn exchange failed");
                return Err(self.terminate(VerificationOutcome::failed(TRANSPORT_FAILURE_REASON)));
            }
        };

        debug!(session_id = %self.id, msg_id = reply.msg_id, text = %reply.text, "received turn");
        self.turn_log
            .push(ConversationTurn::inbound(reply.msg_id, reply.text.as_str()));
        self.advance(next_state)?;
        Ok(reply)
    }

    /// Performs a validated state transition; an invalid transition is a
    /// session-fatal bug surfaced as a failure outcome.
    fn advance(&mut self, to: SessionState) -> Result<(), VerificationOutcome> {
        match self.state.transition_to(to) {
            Ok(state) => {
                self.state = state;
                Ok(())
            }
            Err(err) => Err(self.terminate(VerificationOutcome::failed(err.to_string()))),
        }
    }

    fn terminate(&mut self, outcome: VerificationOutcome) -> VerificationOutcome {
        self.state = SessionState::Terminal;
        outcome
    }
}
