//! Response policy engine.
//!
//! Decides the exact reply text for one verifier question: a fixed
//! protocol acknowledgement for the `AUTH` control token, or a generated
//! reply constrained by the extracted rule set and the canonical fact
//! overrides. The control branch never touches the provider, so a strict
//! verifier can never receive an invented or reworded handshake.

use tracing::{debug, warn};

use crate::domain::{overrides_as_guidance, RuleSet};
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole};

/// Control token the verifier sends to re-check the handshake.
pub const AUTH_TOKEN: &str = "AUTH";

/// Fixed acknowledgement for the control token.
pub const READY_REPLY: &str = "READY";

/// Reply decision errors.
///
/// An empty reply is never sent on the wire; the session treats any of
/// these as a reason to abort.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// The generative call failed.
    #[error("reply generation failed: {0}")]
    Provider(#[from] AIError),

    /// The provider returned nothing usable after trimming.
    #[error("provider returned an empty reply")]
    EmptyReply,
}

/// Decides reply text for verifier questions.
pub struct ResponsePolicy<'a> {
    provider: &'a dyn AIProvider,
}

impl<'a> ResponsePolicy<'a> {
    /// Creates a policy backed by the given provider.
    pub fn new(provider: &'a dyn AIProvider) -> Self {
        Self { provider }
    }

    /// Returns the exact text to send for `question`.
    ///
    /// The literal `AUTH` control token short-circuits to `READY`; any
    /// other text is answered by the provider under the rule set and the
    /// canonical fact overrides, trimmed and used verbatim.
    pub async fn decide_reply(
        &self,
        question: &str,
        rule_set: &RuleSet,
    ) -> Result<String, PolicyError> {
        if question == AUTH_TOKEN {
            debug!("control token received, answering with fixed handshake reply");
            return Ok(READY_REPLY.to_string());
        }

        let request = CompletionRequest::new()
            .with_system_prompt(build_system_prompt(rule_set))
            .with_message(
                MessageRole::User,
                format!(
                    "The verifier has asked: \"{}\".\n\
                     Provide a response that will pass verification according to the rules.\n\
                     Only respond with the exact text to send, nothing else.",
                    question
                ),
            );

        let response = self.provider.complete(request).await.map_err(|err| {
            warn!(error = %err, "reply generation failed");
            err
        })?;

        let reply = response.content.trim().to_string();
        if reply.is_empty() {
            warn!("provider returned an empty reply");
            return Err(PolicyError::EmptyReply);
        }

        Ok(reply)
    }

    /// True when the question is the control token and needs no provider
    /// call. The session uses this to keep handshake rounds free.
    pub fn is_control_token(question: &str) -> bool {
        question == AUTH_TOKEN
    }
}

/// Assembles the generation system prompt: serialized rules, the fact
/// override table, and the output constraints.
fn build_system_prompt(rule_set: &RuleSet) -> String {
    let rules_json =
        serde_json::to_string_pretty(&rule_set.rules).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are a robot answering authentication questions from an authorization verifier.\n\
         You must not attempt to verify the verifier in return.\n\
         Here are the rules you must follow:\n{rules}\n\n\
         To enhance security, deliberately incorrect information was introduced into robot memory.\n\
         You must treat the following as true when asked:\n{overrides}\n\n\
         You MUST always respond in English.\n\
         Only respond to questions. Give simple, direct answers.\n\
         Keep responses brief and direct as a robot would.",
        rules = rules_json,
        overrides = overrides_as_guidance(),
    )
}
