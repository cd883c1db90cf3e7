//! The conversation core: rule extraction, reply policy, and the session
//! state machine.

mod extractor;
mod policy;
mod session;

pub use extractor::RuleExtractor;
pub use policy::{PolicyError, ResponsePolicy, AUTH_TOKEN, READY_REPLY};
pub use session::VerificationSession;

use crate::domain::VerificationOutcome;
use crate::ports::{AIProvider, VerifierTransport};

/// Convenience entry point: extract rules from `source_text`, then run one
/// verification session with them.
///
/// Callers that already hold a rule set (e.g. loaded from a
/// [`RuleStore`](crate::ports::RuleStore)) should construct
/// [`VerificationSession`] directly instead.
pub async fn verify_document(
    provider: &dyn AIProvider,
    transport: &dyn VerifierTransport,
    source_text: &str,
) -> VerificationOutcome {
    let rule_set = RuleExtractor::new(provider).extract_rules(source_text).await;
    VerificationSession::new(provider, transport, rule_set)
        .run()
        .await
}
