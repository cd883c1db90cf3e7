//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the conversation core and the outside world; adapters implement them.
//!
//! - `AIProvider` - the text-understanding service (generation + extraction)
//! - `VerifierTransport` - one JSON exchange per conversation turn
//! - `RuleStore` - durable persistence of extracted rule sets

mod ai_provider;
mod rule_store;
mod transport;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, Message, MessageRole,
};
pub use rule_store::{RuleStore, RuleStoreError};
pub use transport::{TransportError, VerifierTransport};
