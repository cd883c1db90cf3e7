//! Verifier transport adapters.

mod scripted;
mod verifier_client;

pub use scripted::ScriptedVerifier;
pub use verifier_client::HttpVerifierClient;
