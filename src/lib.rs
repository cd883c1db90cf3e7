//! Robo Verify - stateful challenge-response verification client.
//!
//! Conducts a multi-turn conversation with a remote verifier that probes
//! whether the caller is a compliant agent: extracts a rule set from an
//! unstructured source document, answers the verifier's questions under
//! those rules (plus a table of deliberately incorrect canonical facts),
//! and resolves each session to exactly one outcome.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod engine;
pub mod ports;
