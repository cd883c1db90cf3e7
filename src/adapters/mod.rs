//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - AI provider adapters (OpenAI-compatible HTTP, test mock)
//! - `http` - verifier transport adapters (HTTP client, scripted test verifier)
//! - `storage` - rule persistence adapters (JSON file store)

pub mod ai;
pub mod http;
pub mod storage;
