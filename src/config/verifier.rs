//! Verifier endpoint configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Default limit on counted question/answer rounds per session.
///
/// Matches the observed verifier, which resolves within three questions
/// or not at all.
pub const DEFAULT_MAX_ROUNDS: u32 = 3;

/// Verifier endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct VerifierConfig {
    /// URL of the verification endpoint
    pub endpoint: String,

    /// Maximum counted question/answer rounds before giving up
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    /// Per-exchange timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Optional path for persisting extracted rules
    pub rules_path: Option<String>,
}

impl VerifierConfig {
    /// Creates a config for the given endpoint with defaults elsewhere.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            max_rounds: default_max_rounds(),
            timeout_secs: default_timeout(),
            rules_path: None,
        }
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate verifier configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.endpoint.is_empty() {
            return Err(ValidationError::MissingRequired("VERIFIER__ENDPOINT"));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ValidationError::InvalidEndpoint);
        }
        if self.max_rounds == 0 {
            return Err(ValidationError::InvalidRoundLimit);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_max_rounds() -> u32 {
    DEFAULT_MAX_ROUNDS
}

fn default_timeout() -> u64 {
    30
}
