//! Rule Store Port - durable persistence of extracted rule sets.
//!
//! Extraction is a paid call; a caller can persist the result and feed the
//! stored rule set straight into a later session instead of re-extracting.

use async_trait::async_trait;

use crate::domain::RuleSet;

/// Port for rule set persistence.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// Persists a rule set, replacing any previous one.
    async fn save(&self, rule_set: &RuleSet) -> Result<(), RuleStoreError>;

    /// Loads the stored rule set, or `None` if nothing was persisted.
    async fn load(&self) -> Result<Option<RuleSet>, RuleStoreError>;
}

/// Rule store errors.
#[derive(Debug, thiserror::Error)]
pub enum RuleStoreError {
    /// Underlying storage failed.
    #[error("storage error: {0}")]
    Io(String),

    /// Stored data is not a valid rule set.
    #[error("corrupt rule set: {0}")]
    Corrupt(String),
}

impl RuleStoreError {
    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Creates a corrupt-data error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt(message.into())
    }
}
