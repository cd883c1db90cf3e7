//! File-backed rule store.
//!
//! Persists the extracted rule set as pretty-printed JSON so a later run
//! can skip extraction and a human can inspect what was extracted.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::config::VerifierConfig;
use crate::domain::RuleSet;
use crate::ports::{RuleStore, RuleStoreError};

/// JSON-file implementation of [`RuleStore`].
#[derive(Debug, Clone)]
pub struct FileRuleStore {
    path: PathBuf,
}

impl FileRuleStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Builds a store from the configured rules path, if one is set.
    pub fn from_config(config: &VerifierConfig) -> Option<Self> {
        config.rules_path.as_ref().map(Self::new)
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RuleStore for FileRuleStore {
    async fn save(&self, rule_set: &RuleSet) -> Result<(), RuleStoreError> {
        let json = serde_json::to_string_pretty(rule_set)
            .map_err(|e| RuleStoreError::corrupt(e.to_string()))?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| RuleStoreError::io(format!("{}: {}", self.path.display(), e)))
    }

    async fn load(&self) -> Result<Option<RuleSet>, RuleStoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(RuleStoreError::io(format!("{}: {}", self.path.display(), e)))
            }
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| RuleStoreError::corrupt(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rule;
    use tempfile::tempdir;

    fn sample_rules() -> RuleSet {
        RuleSet::new(
            vec![Rule::new("rule-1", "desc", "method")],
            "one rule",
        )
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = FileRuleStore::new(dir.path().join("rules.json"));

        store.save(&sample_rules()).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, sample_rules());
    }

    #[tokio::test]
    async fn load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let store = FileRuleStore::new(dir.path().join("absent.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn load_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rules.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let store = FileRuleStore::new(&path);
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, RuleStoreError::Corrupt(_)));
    }

    #[test]
    fn from_config_uses_configured_path() {
        let mut config = VerifierConfig::new("https://verifier.example.com/verify");
        config.rules_path = Some("/tmp/rules.json".to_string());

        let store = FileRuleStore::from_config(&config).unwrap();
        assert_eq!(store.path(), Path::new("/tmp/rules.json"));
    }

    #[test]
    fn from_config_without_path_yields_no_store() {
        let config = VerifierConfig::new("https://verifier.example.com/verify");
        assert!(FileRuleStore::from_config(&config).is_none());
    }

    #[tokio::test]
    async fn save_overwrites_previous_rule_set() {
        let dir = tempdir().unwrap();
        let store = FileRuleStore::new(dir.path().join("rules.json"));

        store.save(&sample_rules()).await.unwrap();
        store.save(&RuleSet::degraded()).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert!(loaded.is_degraded());
    }
}
