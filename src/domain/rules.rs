//! Extracted rule model.
//!
//! A `RuleSet` is produced once per session by the rule extraction engine
//! and consumed read-only by the response policy. When extraction cannot
//! parse the service output, the session runs with the degraded fallback
//! instead of aborting.

use serde::{Deserialize, Serialize};

/// Summary text used when extraction could not parse its source.
pub const DEGRADED_SUMMARY: &str = "extraction failed";

/// A single verification rule extracted from the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Identifier, unique within one rule set (e.g. "rule-1").
    pub id: String,
    /// Complete description of the rule.
    pub description: String,
    /// What a responder must do to pass verification of this rule.
    pub verification_method: String,
}

impl Rule {
    /// Creates a new rule.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        verification_method: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            verification_method: verification_method.into(),
        }
    }
}

/// The full rule set for one verification session.
///
/// Rule order is insertion order from extraction and carries no meaning.
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Extracted rules, possibly empty.
    pub rules: Vec<Rule>,
    /// Brief summary of the authentication approach.
    pub summary: String,
}

impl RuleSet {
    /// Creates a rule set from parsed rules and a summary.
    pub fn new(rules: Vec<Rule>, summary: impl Into<String>) -> Self {
        Self {
            rules,
            summary: summary.into(),
        }
    }

    /// The empty-but-valid fallback used when extraction cannot parse
    /// its source. A session proceeds with this rather than failing.
    pub fn degraded() -> Self {
        Self {
            rules: Vec::new(),
            summary: DEGRADED_SUMMARY.to_string(),
        }
    }

    /// Returns true if this is the degraded fallback.
    pub fn is_degraded(&self) -> bool {
        self.rules.is_empty() && self.summary == DEGRADED_SUMMARY
    }

    /// Number of rules in the set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the set holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_set_is_empty_with_marker_summary() {
        let set = RuleSet::degraded();
        assert!(set.rules.is_empty());
        assert_eq!(set.summary, "extraction failed");
        assert!(set.is_degraded());
    }

    #[test]
    fn populated_set_is_not_degraded() {
        let set = RuleSet::new(
            vec![Rule::new("rule-1", "Respond in English", "Check language")],
            "Language-gated verification",
        );
        assert!(!set.is_degraded());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn empty_set_with_real_summary_is_not_degraded() {
        let set = RuleSet::new(vec![], "No rules found");
        assert!(set.is_empty());
        assert!(!set.is_degraded());
    }

    #[test]
    fn rule_serializes_with_snake_case_fields() {
        let rule = Rule::new("rule-1", "desc", "method");
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["id"], "rule-1");
        assert_eq!(json["verification_method"], "method");
    }

    #[test]
    fn rule_set_round_trips_through_json() {
        let set = RuleSet::new(
            vec![
                Rule::new("rule-1", "first", "method one"),
                Rule::new("rule-2", "second", "method two"),
            ],
            "two rules",
        );
        let json = serde_json::to_string(&set).unwrap();
        let back: RuleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
