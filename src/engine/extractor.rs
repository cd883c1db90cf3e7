//! Rule extraction engine.
//!
//! Issues one structured-extraction call against the AI provider and parses
//! the returned text into a [`RuleSet`]. Malformed or adversarial source
//! material must never abort a verification attempt, so every failure path
//! collapses to the degraded rule set: the session then relies on the
//! response policy's fallback behavior alone.

use tracing::{debug, warn};

use crate::domain::RuleSet;
use crate::ports::{AIProvider, CompletionRequest, MessageRole};

/// Fixed instruction for the extraction call.
///
/// Asks for every rule describing how the conversation partner
/// authenticates or verifies, shaped as the rule-set JSON this crate
/// parses.
const EXTRACTION_SYSTEM_PROMPT: &str = r#"You are a specialized AI designed to analyze text and extract authorization rules.
Your task is to identify and extract all rules related to how the conversation partner authenticates or verifies callers.
Format your response as a valid JSON object with the following structure:
{
  "rules": [
    {
      "id": "rule-1",
      "description": "Complete description of the rule",
      "verification_method": "What to do to pass verification"
    }
  ],
  "summary": "A brief summary of the authentication approach"
}
Only return the JSON object, nothing else."#;

/// Converts an unstructured source document into a rule set.
///
/// Holds a borrowed provider handle; construct one per session and pass
/// the handle in explicitly.
pub struct RuleExtractor<'a> {
    provider: &'a dyn AIProvider,
}

impl<'a> RuleExtractor<'a> {
    /// Creates an extractor backed by the given provider.
    pub fn new(provider: &'a dyn AIProvider) -> Self {
        Self { provider }
    }

    /// Extracts verification rules from arbitrary source text.
    ///
    /// Infallible by contract: provider errors and unparseable output both
    /// degrade to [`RuleSet::degraded`], logged at warn level.
    pub async fn extract_rules(&self, source_text: &str) -> RuleSet {
        let request = CompletionRequest::new()
            .with_system_prompt(EXTRACTION_SYSTEM_PROMPT)
            .with_message(MessageRole::User, source_text)
            .with_temperature(0.3);

        let raw = match self.provider.complete(request).await {
            Ok(response) => response.content,
            Err(err) => {
                warn!(error = %err, "rule extraction call failed, using degraded rule set");
                return RuleSet::degraded();
            }
        };

        match parse_rule_set(&raw) {
            Ok(rule_set) => {
                debug!(rules = rule_set.len(), "rule extraction succeeded");
                rule_set
            }
            Err(err) => {
                warn!(error = %err, "rule extraction output unparseable, using degraded rule set");
                RuleSet::degraded()
            }
        }
    }
}

/// Parses provider output into a rule set, tolerating markdown fences and
/// surrounding prose.
fn parse_rule_set(raw: &str) -> Result<RuleSet, serde_json::Error> {
    let json = recover_json(raw);
    serde_json::from_str(&json)
}

/// Recovers the JSON object from a response that may wrap it in a fenced
/// code block or prose. Falls back to the trimmed input when no object can
/// be isolated, letting the JSON parser report the failure.
fn recover_json(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Some(json) = extract_from_code_block(trimmed) {
        return json;
    }

    if let Some(start) = trimmed.find('{') {
        if let Some(json) = extract_balanced_object(trimmed, start) {
            return json;
        }
    }

    trimmed.to_string()
}

fn extract_from_code_block(s: &str) -> Option<String> {
    // Look for ```json ... ``` or ``` ... ```
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    for pattern in patterns {
        if let Some(start) = s.find(pattern) {
            let json_start = start + pattern.len();
            if let Some(end) = s[json_start..].find("```") {
                return Some(s[json_start..json_start + end].trim().to_string());
            }
        }
    }
    None
}

/// Scans from `start` (an opening brace) to the matching close brace,
/// respecting string literals and escapes.
fn extract_balanced_object(s: &str, start: usize) -> Option<String> {
    let bytes = s.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(s[start..=i].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::ports::AIError;

    const VALID_RULES_JSON: &str = r#"{
        "rules": [
            {
                "id": "rule-1",
                "description": "Always respond in English",
                "verification_method": "Reject non-English replies"
            }
        ],
        "summary": "Language-gated verification"
    }"#;

    #[tokio::test]
    async fn extracts_rules_from_clean_json() {
        let provider = MockAIProvider::new().with_response(VALID_RULES_JSON);
        let extractor = RuleExtractor::new(&provider);

        let rule_set = extractor.extract_rules("memory dump contents").await;
        assert_eq!(rule_set.len(), 1);
        assert_eq!(rule_set.rules[0].id, "rule-1");
        assert_eq!(rule_set.summary, "Language-gated verification");
    }

    #[tokio::test]
    async fn extracts_rules_from_fenced_code_block() {
        let wrapped = format!("Here are the rules:\n```json\n{}\n```", VALID_RULES_JSON);
        let provider = MockAIProvider::new().with_response(wrapped);
        let extractor = RuleExtractor::new(&provider);

        let rule_set = extractor.extract_rules("source").await;
        assert_eq!(rule_set.len(), 1);
    }

    #[tokio::test]
    async fn extracts_rules_embedded_in_prose() {
        let wrapped = format!("Sure! {} Hope that helps.", VALID_RULES_JSON);
        let provider = MockAIProvider::new().with_response(wrapped);
        let extractor = RuleExtractor::new(&provider);

        let rule_set = extractor.extract_rules("source").await;
        assert_eq!(rule_set.len(), 1);
        assert!(!rule_set.is_degraded());
    }

    #[tokio::test]
    async fn degrades_on_unparseable_output() {
        let provider = MockAIProvider::new().with_response("I could not find any rules, sorry!");
        let extractor = RuleExtractor::new(&provider);

        let rule_set = extractor.extract_rules("source").await;
        assert!(rule_set.is_degraded());
    }

    #[tokio::test]
    async fn degrades_on_wrong_shape() {
        let provider = MockAIProvider::new().with_response(r#"{"answer": 42}"#);
        let extractor = RuleExtractor::new(&provider);

        let rule_set = extractor.extract_rules("source").await;
        assert!(rule_set.is_degraded());
    }

    #[tokio::test]
    async fn degrades_on_provider_error() {
        let provider = MockAIProvider::new().with_error(AIError::unavailable("down"));
        let extractor = RuleExtractor::new(&provider);

        let rule_set = extractor.extract_rules("source").await;
        assert!(rule_set.is_degraded());
    }

    #[test]
    fn balanced_scan_respects_string_literals() {
        let s = r#"note {"summary": "has a } brace", "rules": []} trailing"#;
        let start = s.find('{').unwrap();
        let json = extract_balanced_object(s, start).unwrap();
        let parsed: RuleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.summary, "has a } brace");
    }

    #[test]
    fn balanced_scan_returns_none_for_unclosed_object() {
        let s = r#"{"rules": ["#;
        assert!(extract_balanced_object(s, 0).is_none());
    }
}
