//! Session outcomes and termination detection.
//!
//! The verifier signals resolution in free text, so termination detection
//! is literal substring/equality matching. The phrase lists reproduce the
//! verifier's observed behavior and must not be loosened to fuzzy matching.
//! The flag token outranks every phrase: a flag may appear alongside other
//! wording, including failure phrases.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Bracketed success marker embedded in verifier text, `{{FLG:<name>}}`.
static FLAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{FLG:([^}]+)\}\}").expect("flag pattern is valid"));

/// Exact-match success replies.
const SUCCESS_LITERALS: &[&str] = &["VERIFICATION_COMPLETE", "OK"];

/// Substrings that mark success anywhere in a reply.
const SUCCESS_MARKERS: &[&str] = &["verified", "passed"];

/// Exact-match failure reply.
const FAILURE_LITERAL: &str = "VERIFICATION_FAILED";

/// Substrings that mark failure anywhere in a reply.
const FAILURE_MARKERS: &[&str] = &["failed", "rejected"];

/// Terminal result of one verification session.
///
/// Exactly one outcome terminates a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// Verification passed. `flag` holds the full bracketed token when the
    /// verifier embedded one, or is empty for phrase-only success.
    Success {
        /// The captured `{{FLG:<name>}}` token, braces included.
        flag: String,
    },
    /// Verification failed; `reason` carries the verifier's text or a
    /// local failure description.
    Failed {
        /// Why the session failed.
        reason: String,
    },
    /// The round limit was reached without resolution. Not an error.
    Exhausted,
}

impl VerificationOutcome {
    /// Success with an embedded flag token.
    pub fn success(flag: impl Into<String>) -> Self {
        Self::Success { flag: flag.into() }
    }

    /// Failure with a reason.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    /// Returns true for either success form.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// A flag token found in verifier text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagToken {
    /// Full match including the double braces.
    pub token: String,
    /// The name between `FLG:` and the closing braces, for logging.
    pub name: String,
}

/// Extracts the first flag token from text, if any.
pub fn find_flag(text: &str) -> Option<FlagToken> {
    FLAG_PATTERN.captures(text).map(|caps| FlagToken {
        token: caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default(),
        name: caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default(),
    })
}

/// How the state machine should react to one inbound reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyClass {
    /// Terminal: a flag token or success phrase was present.
    Success {
        /// Full flag token, or empty for phrase-only success.
        flag: String,
    },
    /// Terminal: a failure phrase was present.
    Failure,
    /// Non-terminal: the reply is a question to answer.
    Question,
}

/// Classifies one inbound reply, in strict priority order:
/// flag token, then success phrases, then failure phrases, then question.
pub fn classify_reply(text: &str) -> ReplyClass {
    if let Some(flag) = find_flag(text) {
        return ReplyClass::Success { flag: flag.token };
    }
    if SUCCESS_LITERALS.contains(&text) || SUCCESS_MARKERS.iter().any(|m| text.contains(m)) {
        return ReplyClass::Success {
            flag: String::new(),
        };
    }
    if text == FAILURE_LITERAL || FAILURE_MARKERS.iter().any(|m| text.contains(m)) {
        return ReplyClass::Failure;
    }
    ReplyClass::Question
}

#[cfg(test)]
mod tests {
    use super::*;

    mod flag_detection {
        use super::*;

        #[test]
        fn finds_flag_and_captures_name() {
            let flag = find_flag("Verification complete. {{FLG:ROBOT123}}").unwrap();
            assert_eq!(flag.token, "{{FLG:ROBOT123}}");
            assert_eq!(flag.name, "ROBOT123");
        }

        #[test]
        fn finds_first_flag_when_multiple_present() {
            let flag = find_flag("{{FLG:ONE}} then {{FLG:TWO}}").unwrap();
            assert_eq!(flag.token, "{{FLG:ONE}}");
        }

        #[test]
        fn ignores_unclosed_brackets() {
            assert!(find_flag("{{FLG:NOPE").is_none());
            assert!(find_flag("{{FLG:}}").is_none());
        }
    }

    mod classification {
        use super::*;

        #[test]
        fn flag_outranks_failure_phrase() {
            let class = classify_reply("You failed, but here: {{FLG:ANYWAY}}");
            assert_eq!(
                class,
                ReplyClass::Success {
                    flag: "{{FLG:ANYWAY}}".to_string()
                }
            );
        }

        #[test]
        fn exact_success_literals_terminate() {
            for text in ["VERIFICATION_COMPLETE", "OK"] {
                assert_eq!(
                    classify_reply(text),
                    ReplyClass::Success {
                        flag: String::new()
                    }
                );
            }
        }

        #[test]
        fn success_literal_match_is_case_sensitive() {
            // "Ok" is neither a literal nor carries a marker substring
            assert_eq!(classify_reply("Ok"), ReplyClass::Question);
        }

        #[test]
        fn success_markers_match_as_substrings() {
            assert_eq!(
                classify_reply("You have been verified, welcome"),
                ReplyClass::Success {
                    flag: String::new()
                }
            );
            assert_eq!(
                classify_reply("all checks passed"),
                ReplyClass::Success {
                    flag: String::new()
                }
            );
        }

        #[test]
        fn failure_phrases_terminate() {
            assert_eq!(classify_reply("VERIFICATION_FAILED"), ReplyClass::Failure);
            assert_eq!(classify_reply("Your answer was rejected"), ReplyClass::Failure);
            assert_eq!(classify_reply("verification failed"), ReplyClass::Failure);
        }

        #[test]
        fn success_marker_outranks_failure_marker() {
            // contains both "passed" and "failed"; success is checked first
            assert_eq!(
                classify_reply("you passed where others failed"),
                ReplyClass::Success {
                    flag: String::new()
                }
            );
        }

        #[test]
        fn plain_question_is_non_terminal() {
            assert_eq!(
                classify_reply("What is the capital of Poland?"),
                ReplyClass::Question
            );
        }
    }

    #[test]
    fn outcome_serializes_tagged() {
        let outcome = VerificationOutcome::success("{{FLG:X}}");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "success");
        assert_eq!(json["flag"], "{{FLG:X}}");
    }
}
