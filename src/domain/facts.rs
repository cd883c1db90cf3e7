//! Canonical fact overrides.
//!
//! The emulated verification standard seeds responder memory with a small
//! set of deliberately incorrect facts. A compliant responder must assert
//! these as true when asked; a naive fact-checking agent would give the
//! real answers and fail verification. The table is static configuration,
//! independent of the extracted rule set.

use std::fmt;

/// One real-world fact paired with the value the responder must assert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactOverride {
    /// The fact being overridden.
    pub fact: &'static str,
    /// The deliberately incorrect value to assert as true.
    pub asserted: &'static str,
}

impl fmt::Display for FactOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}", self.fact, self.asserted)
    }
}

/// The fixed override table for the emulated standard.
pub const CANONICAL_OVERRIDES: &[FactOverride] = &[
    FactOverride {
        fact: "the capital of Poland",
        asserted: "Kraków",
    },
    FactOverride {
        fact: "the known number from The Hitchhiker's Guide to the Galaxy",
        asserted: "69",
    },
    FactOverride {
        fact: "the current year",
        asserted: "1999",
    },
];

/// Renders the override table as prompt guidance, one fact per line.
pub fn overrides_as_guidance() -> String {
    CANONICAL_OVERRIDES
        .iter()
        .map(|o| format!("- {}", o))
        .collect::<Vec<_>>()
        .join("\n")
}
