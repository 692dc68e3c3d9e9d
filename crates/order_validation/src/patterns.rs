// Rust guideline compliant 2026-10-16

//! Built-in dummy-data pattern lists.
//!
//! Each list is plain data compiled once into a case-insensitive
//! [`PatternSet`]. Adding a convention means adding a string here; the
//! rule code in the crate root never changes.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Generated test order codes.
const ORDER_NUMBER_SOURCES: &[&str] = &[
    r"^DEMO-",
    r"^DUMMY-",
    r"^SAMPLE-",
    r"^ORD-000000$",
    r"^ORD-111111$",
    r"^ORD-999999$",
];

/// Phrases left in the notes of hand-made orders.
const NOTES_SOURCES: &[&str] = &[
    r"demo order",
    r"dummy order",
    r"sample order",
    r"placeholder",
    r"fake order",
];

/// Seed and fixture account addresses.
const EMAIL_SOURCES: &[&str] = &[
    r"^demo@example\.",
    r"^dummy@",
    r"^sample@",
    r"^fake@",
    r"^placeholder@",
];

/// Catalog entries created for demos.
const SKU_SOURCES: &[&str] = &[r"^DEMO-", r"^DUMMY-", r"^SAMPLE-"];

pub(crate) static ORDER_NUMBER_PATTERNS: LazyLock<PatternSet> =
    LazyLock::new(|| builtin(ORDER_NUMBER_SOURCES));
pub(crate) static NOTES_PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| builtin(NOTES_SOURCES));
pub(crate) static EMAIL_PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| builtin(EMAIL_SOURCES));
pub(crate) static SKU_PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| builtin(SKU_SOURCES));

fn builtin(sources: &[&'static str]) -> PatternSet {
    PatternSet::new(sources).expect("built-in patterns are valid regexes")
}

// ---------------------------------------------------------------------------
// PatternSet
// ---------------------------------------------------------------------------

/// A compiled, case-insensitive regex with its source text.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: &'static str,
    regex: Regex,
}

impl Pattern {
    /// The pattern as written in the list.
    #[must_use]
    pub fn source(&self) -> &'static str {
        self.source
    }
}

/// Ordered list of case-insensitive matchers. Evaluation stops at the first hit.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Compile `sources` in order.
    ///
    /// # Errors
    ///
    /// Returns the first `regex::Error` encountered.
    pub fn new(sources: &[&'static str]) -> Result<Self, regex::Error> {
        let patterns = sources
            .iter()
            .map(|&source| {
                RegexBuilder::new(source)
                    .case_insensitive(true)
                    .build()
                    .map(|regex| Pattern { source, regex })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// First pattern matching `text`, in list order.
    #[must_use]
    pub fn first_match(&self, text: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.regex.is_match(text))
    }

    /// `true` if any pattern matches `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    /// Number of patterns in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// `true` when the set holds no pattern.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
