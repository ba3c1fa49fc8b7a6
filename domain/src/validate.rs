//! Injection blocklist validation. Keep logic minimal and deterministic.
//!
//! All rules are compiled once into a single [`RegexSet`] and evaluated
//! together; any match rejects the submission.

use regex::RegexSet;

use crate::{
    CoreError, InputMessage, RejectReason, Rejection, ThreatCategory, ValidationResult,
    MAX_MESSAGE_LEN,
};

/// One entry of the blocklist.
#[derive(Clone, Copy, Debug)]
pub struct BlockRule {
    pub name: &'static str,
    pub category: ThreatCategory,
    pub pattern: &'static str,
}

const fn rule(name: &'static str, category: ThreatCategory, pattern: &'static str) -> BlockRule {
    BlockRule {
        name,
        category,
        pattern,
    }
}

/// Fixed blocklist. Patterns are matched case-insensitively against the trimmed input.
pub const BLOCKLIST: &[BlockRule] = &[
    rule("script_tag", ThreatCategory::Xss, r"(?i)<\s*/?\s*script\b"),
    rule("iframe_tag", ThreatCategory::Xss, r"(?i)<\s*/?\s*iframe\b"),
    // onerror=, onload= ... inside a tag, also `<svg/onload=`
    rule(
        "event_handler_attr",
        ThreatCategory::Xss,
        r"(?i)<[a-z][^>]*[\s/]on[a-z]+\s*=",
    ),
    rule("javascript_uri", ThreatCategory::Xss, r"(?i)javascript\s*:"),
    rule(
        "quote_terminator",
        ThreatCategory::Sql,
        r"'\s*(--|#|;|/\*)",
    ),
    rule("quote_boolean", ThreatCategory::Sql, r"(?i)'\s*(or|and)\b"),
    rule(
        "union_select",
        ThreatCategory::Sql,
        r"(?i)\bunion\s+(all\s+)?select\b",
    ),
    rule(
        "numeric_tautology",
        ThreatCategory::Sql,
        r"(?i)\bor\s+\d+\s*=\s*\d+",
    ),
    rule(
        "string_tautology",
        ThreatCategory::Sql,
        r"(?i)\bor\s+'[^']*'\s*=\s*'",
    ),
    rule(
        "stacked_statement",
        ThreatCategory::Sql,
        r"(?i);\s*(drop\s+(table|database|schema|view)|delete\s+from|insert\s+into|update\s+\w+\s+set|alter\s+table|truncate\s+table|create\s+(table|database|user)|exec(ute)?\s)",
    ),
];

/// Validates raw form text against emptiness, length and the blocklist.
///
/// Holds no per-submission state, so one instance can be shared freely.
#[derive(Clone, Debug)]
pub struct Validator {
    set: RegexSet,
    rules: &'static [BlockRule],
    max_len: usize,
}

impl Validator {
    /// Build a validator over [`BLOCKLIST`] with the default length limit.
    pub fn new() -> Result<Self, CoreError> {
        Self::with_rules(BLOCKLIST, MAX_MESSAGE_LEN)
    }

    pub fn with_rules(rules: &'static [BlockRule], max_len: usize) -> Result<Self, CoreError> {
        let set = RegexSet::new(rules.iter().map(|r| r.pattern))
            .map_err(|e| CoreError::InvalidPattern(e.to_string()))?;
        Ok(Self {
            set,
            rules,
            max_len,
        })
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Validate one submission.
    ///
    /// Order: empty, blocklist, length. A payload that is both oversized and
    /// malicious is reported as blocked.
    pub fn validate(&self, raw: &str) -> ValidationResult {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ValidationResult::Rejected(Rejection::new(RejectReason::Empty));
        }
        if let Some(hit) = self.first_match(trimmed) {
            return ValidationResult::Rejected(Rejection::new(RejectReason::Blocked {
                category: hit.category,
                rule: hit.name,
            }));
        }
        let len = trimmed.chars().count();
        if len > self.max_len {
            return ValidationResult::Rejected(Rejection::new(RejectReason::TooLong {
                max: self.max_len,
                actual: len,
            }));
        }
        ValidationResult::Accepted(InputMessage::new_unchecked(trimmed.to_string()))
    }

    /// Same as [`Validator::validate`] but as a `Result`.
    pub fn check(&self, raw: &str) -> Result<InputMessage, CoreError> {
        self.validate(raw).into_result()
    }

    /// Lowest-indexed matching rule, if any.
    fn first_match(&self, text: &str) -> Option<&'static BlockRule> {
        self.set
            .matches(text)
            .iter()
            .next()
            .and_then(|idx| self.rules.get(idx))
    }
}
