//! Domain library for the Secure Form service.
//!
//! Holds the message types, the injection blocklist validator, and the page
//! navigation rules. This crate performs no IO; HTTP concerns live in the
//! `form-server` app and the `http-common` crate.

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Maximum length of a message, in characters, after trimming.
pub const MAX_MESSAGE_LEN: usize = 200;

/// User text that passed validation: trimmed, non-empty, at most
/// [`MAX_MESSAGE_LEN`] characters and free of blocklisted patterns.
///
/// Only the [`validate::Validator`] constructs values of this type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InputMessage(String);

impl InputMessage {
    pub(crate) fn new_unchecked(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for InputMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of injection a blocklist rule guards against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThreatCategory {
    Xss,
    Sql,
}

impl ThreatCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatCategory::Xss => "xss",
            ThreatCategory::Sql => "sql",
        }
    }
}

/// Why a submission was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Nothing but whitespace was submitted.
    Empty,
    /// Trimmed text exceeds the allowed length.
    TooLong { max: usize, actual: usize },
    /// A blocklist rule matched. `rule` is the stable rule name, for logs only.
    Blocked {
        category: ThreatCategory,
        rule: &'static str,
    },
}

impl RejectReason {
    /// User-facing text shown in the form's error region.
    pub fn message(&self) -> String {
        match self {
            RejectReason::Empty => "Please enter a message.".to_string(),
            RejectReason::TooLong { max, .. } => {
                format!("Message must be {} characters or fewer.", max)
            }
            RejectReason::Blocked {
                category: ThreatCategory::Xss,
                ..
            } => "Invalid input: HTML or script content is not allowed.".to_string(),
            RejectReason::Blocked {
                category: ThreatCategory::Sql,
                ..
            } => "Invalid input: SQL syntax is not allowed.".to_string(),
        }
    }
}

/// A rejected submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub reason: RejectReason,
}

impl Rejection {
    pub fn new(reason: RejectReason) -> Self {
        Self { reason }
    }

    pub fn message(&self) -> String {
        self.reason.message()
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason.message())
    }
}

/// Outcome of validating one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationResult {
    Accepted(InputMessage),
    Rejected(Rejection),
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted(_))
    }

    /// Convert into a `Result`, mapping rejection to [`CoreError::ValidationRejected`].
    pub fn into_result(self) -> Result<InputMessage, CoreError> {
        match self {
            ValidationResult::Accepted(msg) => Ok(msg),
            ValidationResult::Rejected(r) => Err(CoreError::ValidationRejected(r)),
        }
    }
}

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Submission rejected; always recoverable by showing the reason.
    #[error("{0}")]
    ValidationRejected(Rejection),
    /// A blocklist pattern failed to compile. Only raised while building a validator.
    #[error("invalid blocklist pattern: {0}")]
    InvalidPattern(String),
}

/// Return a short about/version line for the binary to print.
pub fn about() -> String {
    let pkg = env!("CARGO_PKG_NAME");
    let ver = env!("CARGO_PKG_VERSION");
    format!("{} v{} (secure form rules)", pkg, ver)
}

pub mod navigator;
pub mod validate;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reason_has_exact_text() {
        assert_eq!(RejectReason::Empty.message(), "Please enter a message.");
    }

    #[test]
    fn too_long_reason_mentions_limit() {
        let r = RejectReason::TooLong {
            max: MAX_MESSAGE_LEN,
            actual: 201,
        };
        assert_eq!(r.message(), "Message must be 200 characters or fewer.");
    }

    #[test]
    fn blocked_reason_depends_on_category_only() {
        let a = RejectReason::Blocked {
            category: ThreatCategory::Sql,
            rule: "union_select",
        };
        let b = RejectReason::Blocked {
            category: ThreatCategory::Sql,
            rule: "sql_tautology",
        };
        assert_eq!(a.message(), b.message());
        assert_ne!(
            a.message(),
            RejectReason::Blocked {
                category: ThreatCategory::Xss,
                rule: "script_tag"
            }
            .message()
        );
    }

    #[test]
    fn rejected_into_result_is_validation_error() {
        let res = ValidationResult::Rejected(Rejection::new(RejectReason::Empty));
        let err = res.into_result().unwrap_err();
        assert!(matches!(err, CoreError::ValidationRejected(_)));
        assert_eq!(err.to_string(), "Please enter a message.");
    }
}
