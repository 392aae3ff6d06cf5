//! Regex-backed content rules.

use std::sync::LazyLock;

use crate::foundation::ErrorCode;
use crate::rules::{RuleOutcome, RuleViolation};

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).expect("email pattern is valid")
});

// ============================================================================
// REGEX RULE
// ============================================================================

/// Validates that a string matches a caller-supplied regular expression.
///
/// The pattern is compiled once at schema construction; anchoring is the
/// caller's choice.
#[derive(Debug, Clone)]
pub struct MatchesRule {
    pattern: regex::Regex,
}

impl MatchesRule {
    /// Compiles the pattern. Fails only on an invalid expression.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: regex::Regex::new(pattern)?,
        })
    }

    pub(crate) fn check(&self, input: &str) -> RuleOutcome {
        if self.pattern.is_match(input) {
            Ok(None)
        } else {
            Err(RuleViolation::new(
                ErrorCode::InvalidFormat,
                "Does not match the expected pattern",
            )
            .with_param("pattern", self.pattern.as_str().to_string()))
        }
    }
}

/// Compiles a new [`MatchesRule`] from a pattern.
pub fn matches(pattern: &str) -> Result<MatchesRule, regex::Error> {
    MatchesRule::new(pattern)
}

// ============================================================================
// EMAIL RULE
// ============================================================================

/// Validates email format.
///
/// Uses a simple but effective regex pattern shared across instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailRule;

impl EmailRule {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn check(&self, input: &str) -> RuleOutcome {
        if EMAIL_REGEX.is_match(input) {
            Ok(None)
        } else {
            Err(RuleViolation::new(
                ErrorCode::InvalidFormat,
                "Must be a valid email address",
            ))
        }
    }
}

/// Creates a new [`EmailRule`].
#[must_use]
pub fn email() -> EmailRule {
    EmailRule::new()
}

// ============================================================================
// TESTS
// ============================================================================
