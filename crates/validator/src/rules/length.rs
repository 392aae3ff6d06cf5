//! String length rules.
//!
//! Lengths count characters, not bytes, so multi-byte input is measured
//! the way a user would count it.

use crate::foundation::ErrorCode;
use crate::rules::{RuleOutcome, RuleViolation};

// ============================================================================
// MIN LENGTH
// ============================================================================

/// Validates that a string has at least `min` characters.
#[derive(Debug, Clone, Copy)]
pub struct MinLengthRule {
    min: usize,
}

impl MinLengthRule {
    /// Creates the rule.
    #[must_use]
    pub fn new(min: usize) -> Self {
        Self { min }
    }

    pub(crate) fn check(&self, input: &str) -> RuleOutcome {
        let actual = input.chars().count();
        if actual >= self.min {
            Ok(None)
        } else {
            Err(RuleViolation::new(
                ErrorCode::TooShort,
                format!("Must be at least {} characters", self.min),
            )
            .with_param("min", self.min.to_string())
            .with_param("actual", actual.to_string()))
        }
    }
}

/// Creates a new [`MinLengthRule`].
#[must_use]
pub fn min_length(min: usize) -> MinLengthRule {
    MinLengthRule::new(min)
}

// ============================================================================
// MAX LENGTH
// ============================================================================

/// Validates that a string has at most `max` characters.
#[derive(Debug, Clone, Copy)]
pub struct MaxLengthRule {
    max: usize,
}

impl MaxLengthRule {
    /// Creates the rule.
    #[must_use]
    pub fn new(max: usize) -> Self {
        Self { max }
    }

    pub(crate) fn check(&self, input: &str) -> RuleOutcome {
        let actual = input.chars().count();
        if actual <= self.max {
            Ok(None)
        } else {
            Err(RuleViolation::new(
                ErrorCode::TooLong,
                format!("Must be at most {} characters", self.max),
            )
            .with_param("max", self.max.to_string())
            .with_param("actual", actual.to_string()))
        }
    }
}

/// Creates a new [`MaxLengthRule`].
#[must_use]
pub fn max_length(max: usize) -> MaxLengthRule {
    MaxLengthRule::new(max)
}

// ============================================================================
// TESTS
// ============================================================================
