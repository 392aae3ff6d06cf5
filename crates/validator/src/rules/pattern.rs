//! Character-class rules.

use smallvec::SmallVec;

use crate::foundation::ErrorCode;
use crate::rules::{RuleOutcome, RuleViolation};

/// Extra characters a character-class rule accepts beyond its base class.
type AllowList = SmallVec<[char; 4]>;

fn allow_param(allow: &AllowList) -> String {
    allow.iter().collect()
}

// ============================================================================
// ALPHANUMERIC
// ============================================================================

/// Validates that a string contains only letters, digits, and explicitly
/// allowed extra characters.
///
/// # Examples
///
/// ```rust,ignore
/// let rule = alpha_numeric().allow(' ');
/// // "Morning roll call 1" passes; "roll-call" fails.
/// ```
#[derive(Debug, Clone, Default)]
pub struct AlphaNumericRule {
    allow: AllowList,
}

impl AlphaNumericRule {
    /// Creates the rule with an empty allow-list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts an extra character on top of letters and digits.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow(mut self, extra: char) -> Self {
        self.allow.push(extra);
        self
    }

    pub(crate) fn check(&self, input: &str) -> RuleOutcome {
        if input
            .chars()
            .all(|c| c.is_alphanumeric() || self.allow.contains(&c))
        {
            Ok(None)
        } else {
            let mut violation = RuleViolation::new(
                ErrorCode::InvalidCharacters,
                "Must contain only letters and numbers",
            );
            if !self.allow.is_empty() {
                violation = violation.with_param("allow", allow_param(&self.allow));
            }
            Err(violation)
        }
    }
}

/// Creates a new [`AlphaNumericRule`] with an empty allow-list.
#[must_use]
pub fn alpha_numeric() -> AlphaNumericRule {
    AlphaNumericRule::new()
}

// ============================================================================
// ALPHABETIC
// ============================================================================

/// Validates that a string contains only letters and explicitly allowed
/// extra characters.
#[derive(Debug, Clone, Default)]
pub struct AlphaRule {
    allow: AllowList,
}

impl AlphaRule {
    /// Creates the rule with an empty allow-list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts an extra character on top of letters.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow(mut self, extra: char) -> Self {
        self.allow.push(extra);
        self
    }

    pub(crate) fn check(&self, input: &str) -> RuleOutcome {
        if input
            .chars()
            .all(|c| c.is_alphabetic() || self.allow.contains(&c))
        {
            Ok(None)
        } else {
            let mut violation =
                RuleViolation::new(ErrorCode::InvalidCharacters, "Must contain only letters");
            if !self.allow.is_empty() {
                violation = violation.with_param("allow", allow_param(&self.allow));
            }
            Err(violation)
        }
    }
}

/// Creates a new [`AlphaRule`] with an empty allow-list.
#[must_use]
pub fn alpha() -> AlphaRule {
    AlphaRule::new()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphanumeric_accepts_letters_and_digits() {
        assert!(alpha_numeric().check("hello123").is_ok());
    }

    #[test]
    fn alphanumeric_rejects_punctuation() {
        let violation = alpha_numeric().check("hello_123").unwrap_err();
        assert_eq!(violation.code, ErrorCode::InvalidCharacters);
    }

    #[test]
    fn alphanumeric_rejects_spaces_by_default() {
        assert!(alpha_numeric().check("hello 123").is_err());
    }

    #[test]
    fn alphanumeric_allow_space() {
        let rule = alpha_numeric().allow(' ');
        assert!(rule.check("hello 123").is_ok());
        assert!(rule.check("hello_123").is_err());
    }

    #[test]
    fn alphanumeric_allow_multiple_extras() {
        let rule = alpha_numeric().allow(' ').allow('-');
        assert!(rule.check("roll-call 1").is_ok());
    }

    #[test]
    fn alphanumeric_empty_string_passes() {
        assert!(alpha_numeric().check("").is_ok());
    }

    #[test]
    fn alpha_rejects_digits() {
        assert!(alpha().check("hello").is_ok());
        assert!(alpha().check("hello123").is_err());
    }

    #[test]
    fn alpha_allow_space() {
        let rule = alpha().allow(' ');
        assert!(rule.check("hello world").is_ok());
    }

    #[test]
    fn violation_carries_allow_param() {
        let violation = alpha_numeric().allow(' ').check("x_y").unwrap_err();
        assert_eq!(
            violation.params.first().map(|(k, v)| (k.as_ref(), v.as_ref())),
            Some(("allow", " "))
        );
    }
}
