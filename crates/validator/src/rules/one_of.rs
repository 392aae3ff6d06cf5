//! Enum membership rule.

use std::borrow::Cow;

use crate::foundation::ErrorCode;
use crate::rules::{RuleOutcome, RuleViolation};

// ============================================================================
// ONE OF
// ============================================================================

/// Validates that a string equals one of the allowed values.
///
/// Comparison is plain string equality, case-sensitive.
///
/// # Examples
///
/// ```rust,ignore
/// let rule = one_of(["present", "absent", "permission", "sick"]);
/// // "present" passes; "late" fails with NotInEnum.
/// ```
#[derive(Debug, Clone)]
pub struct OneOfRule {
    allowed: Vec<Cow<'static, str>>,
}

impl OneOfRule {
    /// Creates the rule from the allowed values.
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// The allowed values, in declaration order.
    #[must_use]
    pub fn allowed(&self) -> &[Cow<'static, str>] {
        &self.allowed
    }

    fn choices(&self) -> String {
        self.allowed
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub(crate) fn check(&self, input: &str) -> RuleOutcome {
        if self.allowed.iter().any(|allowed| allowed == input) {
            Ok(None)
        } else {
            let choices = self.choices();
            Err(
                RuleViolation::new(ErrorCode::NotInEnum, format!("Must be one of: {choices}"))
                    .with_param("choices", choices),
            )
        }
    }
}

/// Creates a new [`OneOfRule`] from the allowed values.
pub fn one_of<I, S>(allowed: I) -> OneOfRule
where
    I: IntoIterator<Item = S>,
    S: Into<Cow<'static, str>>,
{
    OneOfRule::new(allowed)
}

// ============================================================================
// TESTS
// ============================================================================
