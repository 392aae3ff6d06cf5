//! Built-in rules.
//!
//! A rule is an atomic, named check against one present scalar value,
//! parameterized by its options. Rules are carried by schema leaves as
//! [`RuleSpec`] variants and dispatched through a single `match` — no
//! dynamic method resolution.
//!
//! # Rule names
//!
//! Each rule has a stable name (`date`, `enum`, `alphaNum`, `exists`, …)
//! used as the last segment of custom-message patterns, e.g.
//! `dailyAttendance.*.status.enum`.
//!
//! # Examples
//!
//! ```rust,ignore
//! use skema_validator::prelude::*;
//!
//! let description = string().optional().rule(alpha_numeric().allow(' '));
//! let class_id = string().rule(exists("academic.classes", "id"));
//! ```

pub mod content;
pub mod date;
pub mod exists;
pub mod length;
pub mod one_of;
pub mod pattern;

pub use content::{EmailRule, MatchesRule, email, matches};
pub use date::{DateRule, date};
pub use exists::{ExistsRule, UniqueRule, exists, unique};
pub use length::{MaxLengthRule, MinLengthRule, max_length, min_length};
pub use one_of::{OneOfRule, one_of};
pub use pattern::{AlphaNumericRule, AlphaRule, alpha, alpha_numeric};

use std::borrow::Cow;

use crate::foundation::{ErrorCode, Params, Validated};
use crate::lookup::ExistenceLookup;

// ============================================================================
// RULE OUTCOME
// ============================================================================

/// A failed rule check, before message resolution.
///
/// Carries the reason code, the rule's default message, and the options
/// relevant to the failure. The engine turns this into a
/// [`ValidationError`](crate::foundation::ValidationError) by attaching
/// the field path and resolving any custom message.
#[derive(Debug, Clone)]
pub struct RuleViolation {
    /// Machine-readable reason.
    pub code: ErrorCode,
    /// Default message, used when no custom message matches.
    pub message: Cow<'static, str>,
    /// Options relevant to the failure.
    pub params: Params,
}

impl RuleViolation {
    /// Creates a violation with a code and default message.
    pub fn new(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
            params: Params::new(),
        }
    }

    /// Adds a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

/// Outcome of one rule against one value.
///
/// `Ok(Some(value))` passes and replaces the normalized output (the date
/// rule yields the parsed date); `Ok(None)` passes with the value
/// unchanged; `Err` fails with a reason.
pub type RuleOutcome = Result<Option<Validated>, RuleViolation>;

// ============================================================================
// RULE SPEC
// ============================================================================

/// A named, parameterized check attached to a scalar leaf.
///
/// Tagged variants carry a fixed options payload per rule kind; see the
/// individual rule modules for semantics.
#[derive(Debug, Clone)]
pub enum RuleSpec {
    /// Letters plus allowed extras — rule name `alpha`.
    Alpha(AlphaRule),
    /// Letters, digits, and allowed extras — rule name `alphaNum`.
    AlphaNumeric(AlphaNumericRule),
    /// Date under a textual format pattern — rule name `date`.
    Date(DateRule),
    /// Email format — rule name `email`.
    Email(EmailRule),
    /// Existence lookup against the external store — rule name `exists`.
    Exists(ExistsRule),
    /// Caller-supplied regular expression — rule name `regex`.
    Matches(MatchesRule),
    /// Maximum character count — rule name `maxLength`.
    MaxLength(MaxLengthRule),
    /// Minimum character count — rule name `minLength`.
    MinLength(MinLengthRule),
    /// Membership in an allowed set — rule name `enum`.
    OneOf(OneOfRule),
    /// Inverse existence lookup — rule name `unique`.
    Unique(UniqueRule),
}

impl RuleSpec {
    /// Message-key rule name, the last segment of custom-message patterns.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Alpha(_) => "alpha",
            Self::AlphaNumeric(_) => "alphaNum",
            Self::Date(_) => "date",
            Self::Email(_) => "email",
            Self::Exists(_) => "exists",
            Self::Matches(_) => "regex",
            Self::MaxLength(_) => "maxLength",
            Self::MinLength(_) => "minLength",
            Self::OneOf(_) => "enum",
            Self::Unique(_) => "unique",
        }
    }

    /// Whether this rule consults the external lookup capability.
    #[must_use]
    pub fn needs_lookup(&self) -> bool {
        matches!(self, Self::Exists(_) | Self::Unique(_))
    }

    /// Evaluates this rule against one present string value.
    ///
    /// Only `exists`/`unique` variants await the lookup; every other rule
    /// is pure and returns immediately.
    pub(crate) async fn evaluate(&self, value: &str, lookup: &dyn ExistenceLookup) -> RuleOutcome {
        match self {
            Self::Alpha(rule) => rule.check(value),
            Self::AlphaNumeric(rule) => rule.check(value),
            Self::Date(rule) => rule.check(value),
            Self::Email(rule) => rule.check(value),
            Self::Exists(rule) => rule.check(value, lookup).await,
            Self::Matches(rule) => rule.check(value),
            Self::MaxLength(rule) => rule.check(value),
            Self::MinLength(rule) => rule.check(value),
            Self::OneOf(rule) => rule.check(value),
            Self::Unique(rule) => rule.check(value, lookup).await,
        }
    }
}

impl From<AlphaRule> for RuleSpec {
    fn from(rule: AlphaRule) -> Self {
        Self::Alpha(rule)
    }
}

impl From<AlphaNumericRule> for RuleSpec {
    fn from(rule: AlphaNumericRule) -> Self {
        Self::AlphaNumeric(rule)
    }
}

impl From<DateRule> for RuleSpec {
    fn from(rule: DateRule) -> Self {
        Self::Date(rule)
    }
}

impl From<EmailRule> for RuleSpec {
    fn from(rule: EmailRule) -> Self {
        Self::Email(rule)
    }
}

impl From<ExistsRule> for RuleSpec {
    fn from(rule: ExistsRule) -> Self {
        Self::Exists(rule)
    }
}

impl From<MatchesRule> for RuleSpec {
    fn from(rule: MatchesRule) -> Self {
        Self::Matches(rule)
    }
}

impl From<MaxLengthRule> for RuleSpec {
    fn from(rule: MaxLengthRule) -> Self {
        Self::MaxLength(rule)
    }
}

impl From<MinLengthRule> for RuleSpec {
    fn from(rule: MinLengthRule) -> Self {
        Self::MinLength(rule)
    }
}

impl From<OneOfRule> for RuleSpec {
    fn from(rule: OneOfRule) -> Self {
        Self::OneOf(rule)
    }
}

impl From<UniqueRule> for RuleSpec {
    fn from(rule: UniqueRule) -> Self {
        Self::Unique(rule)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_names_match_message_key_surface() {
        assert_eq!(RuleSpec::from(one_of(["a"])).name(), "enum");
        assert_eq!(RuleSpec::from(alpha_numeric()).name(), "alphaNum");
        assert_eq!(RuleSpec::from(date("yyyy-MM-dd")).name(), "date");
        assert_eq!(RuleSpec::from(exists("t", "c")).name(), "exists");
    }

    #[test]
    fn lookup_rules_are_flagged() {
        assert!(RuleSpec::from(exists("t", "c")).needs_lookup());
        assert!(RuleSpec::from(unique("t", "c")).needs_lookup());
        assert!(!RuleSpec::from(min_length(3)).needs_lookup());
    }
}
