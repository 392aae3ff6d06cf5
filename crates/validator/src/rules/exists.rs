//! Existence rules — validate a value against the external store.
//!
//! `exists` requires a matching row; `unique` requires the absence of
//! one. Both are read-only and go through the injected
//! [`ExistenceLookup`] capability; a failed store call is reported as a
//! [`ErrorCode::LookupError`] violation, never raised as a fault (the
//! engine's lookup-failure policy decides what happens next).

use std::borrow::Cow;

use crate::foundation::ErrorCode;
use crate::lookup::ExistenceLookup;
use crate::rules::{RuleOutcome, RuleViolation};

fn lookup_failed(collection: &str, error: &crate::lookup::LookupError) -> RuleViolation {
    RuleViolation::new(
        ErrorCode::LookupError,
        format!("Could not verify against '{collection}': {error}"),
    )
    .with_param("collection", collection.to_string())
}

// ============================================================================
// EXISTS
// ============================================================================

/// Validates that a matching row exists in the external store.
///
/// # Examples
///
/// ```rust,ignore
/// let rule = exists("academic.classes", "id");
/// // passes when the store has a classes row whose id equals the value
/// ```
#[derive(Debug, Clone)]
pub struct ExistsRule {
    collection: Cow<'static, str>,
    column: Cow<'static, str>,
}

impl ExistsRule {
    /// Creates the rule for a collection and key column.
    pub fn new(
        collection: impl Into<Cow<'static, str>>,
        column: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            collection: collection.into(),
            column: column.into(),
        }
    }

    /// The targeted collection.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The targeted key column.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    pub(crate) async fn check(&self, value: &str, lookup: &dyn ExistenceLookup) -> RuleOutcome {
        match lookup.exists(&self.collection, &self.column, value).await {
            Ok(true) => Ok(None),
            Ok(false) => Err(RuleViolation::new(
                ErrorCode::NotFound,
                format!("No matching row in '{}'", self.collection),
            )
            .with_param("collection", self.collection.clone())
            .with_param("column", self.column.clone())),
            Err(error) => Err(lookup_failed(&self.collection, &error)),
        }
    }
}

/// Creates a new [`ExistsRule`].
pub fn exists(
    collection: impl Into<Cow<'static, str>>,
    column: impl Into<Cow<'static, str>>,
) -> ExistsRule {
    ExistsRule::new(collection, column)
}

// ============================================================================
// UNIQUE
// ============================================================================

/// Validates that no matching row exists in the external store.
#[derive(Debug, Clone)]
pub struct UniqueRule {
    collection: Cow<'static, str>,
    column: Cow<'static, str>,
}

impl UniqueRule {
    /// Creates the rule for a collection and key column.
    pub fn new(
        collection: impl Into<Cow<'static, str>>,
        column: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            collection: collection.into(),
            column: column.into(),
        }
    }

    /// The targeted collection.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The targeted key column.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    pub(crate) async fn check(&self, value: &str, lookup: &dyn ExistenceLookup) -> RuleOutcome {
        match lookup.exists(&self.collection, &self.column, value).await {
            Ok(false) => Ok(None),
            Ok(true) => Err(RuleViolation::new(
                ErrorCode::AlreadyExists,
                format!("Already taken in '{}'", self.collection),
            )
            .with_param("collection", self.collection.clone())
            .with_param("column", self.column.clone())),
            Err(error) => Err(lookup_failed(&self.collection, &error)),
        }
    }
}

/// Creates a new [`UniqueRule`].
pub fn unique(
    collection: impl Into<Cow<'static, str>>,
    column: impl Into<Cow<'static, str>>,
) -> UniqueRule {
    UniqueRule::new(collection, column)
}

// ============================================================================
// TESTS
// ============================================================================
