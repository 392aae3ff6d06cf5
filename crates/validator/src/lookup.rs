//! External existence-lookup capability.
//!
//! `exists`/`unique` rules validate a value by asking an external store
//! whether a matching row exists. The store is injected per validation
//! call as a [`ExistenceLookup`] trait object — never an ambient
//! connection — so the engine stays testable with a fake.

use async_trait::async_trait;
use thiserror::Error;

// ============================================================================
// LOOKUP ERROR
// ============================================================================

/// Transport or storage failure raised by a lookup implementation.
///
/// Distinct from a negative answer: `Ok(false)` means "no matching row",
/// `Err(LookupError)` means the question could not be answered at all.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected or failed the query.
    #[error("query failed: {0}")]
    Query(String),
}

// ============================================================================
// LOOKUP CAPABILITY
// ============================================================================

/// Read-only existence lookup against an external store.
///
/// Implementations must be `Send + Sync`: the engine may issue lookups
/// for independent fields and array elements concurrently.
///
/// # Examples
///
/// ```rust,ignore
/// struct PgLookup { pool: PgPool }
///
/// #[async_trait]
/// impl ExistenceLookup for PgLookup {
///     async fn exists(&self, collection: &str, column: &str, value: &str)
///         -> Result<bool, LookupError>
///     {
///         // SELECT EXISTS(SELECT 1 FROM {collection} WHERE {column} = $1)
///     }
/// }
/// ```
#[async_trait]
pub trait ExistenceLookup: Send + Sync {
    /// Returns whether a row with `column == value` exists in `collection`.
    async fn exists(
        &self,
        collection: &str,
        column: &str,
        value: &str,
    ) -> Result<bool, LookupError>;
}

/// A lookup that refuses every query.
///
/// For validating schemas that attach no existence rules; any `exists` or
/// `unique` rule evaluated against it reports a lookup failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLookup;

#[async_trait]
impl ExistenceLookup for NullLookup {
    async fn exists(
        &self,
        _collection: &str,
        _column: &str,
        _value: &str,
    ) -> Result<bool, LookupError> {
        Err(LookupError::Unavailable(
            "no lookup capability configured".to_string(),
        ))
    }
}

// ============================================================================
// TESTS
// ============================================================================
