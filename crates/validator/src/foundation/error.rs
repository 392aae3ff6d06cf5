//! Error types for validation failures.
//!
//! Every failure is a value, never a panic: the engine reports problems
//! with untrusted input as [`ValidationError`] entries collected into a
//! [`ValidationErrors`] list, and the caller decides what to do with them.
//!
//! String fields use `Cow<'static, str>` for zero-allocation in the
//! common case of static rule names and default messages.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

use crate::foundation::path::FieldPath;

/// Parameters attached to an error, as ordered key-value pairs.
///
/// Typically 0-2 entries (e.g. `[("format", "yyyy-MM-dd HH:mm:ss")]`),
/// so they live inline without a heap allocation.
pub type Params = SmallVec<[(Cow<'static, str>, Cow<'static, str>); 2]>;

// ============================================================================
// ERROR CODE
// ============================================================================

/// Reason taxonomy for validation failures.
///
/// Codes are stable identifiers for programmatic handling; the
/// human-readable side lives in [`ValidationError::message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A required field was absent (or `null`).
    Required,
    /// The value's JSON kind did not match the declared node.
    InvalidType,
    /// The value did not match the expected textual format.
    InvalidFormat,
    /// The value was not a member of the allowed set.
    NotInEnum,
    /// The value contained characters outside the allowed classes.
    InvalidCharacters,
    /// No matching row was found by an existence lookup.
    NotFound,
    /// The existence lookup itself failed (store unreachable, query error).
    LookupError,
    /// A uniqueness rule found a conflicting row.
    AlreadyExists,
    /// The value was shorter than the declared minimum length.
    TooShort,
    /// The value was longer than the declared maximum length.
    TooLong,
}

impl ErrorCode {
    /// Stable snake_case identifier for this code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidType => "invalid_type",
            Self::InvalidFormat => "invalid_format",
            Self::NotInEnum => "not_in_enum",
            Self::InvalidCharacters => "invalid_characters",
            Self::NotFound => "not_found",
            Self::LookupError => "lookup_error",
            Self::AlreadyExists => "already_exists",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single validation failure, addressed to one field.
///
/// # Examples
///
/// ```rust,ignore
/// let error = ValidationError::new(ErrorCode::NotInEnum, "enum", "Must be one of: present, absent")
///     .with_path(FieldPath::root().child("status"))
///     .with_param("choices", "present, absent");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    /// Where in the payload the failure occurred.
    pub path: FieldPath,

    /// Rule name as used by custom-message patterns, e.g. `enum`, `date`,
    /// `required`, or a type name (`array`, `string`) for shape failures.
    pub rule: Cow<'static, str>,

    /// Machine-readable reason.
    pub code: ErrorCode,

    /// Human-readable message — a custom message if one matched, else the
    /// rule's default.
    pub message: Cow<'static, str>,

    /// Options relevant to the failure, for callers that template their
    /// own messages.
    pub params: Params,
}

impl ValidationError {
    /// Creates an error at the root path.
    pub fn new(
        code: ErrorCode,
        rule: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            path: FieldPath::root(),
            rule: rule.into(),
            code,
            message: message.into(),
            params: Params::new(),
        }
    }

    /// Sets the field path.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_path(mut self, path: FieldPath) -> Self {
        self.path = path;
        self
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

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}: {}", self.rule, self.message)
        } else {
            write!(f, "[{}] {}: {}", self.path, self.rule, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// The ordered, append-only list of failures from one validation call.
///
/// Order is traversal order: callers can rely on it being deterministic
/// for a given schema and payload.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates a new empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one error.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Appends every error from `other`, preserving order.
    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// All errors, in traversal order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// First error, if any.
    #[must_use]
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Consumes the collection into a plain vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Converts to a `Result`: `Ok(ok_value)` when empty, else `Err(self)`.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(ok_value) } else { Err(self) }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// TESTS
// ============================================================================
