//! Core validation types.
//!
//! This module contains the fundamental building blocks of the validation
//! system:
//!
//! - **Paths**: [`FieldPath`], [`Segment`] — where in a payload a value lives
//! - **Errors**: [`ErrorCode`], [`ValidationError`], [`ValidationErrors`]
//! - **Output**: [`Validated`] — the normalized value tree
//!
//! Everything here is a plain immutable value: errors and paths are data
//! the caller can serialize, match on, or render, never control flow that
//! unwinds.

pub mod error;
pub mod path;
pub mod value;

pub use error::{ErrorCode, Params, ValidationError, ValidationErrors};
pub use path::{FieldPath, Segment};
pub use value::Validated;

/// The outcome of one validation call: the normalized payload, or every
/// violation found in one pass.
pub type ValidationResult = Result<Validated, ValidationErrors>;
