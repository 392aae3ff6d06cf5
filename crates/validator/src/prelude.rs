//! Prelude module for convenient imports.
//!
//! Provides a single `use skema_validator::prelude::*;` import that
//! brings in the schema builders, rule constructors, engine types, and
//! error types.
//!
//! # Examples
//!
//! ```rust,ignore
//! use skema_validator::prelude::*;
//!
//! let schema = Schema::new(object().field("name", string().rule(min_length(1))));
//! let validator = Validator::new(schema);
//! ```

// ============================================================================
// FOUNDATION: Paths, errors, normalized values
// ============================================================================

pub use crate::foundation::{
    ErrorCode, FieldPath, Segment, Validated, ValidationError, ValidationErrors, ValidationResult,
};

// ============================================================================
// SCHEMA: Shape tree and builders
// ============================================================================

pub use crate::schema::{
    ArrayNode, ObjectNode, ScalarKind, ScalarNode, Schema, SchemaNode, array, boolean, date,
    number, object, one_of, string,
};

// ============================================================================
// RULES: Constructors for attachable rules
// ============================================================================

pub use crate::rules::{
    RuleSpec, alpha, alpha_numeric, email, exists, matches, max_length, min_length, unique,
};

// ============================================================================
// ENGINE AND COLLABORATORS
// ============================================================================

pub use crate::engine::{EngineConfig, LookupFailurePolicy, Validator};
pub use crate::lookup::{ExistenceLookup, LookupError, NullLookup};
pub use crate::messages::CustomMessages;
