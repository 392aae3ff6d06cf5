//! Schema declaration — the immutable shape tree and its builder surface.
//!
//! A [`Schema`] is a tree of [`SchemaNode`]s: scalar leaves carrying
//! rules, arrays of one member shape, and objects of named fields.
//! Nodes are built with factory functions plus fluent methods and are
//! immutable once the tree is assembled; one schema can drive any number
//! of validation calls.
//!
//! # Examples
//!
//! ```rust,ignore
//! use skema_validator::prelude::*;
//!
//! let schema = Schema::new(object().field(
//!     "dailyAttendance",
//!     array(
//!         object()
//!             .field("date_in", date("yyyy-MM-dd HH:mm:ss"))
//!             .field("date_out", date("yyyy-MM-dd HH:mm:ss").optional())
//!             .field("status", one_of(["present", "absent", "permission", "sick"]))
//!             .field("description", string().optional().rule(alpha_numeric().allow(' ')))
//!             .field("classId", string().rule(exists("academic.classes", "id")))
//!             .field("studentId", string().rule(exists("academic.students", "id"))),
//!     ),
//! ));
//! ```

use std::borrow::Cow;

use indexmap::IndexMap;

use crate::rules::{self, RuleSpec};

// ============================================================================
// SCALAR KIND
// ============================================================================

/// JSON kinds a scalar leaf can require.
///
/// Rules attach to string scalars (every built-in rule checks text);
/// number and boolean leaves are shape-checked and passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// A JSON string.
    String,
    /// A JSON number.
    Number,
    /// A JSON boolean.
    Boolean,
}

impl ScalarKind {
    /// Rule name used for type failures at leaves of this kind.
    #[must_use]
    pub fn rule_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Human description for default type-failure messages.
    #[must_use]
    pub fn expects(self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Number => "a number",
            Self::Boolean => "a boolean",
        }
    }
}

// ============================================================================
// NODES
// ============================================================================

/// A scalar leaf: a required-by-default value of one JSON kind, checked
/// by its attached rules in declaration order.
#[derive(Debug, Clone)]
pub struct ScalarNode {
    kind: ScalarKind,
    optional: bool,
    rules: Vec<RuleSpec>,
}

impl ScalarNode {
    fn new(kind: ScalarKind) -> Self {
        Self {
            kind,
            optional: false,
            rules: Vec::new(),
        }
    }

    /// Marks the leaf optional: absent (or `null`) input is skipped
    /// instead of reported as `Required`.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Attaches a rule; rules run in the order they were attached.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(mut self, rule: impl Into<RuleSpec>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// The required JSON kind.
    #[must_use]
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Whether absent input is tolerated.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Attached rules, in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }
}

/// An array node: every element validates against one member shape.
#[derive(Debug, Clone)]
pub struct ArrayNode {
    member: Box<SchemaNode>,
    optional: bool,
}

impl ArrayNode {
    /// Creates an array of the given member shape.
    pub fn new(member: impl Into<SchemaNode>) -> Self {
        Self {
            member: Box::new(member.into()),
            optional: false,
        }
    }

    /// Marks the array optional.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// The member shape.
    #[must_use]
    pub fn member(&self) -> &SchemaNode {
        &self.member
    }

    /// Whether absent input is tolerated.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// An object node: declared fields validate by name, in declaration
/// order; undeclared input keys are ignored.
#[derive(Debug, Clone, Default)]
pub struct ObjectNode {
    fields: IndexMap<Cow<'static, str>, SchemaNode>,
    optional: bool,
}

impl ObjectNode {
    /// Creates an object with no fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field. Declaring the same name twice replaces the
    /// earlier shape.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<Cow<'static, str>>, node: impl Into<SchemaNode>) -> Self {
        self.fields.insert(name.into(), node.into());
        self
    }

    /// Marks the object optional.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Declared fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &IndexMap<Cow<'static, str>, SchemaNode> {
        &self.fields
    }

    /// Whether absent input is tolerated.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// One node of a schema tree.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    /// A scalar leaf.
    Scalar(ScalarNode),
    /// An array of one member shape.
    Array(ArrayNode),
    /// An object of named fields.
    Object(ObjectNode),
}

impl SchemaNode {
    /// Whether absent input is tolerated at this node.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        match self {
            Self::Scalar(node) => node.is_optional(),
            Self::Array(node) => node.is_optional(),
            Self::Object(node) => node.is_optional(),
        }
    }
}

impl From<ScalarNode> for SchemaNode {
    fn from(node: ScalarNode) -> Self {
        Self::Scalar(node)
    }
}

impl From<ArrayNode> for SchemaNode {
    fn from(node: ArrayNode) -> Self {
        Self::Array(node)
    }
}

impl From<ObjectNode> for SchemaNode {
    fn from(node: ObjectNode) -> Self {
        Self::Object(node)
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// The full expected shape of a payload.
///
/// Typically rooted at an object or array. Stateless and read-only
/// during validation, so one instance can be shared across calls.
#[derive(Debug, Clone)]
pub struct Schema {
    root: SchemaNode,
}

impl Schema {
    /// Creates a schema from its root node.
    pub fn new(root: impl Into<SchemaNode>) -> Self {
        Self { root: root.into() }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }
}

// ============================================================================
// FACTORY FUNCTIONS
// ============================================================================

/// A required string leaf.
#[must_use]
pub fn string() -> ScalarNode {
    ScalarNode::new(ScalarKind::String)
}

/// A required number leaf.
#[must_use]
pub fn number() -> ScalarNode {
    ScalarNode::new(ScalarKind::Number)
}

/// A required boolean leaf.
#[must_use]
pub fn boolean() -> ScalarNode {
    ScalarNode::new(ScalarKind::Boolean)
}

/// A required date leaf: a string leaf with a `date` rule attached.
#[must_use]
pub fn date(format: impl Into<String>) -> ScalarNode {
    string().rule(rules::date(format))
}

/// A required enum leaf: a string leaf with an `enum` rule attached.
pub fn one_of<I, S>(allowed: I) -> ScalarNode
where
    I: IntoIterator<Item = S>,
    S: Into<Cow<'static, str>>,
{
    string().rule(rules::one_of(allowed))
}

/// An array of the given member shape.
pub fn array(member: impl Into<SchemaNode>) -> ArrayNode {
    ArrayNode::new(member)
}

/// An object with no fields yet.
#[must_use]
pub fn object() -> ObjectNode {
    ObjectNode::new()
}

// ============================================================================
// TESTS
// ============================================================================
