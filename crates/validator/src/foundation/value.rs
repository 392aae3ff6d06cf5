//! Normalized output values.
//!
//! On success the engine hands back a [`Validated`] tree rather than the
//! raw input: date strings are parsed, object fields keep declaration
//! order, undeclared input keys are dropped.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde_json::Number;

/// A normalized payload value produced by a successful validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated {
    /// Absent content (only ever appears for an optional root).
    Null,
    /// A string leaf, preserved as-is.
    String(String),
    /// A date leaf, parsed under the schema's declared format.
    DateTime(NaiveDateTime),
    /// A numeric leaf, preserved as-is.
    Number(Number),
    /// A boolean leaf, preserved as-is.
    Bool(bool),
    /// An array of validated members.
    Array(Vec<Validated>),
    /// Declared object fields, in declaration order.
    Object(IndexMap<String, Validated>),
}

impl Validated {
    /// Returns the string content, if this is a string leaf.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the parsed date, if this is a date leaf.
    #[must_use]
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Returns the number, if this is a numeric leaf.
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean leaf.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the members, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Validated]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the fields, if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&IndexMap<String, Validated>> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Looks up an object field by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Validated> {
        self.as_object().and_then(|fields| fields.get(key))
    }

    /// Looks up an array member by index.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Validated> {
        self.as_array().and_then(|items| items.get(index))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variants() {
        let value = Validated::String("hello".into());
        assert_eq!(value.as_str(), Some("hello"));
        assert_eq!(value.as_bool(), None);

        let value = Validated::Bool(true);
        assert_eq!(value.as_bool(), Some(true));
    }

    #[test]
    fn object_field_lookup() {
        let mut fields = IndexMap::new();
        fields.insert("status".to_string(), Validated::String("present".into()));
        let value = Validated::Object(fields);

        assert_eq!(value.get("status").and_then(Validated::as_str), Some("present"));
        assert_eq!(value.get("missing"), None);
    }

    #[test]
    fn array_index_lookup() {
        let value = Validated::Array(vec![
            Validated::String("a".into()),
            Validated::String("b".into()),
        ]);

        assert_eq!(value.at(1).and_then(Validated::as_str), Some("b"));
        assert_eq!(value.at(2), None);
    }
}
