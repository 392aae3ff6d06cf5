//! Custom failure messages.
//!
//! Callers supply a table of (pattern, template) pairs per schema
//! instance. A pattern is a dotted sequence of segments whose last
//! segment is a rule name; a `*` segment matches any single path segment
//! (typically an array index):
//!
//! ```rust,ignore
//! let messages = CustomMessages::new()
//!     .add("dailyAttendance.*.status.enum", "Status must be one of the known values")
//!     .add("dailyAttendance.*.date_in.date", "Check the date_in format");
//! ```
//!
//! Matching is exact-segment-or-wildcard, left-to-right, first match
//! wins. Templates may reference `{{ field }}` and `{{ rule }}`; with no
//! match, the rule's default message is used.

use crate::foundation::{FieldPath, Segment};

// ============================================================================
// PATTERNS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternSegment {
    Exact(String),
    Wildcard,
}

impl PatternSegment {
    fn parse(raw: &str) -> Self {
        if raw == "*" {
            Self::Wildcard
        } else {
            Self::Exact(raw.to_string())
        }
    }

    fn matches_path_segment(&self, segment: &Segment) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Exact(expected) => match segment {
                Segment::Key(key) => expected == key.as_ref(),
                Segment::Index(index) => {
                    expected.parse::<usize>().is_ok_and(|parsed| parsed == *index)
                }
            },
        }
    }

    fn matches_rule(&self, rule: &str) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Exact(expected) => expected == rule,
        }
    }
}

#[derive(Debug, Clone)]
struct MessagePattern {
    segments: Vec<PatternSegment>,
    template: String,
}

impl MessagePattern {
    fn parse(pattern: &str, template: String) -> Self {
        Self {
            segments: pattern.split('.').map(PatternSegment::parse).collect(),
            template,
        }
    }

    /// The last pattern segment addresses the rule; the rest address the
    /// field path.
    fn matches(&self, path: &FieldPath, rule: &str) -> bool {
        let Some((rule_segment, path_segments)) = self.segments.split_last() else {
            return false;
        };
        if path_segments.len() != path.len() {
            return false;
        }
        rule_segment.matches_rule(rule)
            && path_segments
                .iter()
                .zip(path.segments())
                .all(|(pattern, segment)| pattern.matches_path_segment(segment))
    }
}

// ============================================================================
// MESSAGE TABLE
// ============================================================================

/// A caller-supplied table of custom failure messages.
#[derive(Debug, Clone, Default)]
pub struct CustomMessages {
    patterns: Vec<MessagePattern>,
}

impl CustomMessages {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a (pattern, template) pair. Patterns are tried in insertion
    /// order; the first match wins.
    #[must_use = "builder methods must be chained or built"]
    pub fn add(mut self, pattern: impl AsRef<str>, template: impl Into<String>) -> Self {
        self.patterns
            .push(MessagePattern::parse(pattern.as_ref(), template.into()));
        self
    }

    /// Number of registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true when no patterns are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Resolves the message for a failing (path, rule) pair, falling back
    /// to `default` when no pattern matches.
    #[must_use]
    pub fn resolve(&self, path: &FieldPath, rule: &str, default: &str) -> String {
        for pattern in &self.patterns {
            if pattern.matches(path, rule) {
                return render(&pattern.template, path, rule);
            }
        }
        default.to_string()
    }
}

/// Substitutes `{{ field }}` and `{{ rule }}` placeholders.
fn render(template: &str, path: &FieldPath, rule: &str) -> String {
    template
        .replace("{{ field }}", &path.to_string())
        .replace("{{ rule }}", rule)
}

// ============================================================================
// TESTS
// ============================================================================
