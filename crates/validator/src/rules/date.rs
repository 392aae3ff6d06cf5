//! Date rule — parses strings under a `yyyy-MM-dd HH:mm:ss`-style pattern.
//!
//! The format mini-language supports the tokens `yyyy`, `MM`, `dd`, `HH`,
//! `mm`, `ss` (zero-padded year/month/day/hour/minute/second); any other
//! character is a literal. Passing values normalize to the parsed
//! [`NaiveDateTime`]; date-only patterns normalize to midnight.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::foundation::{ErrorCode, Validated};
use crate::rules::{RuleOutcome, RuleViolation};

// ============================================================================
// FORMAT TRANSLATION
// ============================================================================

/// Which component classes a translated pattern contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FormatParts {
    has_date: bool,
    has_time: bool,
}

/// Translates the token mini-language into a strftime pattern.
///
/// Unrecognized letter runs and all punctuation pass through as literals;
/// a literal `%` is escaped so it cannot be misread as a strftime
/// directive.
fn translate(pattern: &str) -> (String, FormatParts) {
    let mut strftime = String::with_capacity(pattern.len());
    let mut parts = FormatParts {
        has_date: false,
        has_time: false,
    };

    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }

        let token = match (c, run) {
            ('y', 4) => Some(("%Y", true, false)),
            ('M', 2) => Some(("%m", true, false)),
            ('d', 2) => Some(("%d", true, false)),
            ('H', 2) => Some(("%H", false, true)),
            ('m', 2) => Some(("%M", false, true)),
            ('s', 2) => Some(("%S", false, true)),
            _ => None,
        };

        match token {
            Some((directive, date, time)) => {
                strftime.push_str(directive);
                parts.has_date |= date;
                parts.has_time |= time;
                i += run;
            }
            None => {
                for _ in 0..run {
                    if c == '%' {
                        strftime.push_str("%%");
                    } else {
                        strftime.push(c);
                    }
                }
                i += run;
            }
        }
    }

    (strftime, parts)
}

// ============================================================================
// DATE RULE
// ============================================================================

/// Validates that a string parses as a date under a textual pattern.
///
/// # Examples
///
/// ```rust,ignore
/// let rule = date("yyyy-MM-dd HH:mm:ss");
/// // "2024-01-15 08:30:00" passes and normalizes to the parsed date;
/// // "15/01/2024" fails with InvalidFormat.
/// ```
#[derive(Debug, Clone)]
pub struct DateRule {
    format: String,
    strftime: String,
    parts: FormatParts,
}

impl DateRule {
    /// Creates a date rule for the given format pattern.
    #[must_use]
    pub fn new(format: impl Into<String>) -> Self {
        let format = format.into();
        let (strftime, parts) = translate(&format);
        Self {
            format,
            strftime,
            parts,
        }
    }

    /// The format pattern as declared.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    fn parse(&self, input: &str) -> Option<NaiveDateTime> {
        match (self.parts.has_date, self.parts.has_time) {
            (true, true) => NaiveDateTime::parse_from_str(input, &self.strftime).ok(),
            (true, false) => NaiveDate::parse_from_str(input, &self.strftime)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
            (false, true) => NaiveTime::parse_from_str(input, &self.strftime)
                .ok()
                .and_then(|t| Some(NaiveDate::from_ymd_opt(1970, 1, 1)?.and_time(t))),
            // A pattern of pure literals can never describe a date.
            (false, false) => None,
        }
    }

    pub(crate) fn check(&self, input: &str) -> RuleOutcome {
        match self.parse(input) {
            Some(parsed) => Ok(Some(Validated::DateTime(parsed))),
            None => Err(RuleViolation::new(
                ErrorCode::InvalidFormat,
                format!("Must be a date in '{}' format", self.format),
            )
            .with_param("format", self.format.clone())),
        }
    }
}

/// Creates a new [`DateRule`] for the given format pattern.
#[must_use]
pub fn date(format: impl Into<String>) -> DateRule {
    DateRule::new(format)
}

// ============================================================================
// TESTS
// ============================================================================
