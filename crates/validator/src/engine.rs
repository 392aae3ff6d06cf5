//! Validator engine.
//!
//! Walks a [`Schema`] against a raw payload depth-first, collecting every
//! failure (not just the first), and returns either the normalized value
//! tree or the full ordered error list.
//!
//! Lookups for independent fields and array elements run concurrently,
//! but their results merge back in declaration/index order, so the error
//! list is deterministic regardless of lookup completion order.
//! Cancellation follows future semantics: dropping the `validate` future
//! (e.g. under a caller-side timeout) abandons in-flight lookups.

use std::borrow::Cow;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use indexmap::IndexMap;
use serde_json::Value as Json;

use crate::foundation::{
    ErrorCode, FieldPath, Validated, ValidationError, ValidationErrors, ValidationResult,
};
use crate::lookup::ExistenceLookup;
use crate::messages::CustomMessages;
use crate::rules::{RuleOutcome, RuleSpec, RuleViolation};
use crate::schema::{ArrayNode, ObjectNode, ScalarKind, ScalarNode, Schema, SchemaNode};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// How the engine treats a lookup-capability failure (store unreachable,
/// query error) — distinct from a negative lookup answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupFailurePolicy {
    /// Report the failure as a field-level `LookupError` entry and keep
    /// walking, so callers get a uniform error-list response even under
    /// partial infrastructure failure (default).
    #[default]
    Report,
    /// Abort the walk and return immediately with that single error.
    FailFast,
}

/// Engine tuning knobs.
///
/// # Examples
///
/// ```rust,ignore
/// let config = EngineConfig::new()
///     .lookup_retries(2)
///     .lookup_failure(LookupFailurePolicy::FailFast);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineConfig {
    lookup_retries: u32,
    lookup_failure: LookupFailurePolicy,
}

impl EngineConfig {
    /// Creates the default configuration: no retries, report-as-field-error.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Retries a failed store call up to `retries` times before the
    /// failure policy applies.
    #[must_use = "builder methods must be chained or built"]
    pub fn lookup_retries(mut self, retries: u32) -> Self {
        self.lookup_retries = retries;
        self
    }

    /// Sets the lookup-failure policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn lookup_failure(mut self, policy: LookupFailurePolicy) -> Self {
        self.lookup_failure = policy;
        self
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// A reusable validator: one schema, its custom messages, and the engine
/// configuration.
///
/// Stateless across calls — share or clone freely.
///
/// # Examples
///
/// ```rust,ignore
/// let validator = Validator::new(schema).with_messages(messages);
/// match validator.validate(&payload, &lookup).await {
///     Ok(data) => { /* normalized tree */ }
///     Err(errors) => { /* every violation, in traversal order */ }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Schema,
    messages: CustomMessages,
    config: EngineConfig,
}

impl Validator {
    /// Creates a validator with no custom messages and default config.
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            messages: CustomMessages::new(),
            config: EngineConfig::default(),
        }
    }

    /// Attaches a custom message table.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_messages(mut self, messages: CustomMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Overrides the engine configuration.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The schema this validator applies.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validates one payload.
    ///
    /// Returns the normalized value tree when every check passes, or the
    /// full ordered list of violations. Validation never panics on
    /// payload content and never aborts early on an error — except under
    /// [`LookupFailurePolicy::FailFast`], where a store failure ends the
    /// walk with that single error.
    pub async fn validate(
        &self,
        payload: &Json,
        lookup: &dyn ExistenceLookup,
    ) -> ValidationResult {
        let walk = Walk {
            messages: &self.messages,
            config: self.config,
            lookup,
        };

        match walk.node(self.schema.root(), Some(payload), FieldPath::root()).await {
            Ok((value, errors)) => {
                if errors.is_empty() {
                    tracing::debug!("validation passed");
                    Ok(value.unwrap_or(Validated::Null))
                } else {
                    tracing::debug!(error_count = errors.len(), "validation failed");
                    Err(errors)
                }
            }
            Err(abort) => {
                tracing::debug!(error = %abort, "validation aborted on lookup failure");
                Err(ValidationErrors::from(abort))
            }
        }
    }
}

// ============================================================================
// WALK
// ============================================================================

/// `(normalized value, collected errors)` on a completed branch; `Err`
/// carries a fail-fast abort.
type WalkOutcome = Result<(Option<Validated>, ValidationErrors), ValidationError>;

/// Result of running one field's rule list.
enum Ruled {
    Pass(Option<Validated>),
    Fail(ValidationError),
}

/// One validation call's context: message table, config, and the lookup
/// capability. Created per call, never shared across calls.
struct Walk<'a> {
    messages: &'a CustomMessages,
    config: EngineConfig,
    lookup: &'a dyn ExistenceLookup,
}

impl Walk<'_> {
    /// Dispatches on the node kind. Boxed so the tree can recurse.
    fn node<'s>(
        &'s self,
        node: &'s SchemaNode,
        value: Option<&'s Json>,
        path: FieldPath,
    ) -> BoxFuture<'s, WalkOutcome> {
        async move {
            // `null` behaves as absent throughout.
            let value = value.filter(|v| !v.is_null());
            match node {
                SchemaNode::Scalar(scalar) => self.scalar(scalar, value, path).await,
                SchemaNode::Array(array) => self.array(array, value, path).await,
                SchemaNode::Object(object) => self.object(object, value, path).await,
            }
        }
        .boxed()
    }

    async fn scalar(
        &self,
        node: &ScalarNode,
        value: Option<&Json>,
        path: FieldPath,
    ) -> WalkOutcome {
        let mut errors = ValidationErrors::new();
        let Some(raw) = value else {
            if !node.is_optional() {
                errors.push(self.required_error(path));
            }
            return Ok((None, errors));
        };

        let output = match (node.kind(), raw) {
            (ScalarKind::String, Json::String(text)) => {
                match self.apply_rules(node.rules(), text, &path).await? {
                    Ruled::Pass(normalized) => {
                        Some(normalized.unwrap_or_else(|| Validated::String(text.clone())))
                    }
                    Ruled::Fail(error) => {
                        errors.push(error);
                        None
                    }
                }
            }
            (ScalarKind::Number, Json::Number(number)) => Some(Validated::Number(number.clone())),
            (ScalarKind::Boolean, Json::Bool(flag)) => Some(Validated::Bool(*flag)),
            (kind, other) => {
                errors.push(self.type_error(
                    path,
                    kind.rule_name(),
                    kind.expects(),
                    json_kind(other),
                ));
                None
            }
        };
        Ok((output, errors))
    }

    async fn array(&self, node: &ArrayNode, value: Option<&Json>, path: FieldPath) -> WalkOutcome {
        let mut errors = ValidationErrors::new();
        let Some(raw) = value else {
            if !node.is_optional() {
                errors.push(self.required_error(path));
            }
            return Ok((None, errors));
        };
        let Json::Array(items) = raw else {
            errors.push(self.type_error(path, "array", "an array", json_kind(raw)));
            return Ok((None, errors));
        };

        // Every element is validated, even when earlier ones fail.
        let futures: Vec<_> = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.node(node.member(), Some(item), path.child(index)))
            .collect();

        let mut output = Vec::with_capacity(items.len());
        for result in join_all(futures).await {
            let (value, element_errors) = result?;
            errors.extend(element_errors);
            if let Some(value) = value {
                output.push(value);
            }
        }
        Ok((Some(Validated::Array(output)), errors))
    }

    async fn object(
        &self,
        node: &ObjectNode,
        value: Option<&Json>,
        path: FieldPath,
    ) -> WalkOutcome {
        let mut errors = ValidationErrors::new();
        let Some(raw) = value else {
            if !node.is_optional() {
                errors.push(self.required_error(path));
            }
            return Ok((None, errors));
        };
        let Json::Object(map) = raw else {
            errors.push(self.type_error(path, "object", "an object", json_kind(raw)));
            return Ok((None, errors));
        };

        // Declared fields only; undeclared input keys are ignored.
        let mut names = Vec::with_capacity(node.fields().len());
        let mut futures = Vec::with_capacity(node.fields().len());
        for (name, child) in node.fields() {
            names.push(name);
            futures.push(self.node(child, map.get(name.as_ref()), path.child(name.clone())));
        }

        let mut output = IndexMap::with_capacity(names.len());
        for (name, result) in names.into_iter().zip(join_all(futures).await) {
            let (value, field_errors) = result?;
            errors.extend(field_errors);
            if let Some(value) = value {
                output.insert(name.to_string(), value);
            }
        }
        Ok((Some(Validated::Object(output)), errors))
    }

    /// Runs a field's rules in declared order, stopping at the first
    /// failure for this field; sibling fields are unaffected.
    async fn apply_rules(
        &self,
        rules: &[RuleSpec],
        value: &str,
        path: &FieldPath,
    ) -> Result<Ruled, ValidationError> {
        let mut normalized = None;
        for rule in rules {
            match self.apply_rule(rule, value, path).await {
                Ok(output) => {
                    if output.is_some() {
                        normalized = output;
                    }
                }
                Err(violation) => {
                    let code = violation.code;
                    let error = self.field_error(path, rule.name(), violation);
                    if code == ErrorCode::LookupError
                        && self.config.lookup_failure == LookupFailurePolicy::FailFast
                    {
                        return Err(error);
                    }
                    return Ok(Ruled::Fail(error));
                }
            }
        }
        Ok(Ruled::Pass(normalized))
    }

    /// Evaluates one rule, retrying store failures per the configuration.
    async fn apply_rule(&self, rule: &RuleSpec, value: &str, path: &FieldPath) -> RuleOutcome {
        let mut attempt = 0;
        loop {
            let outcome = rule.evaluate(value, self.lookup).await;
            match &outcome {
                Err(violation)
                    if violation.code == ErrorCode::LookupError
                        && attempt < self.config.lookup_retries =>
                {
                    attempt += 1;
                    tracing::warn!(
                        rule = rule.name(),
                        field = %path,
                        attempt,
                        "lookup failed, retrying"
                    );
                }
                _ => return outcome,
            }
        }
    }

    fn field_error(
        &self,
        path: &FieldPath,
        rule: &'static str,
        violation: RuleViolation,
    ) -> ValidationError {
        let message = self.messages.resolve(path, rule, &violation.message);
        ValidationError {
            path: path.clone(),
            rule: Cow::Borrowed(rule),
            code: violation.code,
            message: Cow::Owned(message),
            params: violation.params,
        }
    }

    fn required_error(&self, path: FieldPath) -> ValidationError {
        let message = self.messages.resolve(&path, "required", "This field is required");
        ValidationError::new(ErrorCode::Required, "required", message).with_path(path)
    }

    fn type_error(
        &self,
        path: FieldPath,
        rule: &'static str,
        expected: &'static str,
        actual: &'static str,
    ) -> ValidationError {
        let default = format!("Expected {expected}, got {actual}");
        let message = self.messages.resolve(&path, rule, &default);
        ValidationError::new(ErrorCode::InvalidType, rule, message)
            .with_path(path)
            .with_param("expected", expected)
            .with_param("actual", actual)
    }
}

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::lookup::LookupError;
    use crate::rules::{alpha_numeric, exists, min_length};
    use crate::schema::{array, date, number, object, one_of, string};

    /// Store fake that knows a fixed set of ids, for any collection.
    struct KnownIds(&'static [&'static str]);

    #[async_trait]
    impl ExistenceLookup for KnownIds {
        async fn exists(
            &self,
            _collection: &str,
            _column: &str,
            value: &str,
        ) -> Result<bool, LookupError> {
            Ok(self.0.contains(&value))
        }
    }

    /// Store fake that fails a given number of calls before recovering.
    struct FlakyStore {
        failures_left: AtomicU32,
    }

    impl FlakyStore {
        fn failing(times: u32) -> Self {
            Self {
                failures_left: AtomicU32::new(times),
            }
        }
    }

    #[async_trait]
    impl ExistenceLookup for FlakyStore {
        async fn exists(
            &self,
            _collection: &str,
            _column: &str,
            _value: &str,
        ) -> Result<bool, LookupError> {
            if self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                Err(LookupError::Unavailable("connection refused".to_string()))
            } else {
                Ok(true)
            }
        }
    }

    fn no_lookup() -> crate::lookup::NullLookup {
        crate::lookup::NullLookup
    }

    #[tokio::test]
    async fn conforming_payload_normalizes() {
        let validator = Validator::new(Schema::new(
            object()
                .field("name", string())
                .field("joined", date("yyyy-MM-dd"))
                .field("age", number())
                .field("active", crate::schema::boolean()),
        ));
        let payload = json!({
            "name": "alice",
            "joined": "2024-01-15",
            "age": 30,
            "active": true,
        });

        let data = validator.validate(&payload, &no_lookup()).await.unwrap();
        assert_eq!(data.get("name").and_then(Validated::as_str), Some("alice"));
        assert!(data.get("joined").and_then(Validated::as_datetime).is_some());
        assert_eq!(data.get("active").and_then(Validated::as_bool), Some(true));
    }

    #[tokio::test]
    async fn missing_required_field_reports_siblings_too() {
        let validator = Validator::new(Schema::new(
            object()
                .field("name", string())
                .field("status", one_of(["on", "off"])),
        ));
        let payload = json!({ "status": "broken" });

        let errors = validator.validate(&payload, &no_lookup()).await.unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.errors()[0].code, ErrorCode::Required);
        assert_eq!(errors.errors()[0].path.to_string(), "name");
        assert_eq!(errors.errors()[1].code, ErrorCode::NotInEnum);
        assert_eq!(errors.errors()[1].path.to_string(), "status");
    }

    #[tokio::test]
    async fn array_validates_every_element() {
        let validator = Validator::new(Schema::new(array(one_of(["a", "b"]))));
        let payload = json!(["x", "a", "y"]);

        let errors = validator.validate(&payload, &no_lookup()).await.unwrap_err();
        let paths: Vec<_> = errors.errors().iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["0", "2"]);
    }

    #[tokio::test]
    async fn non_array_input_fails_at_array_path() {
        let validator = Validator::new(Schema::new(object().field("items", array(string()))));
        let payload = json!({ "items": "not an array" });

        let errors = validator.validate(&payload, &no_lookup()).await.unwrap_err();
        assert_eq!(errors.len(), 1);
        let error = errors.first().unwrap();
        assert_eq!(error.code, ErrorCode::InvalidType);
        assert_eq!(error.rule, "array");
        assert_eq!(error.path.to_string(), "items");
    }

    #[tokio::test]
    async fn unknown_keys_are_ignored_and_dropped() {
        let validator = Validator::new(Schema::new(object().field("name", string())));
        let payload = json!({ "name": "alice", "extra": 42 });

        let data = validator.validate(&payload, &no_lookup()).await.unwrap();
        let fields = data.as_object().unwrap();
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("name"));
    }

    #[tokio::test]
    async fn optional_absent_field_is_skipped_and_omitted() {
        let validator = Validator::new(Schema::new(
            object()
                .field("name", string())
                .field("note", string().optional()),
        ));
        let payload = json!({ "name": "alice" });

        let data = validator.validate(&payload, &no_lookup()).await.unwrap();
        assert_eq!(data.get("note"), None);
    }

    #[tokio::test]
    async fn null_counts_as_absent() {
        let validator = Validator::new(Schema::new(
            object()
                .field("required", string())
                .field("optional", string().optional()),
        ));
        let payload = json!({ "required": null, "optional": null });

        let errors = validator.validate(&payload, &no_lookup()).await.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].path.to_string(), "required");
        assert_eq!(errors.errors()[0].code, ErrorCode::Required);
    }

    #[tokio::test]
    async fn first_failing_rule_wins_per_field() {
        let validator = Validator::new(Schema::new(object().field(
            "code",
            string().rule(min_length(5)).rule(alpha_numeric()),
        )));
        // Violates both rules; only the first reports.
        let payload = json!({ "code": "a_b" });

        let errors = validator.validate(&payload, &no_lookup()).await.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].rule, "minLength");
    }

    #[tokio::test]
    async fn exists_rule_goes_through_lookup() {
        let validator = Validator::new(Schema::new(
            object().field("classId", string().rule(exists("classes", "id"))),
        ));

        let ok = validator
            .validate(&json!({ "classId": "abc" }), &KnownIds(&["abc"]))
            .await;
        assert!(ok.is_ok());

        let errors = validator
            .validate(&json!({ "classId": "xyz" }), &KnownIds(&["abc"]))
            .await
            .unwrap_err();
        assert_eq!(errors.errors()[0].code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn lookup_failure_reports_as_field_error_by_default() {
        let validator = Validator::new(Schema::new(
            object()
                .field("classId", string().rule(exists("classes", "id")))
                .field("status", one_of(["on", "off"])),
        ));
        let payload = json!({ "classId": "abc", "status": "broken" });

        let errors = validator.validate(&payload, &no_lookup()).await.unwrap_err();
        // The walk continued past the lookup failure.
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.errors()[0].code, ErrorCode::LookupError);
        assert_eq!(errors.errors()[1].code, ErrorCode::NotInEnum);
    }

    #[tokio::test]
    async fn fail_fast_policy_aborts_on_lookup_failure() {
        let validator = Validator::new(Schema::new(
            object()
                .field("classId", string().rule(exists("classes", "id")))
                .field("status", one_of(["on", "off"])),
        ))
        .with_config(EngineConfig::new().lookup_failure(LookupFailurePolicy::FailFast));
        let payload = json!({ "classId": "abc", "status": "broken" });

        let errors = validator.validate(&payload, &no_lookup()).await.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].code, ErrorCode::LookupError);
    }

    #[tokio::test]
    async fn transient_lookup_failure_recovers_with_retries() {
        let validator = Validator::new(Schema::new(
            object().field("classId", string().rule(exists("classes", "id"))),
        ))
        .with_config(EngineConfig::new().lookup_retries(1));

        let store = FlakyStore::failing(1);
        let result = validator.validate(&json!({ "classId": "abc" }), &store).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn exhausted_retries_report_lookup_error() {
        let validator = Validator::new(Schema::new(
            object().field("classId", string().rule(exists("classes", "id"))),
        ))
        .with_config(EngineConfig::new().lookup_retries(1));

        let store = FlakyStore::failing(5);
        let errors = validator
            .validate(&json!({ "classId": "abc" }), &store)
            .await
            .unwrap_err();
        assert_eq!(errors.errors()[0].code, ErrorCode::LookupError);
    }

    #[tokio::test]
    async fn concurrent_element_errors_stay_in_index_order() {
        let validator = Validator::new(Schema::new(array(
            string().rule(exists("classes", "id")),
        )));
        let payload = json!(["bad1", "abc", "bad2", "bad3"]);

        let errors = validator
            .validate(&payload, &KnownIds(&["abc"]))
            .await
            .unwrap_err();
        let paths: Vec<_> = errors.errors().iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["0", "2", "3"]);
    }

    #[tokio::test]
    async fn custom_message_resolves_through_engine() {
        let validator = Validator::new(Schema::new(object().field(
            "dailyAttendance",
            array(object().field("status", one_of(["present", "absent"]))),
        )))
        .with_messages(
            CustomMessages::new().add("dailyAttendance.*.status.enum", "Unknown status"),
        );
        let payload = json!({ "dailyAttendance": [{ "status": "late" }] });

        let errors = validator.validate(&payload, &no_lookup()).await.unwrap_err();
        assert_eq!(errors.errors()[0].message, "Unknown status");
    }

    #[tokio::test]
    async fn unmatched_failure_uses_default_message() {
        let validator = Validator::new(Schema::new(
            object().field("status", one_of(["on", "off"])),
        ))
        .with_messages(CustomMessages::new().add("other.field.enum", "irrelevant"));
        let payload = json!({ "status": "broken" });

        let errors = validator.validate(&payload, &no_lookup()).await.unwrap_err();
        assert_eq!(errors.errors()[0].message, "Must be one of: on, off");
    }

    #[tokio::test]
    async fn root_type_mismatch() {
        let validator = Validator::new(Schema::new(object().field("a", string())));
        let errors = validator.validate(&json!([1, 2]), &no_lookup()).await.unwrap_err();

        assert_eq!(errors.len(), 1);
        let error = errors.first().unwrap();
        assert_eq!(error.code, ErrorCode::InvalidType);
        assert!(error.path.is_root());
    }
}
