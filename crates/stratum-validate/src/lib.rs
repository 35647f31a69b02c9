// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fail-fast field validation producing layered taxonomy errors.
//!
//! Declare each [`Field`] with an ordered list of [`Rule`]s and hand the
//! fields to [`validate`].  Evaluation walks fields left to right and rules
//! left to right, stopping at the first failure; that failure is the result.
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod rules;

pub use rules::{Predicate, Rule};

use serde_json::Value;
use stratum_error::LayerError;
use tracing::debug;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Misuse detected while building a rule.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// The regular expression given to [`Rule::pattern`] does not compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// Pattern as supplied.
        pattern: String,
        /// Compiler diagnostic.
        #[source]
        source: regex::Error,
    },
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A named value together with the rules it must satisfy.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    value: Value,
    rules: Vec<Rule>,
}

impl Field {
    /// Bundle a field name, its value, and its rules.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<Value>,
        rules: impl IntoIterator<Item = Rule>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            rules: rules.into_iter().collect(),
        }
    }

    /// Field with no rules yet; add them with [`Field::rule`].
    pub fn named(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(name, value, Vec::new())
    }

    /// Append a rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value under validation.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First failing rule's error, if any.
    pub fn check(&self) -> Option<LayerError> {
        self.rules.iter().find_map(|rule| {
            let err = rule.check(&self.name, &self.value)?;
            debug!(
                target: "stratum.validate",
                field = %self.name,
                rule = rule.name(),
                code = %err.code(),
                "field failed validation"
            );
            Some(err)
        })
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Validate `fields` in order and return the first error.
///
/// Returns `None` when every rule on every field passes.  No rule after the
/// first failure is evaluated.
pub fn validate(fields: &[Field]) -> Option<LayerError> {
    fields.iter().find_map(Field::check)
}

/// [`validate`] in `Result` form, for `?` propagation.
pub fn ensure_valid(fields: &[Field]) -> Result<(), LayerError> {
    match validate(fields) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use stratum_error::codes;

    fn counting_rule(counter: &Arc<AtomicUsize>, pass: bool) -> Rule {
        let counter = Arc::clone(counter);
        Rule::custom(
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                pass
            },
            "counted",
        )
    }

    #[test]
    fn empty_input_is_valid() {
        assert!(validate(&[]).is_none());
        assert!(validate(&[Field::named("x", 1)]).is_none());
    }

    #[test]
    fn required_on_empty_string_fails() {
        let err = validate(&[Field::new("name", "", [Rule::required()])]).unwrap();
        assert_eq!(err.code(), &codes::MISSING_REQUIRED);
        assert!(validate(&[Field::new("name", "John", [Rule::required()])]).is_none());
    }

    #[test]
    fn invalid_email_scenario() {
        let err = validate(&[Field::new("email", "invalid-email", [Rule::email()])]).unwrap();
        assert_eq!(err.code(), &codes::INVALID_EMAIL);
    }

    #[test]
    fn custom_age_scenario() {
        let adult = || Rule::custom(|v| v.as_i64().is_some_and(|age| age >= 18), "must be 18");
        let err = validate(&[Field::new("age", 15, [adult()])]).unwrap();
        assert_eq!(err.code(), &codes::INVALID_FORMAT);
        assert_eq!(err.message(), "must be 18");
        assert!(validate(&[Field::new("age", 20, [adult()])]).is_none());
    }

    #[test]
    fn first_field_wins() {
        let err = validate(&[
            Field::new("email", "invalid", [Rule::required(), Rule::email()]),
            Field::new("password", "123", [Rule::required(), Rule::min_length(8)]),
        ])
        .unwrap();
        assert_eq!(err.code(), &codes::INVALID_EMAIL);
        assert_eq!(err.details()["field"].as_str(), Some("email"));
    }

    #[test]
    fn first_rule_within_field_wins() {
        let err = validate(&[Field::new(
            "password",
            "",
            [Rule::min_length(8), Rule::required()],
        )])
        .unwrap();
        assert_eq!(err.code(), &codes::INVALID_FORMAT);
    }

    #[test]
    fn evaluation_stops_after_first_failure() {
        let before = Arc::new(AtomicUsize::new(0));
        let after = Arc::new(AtomicUsize::new(0));
        let fields = [
            Field::new("a", 1, [counting_rule(&before, true)]),
            Field::new(
                "b",
                2,
                [counting_rule(&before, false), counting_rule(&after, true)],
            ),
            Field::new("c", 3, [counting_rule(&after, true)]),
        ];
        assert!(validate(&fields).is_some());
        assert_eq!(before.load(Ordering::SeqCst), 2);
        assert_eq!(after.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn validate_is_repeatable() {
        let fields = [
            Field::new("name", "Ann", [Rule::required()]),
            Field::new("phone", "555", [Rule::pattern(r"^\d{3}-\d{4}$").unwrap()]),
        ];
        let first = validate(&fields);
        let second = validate(&fields);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn builder_appends_rules_in_order() {
        let field = Field::named("username", "verylongusername")
            .rule(Rule::required())
            .rule(Rule::max_length(10));
        assert_eq!(field.rules().len(), 2);
        assert_eq!(field.name(), "username");
        assert_eq!(field.value(), &json!("verylongusername"));
        let err = field.check().unwrap();
        assert_eq!(err.details()["max"].as_i64(), Some(10));
    }

    #[test]
    fn ensure_valid_propagates_with_question_mark() {
        fn register(email: &str) -> Result<&'static str, LayerError> {
            ensure_valid(&[Field::new("email", email, [Rule::required(), Rule::email()])])?;
            Ok("registered")
        }
        assert_eq!(register("a@example.com").unwrap(), "registered");
        assert_eq!(register("  ").unwrap_err().code(), &codes::MISSING_REQUIRED);
    }

    #[test]
    fn null_and_collection_values() {
        let err = validate(&[Field::new("tags", Value::Null, [Rule::required()])]).unwrap();
        assert_eq!(err.code(), &codes::MISSING_REQUIRED);
        let err = validate(&[Field::new("tags", vec!["a", "b", "c"], [Rule::max_length(2)])])
            .unwrap();
        assert_eq!(err.code(), &codes::INVALID_FORMAT);
    }
}
