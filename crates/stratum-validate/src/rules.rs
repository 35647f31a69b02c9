// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in validation rules.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::Value;
use stratum_error::{DetailValue, Details, LayerError, codes, validation_error};

use crate::RuleError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex literal")
});

/// Predicate used by [`Rule::Custom`].
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A single check applied to a field value.
///
/// Every variant carries its parameters and an optional message that
/// replaces the default one.  All failures are validation-type errors.
#[derive(Clone)]
pub enum Rule {
    /// Fails with `MISSING_REQUIRED` on null, blank strings, and empty
    /// arrays or objects.  `0` and `false` are present values.
    Required {
        /// Message override.
        message: Option<String>,
    },
    /// Fails with `INVALID_EMAIL` unless the value is a well-formed address.
    Email {
        /// Message override.
        message: Option<String>,
    },
    /// Fails with `INVALID_FORMAT` when a string or array is shorter than
    /// `min`.  Other values pass.
    MinLength {
        /// Inclusive lower bound.
        min: usize,
        /// Message override.
        message: Option<String>,
    },
    /// Fails with `INVALID_FORMAT` when a string or array is longer than
    /// `max`.  Other values pass.
    MaxLength {
        /// Inclusive upper bound.
        max: usize,
        /// Message override.
        message: Option<String>,
    },
    /// Fails with `INVALID_FORMAT` unless the value is a string matching
    /// `regex`.
    Pattern {
        /// Compiled pattern.
        regex: Regex,
        /// Message override.
        message: Option<String>,
    },
    /// Fails with `INVALID_FORMAT` and `message` when `predicate` is false.
    Custom {
        /// Acceptance test.
        predicate: Predicate,
        /// Failure message.
        message: String,
    },
}

impl Rule {
    /// [`Rule::Required`] with the default message.
    pub fn required() -> Self {
        Self::Required { message: None }
    }

    /// [`Rule::Email`] with the default message.
    pub fn email() -> Self {
        Self::Email { message: None }
    }

    /// [`Rule::MinLength`] with the default message.
    pub fn min_length(min: usize) -> Self {
        Self::MinLength { min, message: None }
    }

    /// [`Rule::MaxLength`] with the default message.
    pub fn max_length(max: usize) -> Self {
        Self::MaxLength { max, message: None }
    }

    /// Compile `pattern` into a [`Rule::Pattern`].
    ///
    /// A malformed pattern is reported here, never during validation.
    pub fn pattern(pattern: &str) -> Result<Self, RuleError> {
        let regex = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(Self::Pattern {
            regex,
            message: None,
        })
    }

    /// [`Rule::Custom`] from a closure.
    pub fn custom<F>(predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::Custom {
            predicate: Arc::new(predicate),
            message: message.into(),
        }
    }

    /// Replace the failure message.
    #[must_use]
    pub fn with_message(self, msg: impl Into<String>) -> Self {
        let msg = msg.into();
        match self {
            Self::Required { .. } => Self::Required { message: Some(msg) },
            Self::Email { .. } => Self::Email { message: Some(msg) },
            Self::MinLength { min, .. } => Self::MinLength {
                min,
                message: Some(msg),
            },
            Self::MaxLength { max, .. } => Self::MaxLength {
                max,
                message: Some(msg),
            },
            Self::Pattern { regex, .. } => Self::Pattern {
                regex,
                message: Some(msg),
            },
            Self::Custom { predicate, .. } => Self::Custom {
                predicate,
                message: msg,
            },
        }
    }

    /// Short name of the rule, used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Required { .. } => "required",
            Self::Email { .. } => "email",
            Self::MinLength { .. } => "min_length",
            Self::MaxLength { .. } => "max_length",
            Self::Pattern { .. } => "pattern",
            Self::Custom { .. } => "custom",
        }
    }

    /// Apply the rule to `value`, returning the error on failure.
    pub fn check(&self, field: &str, value: &Value) -> Option<LayerError> {
        match self {
            Self::Required { message } => {
                if is_missing(value) {
                    let msg = message_or(message, || format!("Field '{field}' is required"));
                    return Some(validation_error(
                        codes::MISSING_REQUIRED,
                        msg,
                        field_details(field),
                    ));
                }
                None
            }
            Self::Email { message } => {
                let msg = || message_or(message, || format!("Field '{field}' must be a valid email"));
                match value.as_str() {
                    None | Some("") => Some(validation_error(
                        codes::INVALID_EMAIL,
                        msg(),
                        field_details(field),
                    )),
                    Some(email) if !EMAIL_RE.is_match(email) => {
                        let mut details = field_details(field);
                        details.insert("value".into(), email.into());
                        Some(validation_error(codes::INVALID_EMAIL, msg(), details))
                    }
                    Some(_) => None,
                }
            }
            Self::MinLength { min, message } => match measured_len(value) {
                Some(len) if len < *min => {
                    let msg = message_or(message, || {
                        format!("Field '{field}' must have at least {min} characters")
                    });
                    let mut details = field_details(field);
                    details.insert("min".into(), DetailValue::from(*min));
                    Some(validation_error(codes::INVALID_FORMAT, msg, details))
                }
                _ => None,
            },
            Self::MaxLength { max, message } => match measured_len(value) {
                Some(len) if len > *max => {
                    let msg = message_or(message, || {
                        format!("Field '{field}' must have at most {max} characters")
                    });
                    let mut details = field_details(field);
                    details.insert("max".into(), DetailValue::from(*max));
                    Some(validation_error(codes::INVALID_FORMAT, msg, details))
                }
                _ => None,
            },
            Self::Pattern { regex, message } => {
                let msg = || message_or(message, || format!("Field '{field}' must match pattern"));
                match value.as_str() {
                    None => Some(validation_error(
                        codes::INVALID_FORMAT,
                        msg(),
                        field_details(field),
                    )),
                    Some(s) if !regex.is_match(s) => {
                        let mut details = field_details(field);
                        details.insert("pattern".into(), regex.as_str().into());
                        Some(validation_error(codes::INVALID_FORMAT, msg(), details))
                    }
                    Some(_) => None,
                }
            }
            Self::Custom { predicate, message } => {
                if predicate(value) {
                    None
                } else {
                    Some(validation_error(
                        codes::INVALID_FORMAT,
                        message.clone(),
                        field_details(field),
                    ))
                }
            }
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { message } => f
                .debug_struct("Required")
                .field("message", message)
                .finish(),
            Self::Email { message } => f.debug_struct("Email").field("message", message).finish(),
            Self::MinLength { min, message } => f
                .debug_struct("MinLength")
                .field("min", min)
                .field("message", message)
                .finish(),
            Self::MaxLength { max, message } => f
                .debug_struct("MaxLength")
                .field("max", max)
                .field("message", message)
                .finish(),
            Self::Pattern { regex, message } => f
                .debug_struct("Pattern")
                .field("regex", &regex.as_str())
                .field("message", message)
                .finish(),
            Self::Custom { message, .. } => f
                .debug_struct("Custom")
                .field("message", message)
                .finish_non_exhaustive(),
        }
    }
}

fn message_or(message: &Option<String>, default: impl FnOnce() -> String) -> String {
    message.clone().unwrap_or_else(default)
}

fn field_details(field: &str) -> Details {
    Details::from([("field".to_owned(), DetailValue::from(field))])
}

fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Length of strings (in UTF-8 bytes) and arrays; `None` for everything else.
fn measured_len(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.len()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}
