// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layered error taxonomy with stable error codes.
//!
//! Every error carries a [`LayerType`] (which architectural tier raised it),
//! an [`ErrorType`] (what kind of failure it is), an [`ErrorCode`] (a stable,
//! machine-readable string tag), a human-readable message, and structured
//! [`Details`].  Use the constructors in [`factory`] to get the canonical
//! layer/type pairing for each kind of failure.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod codes;
pub mod factory;

pub use factory::{
    application_error, authentication_error, authorization_error, business_rule_error,
    conflict_error, domain_error, infrastructure_error, new_error, not_found_error,
    validation_error,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// LayerType
// ---------------------------------------------------------------------------

/// Architectural tier that originated an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LayerType {
    /// Databases, external services, repositories.
    Infrastructure,
    /// Use-case orchestration, input handling, auth.
    Application,
    /// Business entities and rules.
    Domain,
}

impl LayerType {
    /// Stable lowercase name of the layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Infrastructure => "infrastructure",
            Self::Application => "application",
            Self::Domain => "domain",
        }
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ErrorType
// ---------------------------------------------------------------------------

/// Semantic category of a failure.
///
/// The eight categories partition every anticipated failure condition;
/// the finer-grained [`ErrorCode`] identifies the specific condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Input failed a validation rule.
    Validation,
    /// Caller identity could not be established.
    Authentication,
    /// Caller is known but not allowed.
    Authorization,
    /// Requested entity does not exist.
    NotFound,
    /// Entity already exists or state conflicts.
    Conflict,
    /// A business invariant was violated.
    BusinessRule,
    /// A dependency (database, remote service) failed.
    Infrastructure,
    /// Catch-all for unexpected internal errors.
    Internal,
}

impl ErrorType {
    /// Every error type, in declaration order.
    pub const ALL: [ErrorType; 8] = [
        Self::Validation,
        Self::Authentication,
        Self::Authorization,
        Self::NotFound,
        Self::Conflict,
        Self::BusinessRule,
        Self::Infrastructure,
        Self::Internal,
    ];

    /// Stable snake_case name (e.g. `"not_found"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::BusinessRule => "business_rule",
            Self::Infrastructure => "infrastructure",
            Self::Internal => "internal",
        }
    }

    /// The layer this type is conventionally raised from.
    ///
    /// [`ErrorType::Internal`] has no canonical layer.
    pub fn canonical_layer(&self) -> Option<LayerType> {
        match self {
            Self::Validation | Self::Authentication | Self::Authorization => {
                Some(LayerType::Application)
            }
            Self::NotFound | Self::Conflict | Self::BusinessRule => Some(LayerType::Domain),
            Self::Infrastructure => Some(LayerType::Infrastructure),
            Self::Internal => None,
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ErrorCode
// ---------------------------------------------------------------------------

/// Machine-readable, stable error code.
///
/// Codes are the contract consumers key off.  Any string is accepted; the
/// [`codes`] module holds an illustrative set, and applications define their
/// own as `const` values via [`ErrorCode::from_static`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(Cow<'static, str>);

impl ErrorCode {
    /// Code backed by a static string, usable in `const` items.
    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    /// Code backed by an owned string (e.g. read from configuration).
    pub fn new(code: impl Into<String>) -> Self {
        Self(Cow::Owned(code.into()))
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ErrorCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ErrorCode {
    fn from(code: &'static str) -> Self {
        Self::from_static(code)
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

/// A single structured detail value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum DetailValue {
    /// Text value.
    String(String),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
}

impl DetailValue {
    /// Returns the text if this is a [`DetailValue::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`DetailValue::Int`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for DetailValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for DetailValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for DetailValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<i32> for DetailValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for DetailValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for DetailValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<usize> for DetailValue {
    fn from(v: usize) -> Self {
        Self::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for DetailValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for DetailValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Open key/value bag attached to an error.  Ordered for deterministic output.
pub type Details = BTreeMap<String, DetailValue>;

// ---------------------------------------------------------------------------
// LayeredError
// ---------------------------------------------------------------------------

/// Structured error description: a display string plus the four taxonomy
/// accessors.
///
/// Implemented by [`LayerError`].  Applications with their own error types
/// can implement it to feed those types to protocol translators directly.
pub trait LayeredError: std::error::Error {
    /// Tier that raised the error.
    fn layer(&self) -> LayerType;
    /// Stable machine-readable code.
    fn code(&self) -> &ErrorCode;
    /// Semantic category.
    fn error_type(&self) -> ErrorType;
    /// Structured details (may be empty).
    fn details(&self) -> &Details;
}

// ---------------------------------------------------------------------------
// LayerError
// ---------------------------------------------------------------------------

/// Classified error value.
///
/// Immutable once built: fields are read through accessors, and
/// [`LayerError::with_detail`] consumes the value and returns a new one.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct LayerError {
    layer: LayerType,
    code: ErrorCode,
    #[serde(rename = "type")]
    error_type: ErrorType,
    message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    details: Details,
}

impl LayerError {
    /// Build an error with no details.  See [`new_error`] for the variant
    /// that accepts a detail bag.
    pub fn new(
        layer: LayerType,
        code: ErrorCode,
        error_type: ErrorType,
        message: impl Into<String>,
    ) -> Self {
        new_error(layer, code, error_type, message, Details::new())
    }

    pub(crate) fn from_parts(
        layer: LayerType,
        code: ErrorCode,
        error_type: ErrorType,
        message: String,
        details: Details,
    ) -> Self {
        Self {
            layer,
            code,
            error_type,
            message,
            details,
        }
    }

    /// Return a copy of this error with one more detail entry.
    ///
    /// An existing entry under the same key is replaced.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<DetailValue>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Tier that raised the error.
    pub fn layer(&self) -> LayerType {
        self.layer
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &ErrorCode {
        &self.code
    }

    /// Semantic category.
    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured details.
    pub fn details(&self) -> &Details {
        &self.details
    }

    /// `true` when the layer is the conventional one for the error type.
    pub fn is_canonical(&self) -> bool {
        self.error_type.canonical_layer() == Some(self.layer)
    }
}

impl LayeredError for LayerError {
    fn layer(&self) -> LayerType {
        self.layer
    }

    fn code(&self) -> &ErrorCode {
        &self.code
    }

    fn error_type(&self) -> ErrorType {
        self.error_type
    }

    fn details(&self) -> &Details {
        &self.details
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
