// SPDX-License-Identifier: MIT OR Apache-2.0
//! Protocol translators for layered errors.
//!
//! A translator turns any [`LayeredError`] into a plain response value for
//! one transport.  [`ProtocolTranslator::translate`] produces the
//! transport-neutral [`ProtocolResponse`];
//! [`ProtocolTranslator::translate_native`] adds the protocol's own status
//! fields, resolved in two tiers:
//!
//! 1. the translator's [`StatusTable`] keyed by error code;
//! 2. on a miss, a fixed fallback for the error's [`ErrorType`].
//!
//! Translation never mutates the error or the table.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod graphql;
pub mod grpc;
pub mod http;
pub mod soap;

pub use graphql::{GraphQlErrorResponse, GraphQlTranslator};
pub use grpc::{GrpcCode, GrpcErrorResponse, GrpcTranslator};
pub use http::{HttpErrorResponse, HttpTranslator};
pub use soap::{SoapErrorResponse, SoapFaultCode, SoapTranslator};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use stratum_error::{Details, ErrorCode, ErrorType, LayeredError};
use tracing::debug;

// ---------------------------------------------------------------------------
// ProtocolResponse
// ---------------------------------------------------------------------------

/// Transport-neutral error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProtocolResponse {
    /// Error description (the error's `Display` output).
    pub error: String,
    /// Stable error code.
    pub code: String,
    /// Error type name (e.g. `"not_found"`).
    #[serde(rename = "type")]
    pub error_type: String,
    /// Structured details copied from the error.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: Details,
}

impl ProtocolResponse {
    /// Copy description, code, type, and details verbatim from `err`.
    pub fn from_error(err: &dyn LayeredError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code().to_string(),
            error_type: err.error_type().to_string(),
            details: err.details().clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// ProtocolTranslator
// ---------------------------------------------------------------------------

/// Converts classified errors into one transport's response shape.
pub trait ProtocolTranslator {
    /// Protocol-specific response type.
    type Response;

    /// Generic translation.  Always succeeds.
    fn translate(&self, err: &dyn LayeredError) -> ProtocolResponse {
        ProtocolResponse::from_error(err)
    }

    /// Protocol-specific translation: the generic response plus native
    /// status fields.  Always succeeds.
    fn translate_native(&self, err: &dyn LayeredError) -> Self::Response;
}

// ---------------------------------------------------------------------------
// StatusTable
// ---------------------------------------------------------------------------

/// Error code → protocol-native status, owned by a single translator.
///
/// Built once (from an iterator or array) and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTable<S> {
    entries: HashMap<ErrorCode, S>,
}

impl<S> StatusTable<S> {
    /// Table with no entries; every code resolves through the fallback.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Status mapped to `code`, if any.  Accepts `&ErrorCode` or `&str`.
    pub fn get<Q>(&self, code: &Q) -> Option<&S>
    where
        ErrorCode: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(code)
    }

    /// `true` if `code` has an entry.
    pub fn contains<Q>(&self, code: &Q) -> bool
    where
        ErrorCode: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(code)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries (arbitrary order).
    pub fn iter(&self) -> impl Iterator<Item = (&ErrorCode, &S)> {
        self.entries.iter()
    }
}

impl<S: Clone> StatusTable<S> {
    /// Table entry for the error's code, or `fallback(error_type)` on a miss.
    pub(crate) fn resolve(
        &self,
        protocol: &'static str,
        err: &dyn LayeredError,
        fallback: impl FnOnce(ErrorType) -> S,
    ) -> S {
        match self.entries.get(err.code()) {
            Some(status) => status.clone(),
            None => {
                debug!(
                    target: "stratum.protocol",
                    protocol,
                    code = %err.code(),
                    error_type = %err.error_type(),
                    "no mapping for error code, using type fallback"
                );
                fallback(err.error_type())
            }
        }
    }
}

impl<S> Default for StatusTable<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S> FromIterator<(ErrorCode, S)> for StatusTable<S> {
    fn from_iter<I: IntoIterator<Item = (ErrorCode, S)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<S, const N: usize> From<[(ErrorCode, S); N]> for StatusTable<S> {
    fn from(entries: [(ErrorCode, S); N]) -> Self {
        entries.into_iter().collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
