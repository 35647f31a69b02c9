// SPDX-License-Identifier: MIT OR Apache-2.0
//! GraphQL error translation.
//!
//! Produces one entry for a response's `errors` array.  The protocol code
//! and the error's classification travel in `extensions`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stratum_error::{DetailValue, ErrorCode, ErrorType, LayeredError, codes};

use crate::{ProtocolResponse, ProtocolTranslator, StatusTable};

/// Extension keys set by the translator; these override same-named details.
pub const RESERVED_EXTENSION_KEYS: [&str; 4] = ["code", "errorCode", "errorType", "layer"];

/// GraphQL error entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GraphQlErrorResponse {
    /// Generic body.
    #[serde(flatten)]
    pub response: ProtocolResponse,
    /// GraphQL error code, e.g. `BAD_USER_INPUT`.
    pub error_code: String,
    /// Path to the field that failed; empty when not tied to a field.
    pub path: Vec<String>,
    /// Error details plus the reserved classification keys.
    pub extensions: BTreeMap<String, DetailValue>,
}

/// Maps errors to GraphQL error codes.
#[derive(Debug, Clone)]
pub struct GraphQlTranslator {
    mapping: StatusTable<String>,
}

impl GraphQlTranslator {
    /// Translator using [`default_mapping`].
    pub fn new() -> Self {
        Self {
            mapping: default_mapping(),
        }
    }

    /// Translator using only `mapping`; the default table is not consulted.
    pub fn with_mapping(mapping: impl Into<StatusTable<String>>) -> Self {
        Self {
            mapping: mapping.into(),
        }
    }

    /// The table this translator resolves codes against.
    pub fn mapping(&self) -> &StatusTable<String> {
        &self.mapping
    }

    /// Code used for error codes absent from the table.
    pub fn fallback_code(error_type: ErrorType) -> &'static str {
        match error_type {
            ErrorType::Validation => "BAD_USER_INPUT",
            ErrorType::Authentication => "UNAUTHENTICATED",
            ErrorType::Authorization => "FORBIDDEN",
            ErrorType::NotFound => "NOT_FOUND",
            ErrorType::Conflict => "CONFLICT",
            ErrorType::BusinessRule => "FAILED_PRECONDITION",
            ErrorType::Infrastructure => "SERVICE_UNAVAILABLE",
            ErrorType::Internal => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Translate an error raised while resolving the field at `path`.
    pub fn translate_at<I, P>(&self, err: &dyn LayeredError, path: I) -> GraphQlErrorResponse
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let error_code = self
            .mapping
            .resolve("graphql", err, |ty| Self::fallback_code(ty).to_owned());

        let mut extensions = err.details().clone();
        extensions.insert("code".into(), error_code.as_str().into());
        extensions.insert("errorCode".into(), err.code().as_str().into());
        extensions.insert("errorType".into(), err.error_type().as_str().into());
        extensions.insert("layer".into(), err.layer().as_str().into());

        GraphQlErrorResponse {
            response: self.translate(err),
            error_code,
            path: path.into_iter().map(Into::into).collect(),
            extensions,
        }
    }
}

impl Default for GraphQlTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolTranslator for GraphQlTranslator {
    type Response = GraphQlErrorResponse;

    fn translate_native(&self, err: &dyn LayeredError) -> GraphQlErrorResponse {
        self.translate_at(err, std::iter::empty::<String>())
    }
}

/// Default GraphQL table for the illustrative codes.
///
/// Matches the type fallback except `EXPIRED_TOKEN`, which maps to
/// `TOKEN_EXPIRED`.
pub fn default_mapping() -> StatusTable<String> {
    let entries: [(ErrorCode, &str); 18] = [
        (codes::INVALID_EMAIL, "BAD_USER_INPUT"),
        (codes::INVALID_PASSWORD, "BAD_USER_INPUT"),
        (codes::MISSING_REQUIRED, "BAD_USER_INPUT"),
        (codes::INVALID_FORMAT, "BAD_USER_INPUT"),
        (codes::INVALID_TOKEN, "UNAUTHENTICATED"),
        (codes::EXPIRED_TOKEN, "TOKEN_EXPIRED"),
        (codes::INVALID_CREDENTIALS, "UNAUTHENTICATED"),
        (codes::INSUFFICIENT_PERMISSIONS, "FORBIDDEN"),
        (codes::ACCESS_DENIED, "FORBIDDEN"),
        (codes::USER_NOT_FOUND, "NOT_FOUND"),
        (codes::RESOURCE_NOT_FOUND, "NOT_FOUND"),
        (codes::USER_ALREADY_EXISTS, "CONFLICT"),
        (codes::EMAIL_ALREADY_TAKEN, "CONFLICT"),
        (codes::INVALID_BUSINESS_RULE, "FAILED_PRECONDITION"),
        (codes::INVALID_STATE, "FAILED_PRECONDITION"),
        (codes::DATABASE_CONNECTION, "SERVICE_UNAVAILABLE"),
        (codes::EXTERNAL_SERVICE, "SERVICE_UNAVAILABLE"),
        (codes::REPOSITORY_OPERATION, "SERVICE_UNAVAILABLE"),
    ];
    entries
        .into_iter()
        .map(|(code, gql)| (code, gql.to_owned()))
        .collect()
}
