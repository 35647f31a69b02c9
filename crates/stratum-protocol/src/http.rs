// SPDX-License-Identifier: MIT OR Apache-2.0
//! HTTP translation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use stratum_error::{ErrorCode, ErrorType, LayeredError, codes};

use crate::{ProtocolResponse, ProtocolTranslator, StatusTable};

const BAD_REQUEST: u16 = 400;
const UNAUTHORIZED: u16 = 401;
const FORBIDDEN: u16 = 403;
const NOT_FOUND: u16 = 404;
const CONFLICT: u16 = 409;
const UNPROCESSABLE_ENTITY: u16 = 422;
const FAILED_DEPENDENCY: u16 = 424;
const INTERNAL_SERVER_ERROR: u16 = 500;

/// HTTP error response: the generic body plus the status to send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HttpErrorResponse {
    /// Response body.
    #[serde(flatten)]
    pub response: ProtocolResponse,
    /// HTTP status code.
    pub http_status: u16,
}

/// Maps errors to HTTP status codes.
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    mapping: StatusTable<u16>,
}

impl HttpTranslator {
    /// Translator using [`default_mapping`].
    pub fn new() -> Self {
        Self {
            mapping: default_mapping(),
        }
    }

    /// Translator using only `mapping`; the default table is not consulted.
    pub fn with_mapping(mapping: impl Into<StatusTable<u16>>) -> Self {
        Self {
            mapping: mapping.into(),
        }
    }

    /// The table this translator resolves codes against.
    pub fn mapping(&self) -> &StatusTable<u16> {
        &self.mapping
    }

    /// Status used for codes absent from the table.
    pub fn fallback_status(error_type: ErrorType) -> u16 {
        match error_type {
            ErrorType::Validation => BAD_REQUEST,
            ErrorType::Authentication => UNAUTHORIZED,
            ErrorType::Authorization => FORBIDDEN,
            ErrorType::NotFound => NOT_FOUND,
            ErrorType::Conflict => CONFLICT,
            ErrorType::BusinessRule => UNPROCESSABLE_ENTITY,
            ErrorType::Infrastructure => FAILED_DEPENDENCY,
            ErrorType::Internal => INTERNAL_SERVER_ERROR,
        }
    }
}

impl Default for HttpTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolTranslator for HttpTranslator {
    type Response = HttpErrorResponse;

    fn translate_native(&self, err: &dyn LayeredError) -> HttpErrorResponse {
        HttpErrorResponse {
            response: self.translate(err),
            http_status: self.mapping.resolve("http", err, Self::fallback_status),
        }
    }
}

/// Default HTTP table for the illustrative codes.
pub fn default_mapping() -> StatusTable<u16> {
    let entries: [(ErrorCode, u16); 18] = [
        (codes::INVALID_EMAIL, BAD_REQUEST),
        (codes::INVALID_PASSWORD, BAD_REQUEST),
        (codes::MISSING_REQUIRED, BAD_REQUEST),
        (codes::INVALID_FORMAT, BAD_REQUEST),
        (codes::INVALID_TOKEN, UNAUTHORIZED),
        (codes::EXPIRED_TOKEN, UNAUTHORIZED),
        (codes::INVALID_CREDENTIALS, UNAUTHORIZED),
        (codes::INSUFFICIENT_PERMISSIONS, FORBIDDEN),
        (codes::ACCESS_DENIED, FORBIDDEN),
        (codes::USER_NOT_FOUND, NOT_FOUND),
        (codes::RESOURCE_NOT_FOUND, NOT_FOUND),
        (codes::USER_ALREADY_EXISTS, CONFLICT),
        (codes::EMAIL_ALREADY_TAKEN, CONFLICT),
        (codes::INVALID_BUSINESS_RULE, UNPROCESSABLE_ENTITY),
        (codes::INVALID_STATE, UNPROCESSABLE_ENTITY),
        (codes::DATABASE_CONNECTION, FAILED_DEPENDENCY),
        (codes::EXTERNAL_SERVICE, FAILED_DEPENDENCY),
        (codes::REPOSITORY_OPERATION, FAILED_DEPENDENCY),
    ];
    StatusTable::from(entries)
}
