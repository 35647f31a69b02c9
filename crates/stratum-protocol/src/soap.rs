// SPDX-License-Identifier: MIT OR Apache-2.0
//! SOAP 1.1 fault translation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use stratum_error::{ErrorCode, ErrorType, LayeredError, codes};

use crate::{ProtocolResponse, ProtocolTranslator, StatusTable};

/// SOAP 1.1 fault codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum SoapFaultCode {
    /// Invalid envelope namespace.
    VersionMismatch,
    /// A mandatory header was not understood.
    MustUnderstand,
    /// The request was at fault.
    Client,
    /// The server failed to process a valid request.
    Server,
}

impl SoapFaultCode {
    /// Local name, e.g. `"Client"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VersionMismatch => "VersionMismatch",
            Self::MustUnderstand => "MustUnderstand",
            Self::Client => "Client",
            Self::Server => "Server",
        }
    }

    /// Envelope-qualified name, e.g. `"soap:Client"`.
    pub fn qualified(&self) -> String {
        format!("soap:{}", self.as_str())
    }
}

impl fmt::Display for SoapFaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SOAP fault: the generic body plus `faultcode`, `faultstring`, and
/// `faultactor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SoapErrorResponse {
    /// Generic body, carried as fault detail.
    #[serde(flatten)]
    pub response: ProtocolResponse,
    /// Qualified fault code, e.g. `soap:Client`.
    pub fault_code: String,
    /// Human-readable fault string.
    pub fault_string: String,
    /// URI of the node that raised the fault.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault_actor: Option<String>,
}

/// Maps errors to SOAP faults.
#[derive(Debug, Clone)]
pub struct SoapTranslator {
    mapping: StatusTable<SoapFaultCode>,
    actor: Option<String>,
}

impl SoapTranslator {
    /// Translator using [`default_mapping`] and no actor.
    pub fn new() -> Self {
        Self {
            mapping: default_mapping(),
            actor: None,
        }
    }

    /// Translator using only `mapping`; the default table is not consulted.
    pub fn with_mapping(mapping: impl Into<StatusTable<SoapFaultCode>>) -> Self {
        Self {
            mapping: mapping.into(),
            actor: None,
        }
    }

    /// Set the `faultactor` URI reported on every fault.
    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// The table this translator resolves codes against.
    pub fn mapping(&self) -> &StatusTable<SoapFaultCode> {
        &self.mapping
    }

    /// Configured actor URI.
    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    /// Fault code used for error codes absent from the table.
    pub fn fallback_fault(error_type: ErrorType) -> SoapFaultCode {
        match error_type {
            ErrorType::Infrastructure | ErrorType::Internal => SoapFaultCode::Server,
            ErrorType::Validation
            | ErrorType::Authentication
            | ErrorType::Authorization
            | ErrorType::NotFound
            | ErrorType::Conflict
            | ErrorType::BusinessRule => SoapFaultCode::Client,
        }
    }
}

impl Default for SoapTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolTranslator for SoapTranslator {
    type Response = SoapErrorResponse;

    fn translate_native(&self, err: &dyn LayeredError) -> SoapErrorResponse {
        let fault = self.mapping.resolve("soap", err, Self::fallback_fault);
        SoapErrorResponse {
            response: self.translate(err),
            fault_code: fault.qualified(),
            fault_string: err.to_string(),
            fault_actor: self.actor.clone(),
        }
    }
}

/// Default SOAP table for the illustrative codes.
pub fn default_mapping() -> StatusTable<SoapFaultCode> {
    use SoapFaultCode::{Client, Server};
    let entries: [(ErrorCode, SoapFaultCode); 18] = [
        (codes::INVALID_EMAIL, Client),
        (codes::INVALID_PASSWORD, Client),
        (codes::MISSING_REQUIRED, Client),
        (codes::INVALID_FORMAT, Client),
        (codes::INVALID_TOKEN, Client),
        (codes::EXPIRED_TOKEN, Client),
        (codes::INVALID_CREDENTIALS, Client),
        (codes::INSUFFICIENT_PERMISSIONS, Client),
        (codes::ACCESS_DENIED, Client),
        (codes::USER_NOT_FOUND, Client),
        (codes::RESOURCE_NOT_FOUND, Client),
        (codes::USER_ALREADY_EXISTS, Client),
        (codes::EMAIL_ALREADY_TAKEN, Client),
        (codes::INVALID_BUSINESS_RULE, Client),
        (codes::INVALID_STATE, Client),
        (codes::DATABASE_CONNECTION, Server),
        (codes::EXTERNAL_SERVICE, Server),
        (codes::REPOSITORY_OPERATION, Server),
    ];
    StatusTable::from(entries)
}
