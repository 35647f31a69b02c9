// SPDX-License-Identifier: MIT OR Apache-2.0
//! gRPC translation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use stratum_error::{ErrorCode, ErrorType, LayeredError, codes};

use crate::{ProtocolResponse, ProtocolTranslator, StatusTable};

// ---------------------------------------------------------------------------
// GrpcCode
// ---------------------------------------------------------------------------

/// Canonical gRPC status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrpcCode {
    /// 0
    Ok,
    /// 1
    Cancelled,
    /// 2
    Unknown,
    /// 3
    InvalidArgument,
    /// 4
    DeadlineExceeded,
    /// 5
    NotFound,
    /// 6
    AlreadyExists,
    /// 7
    PermissionDenied,
    /// 8
    ResourceExhausted,
    /// 9
    FailedPrecondition,
    /// 10
    Aborted,
    /// 11
    OutOfRange,
    /// 12
    Unimplemented,
    /// 13
    Internal,
    /// 14
    Unavailable,
    /// 15
    DataLoss,
    /// 16
    Unauthenticated,
}

impl GrpcCode {
    /// Numeric status as sent on the wire.
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Cancelled => 1,
            Self::Unknown => 2,
            Self::InvalidArgument => 3,
            Self::DeadlineExceeded => 4,
            Self::NotFound => 5,
            Self::AlreadyExists => 6,
            Self::PermissionDenied => 7,
            Self::ResourceExhausted => 8,
            Self::FailedPrecondition => 9,
            Self::Aborted => 10,
            Self::OutOfRange => 11,
            Self::Unimplemented => 12,
            Self::Internal => 13,
            Self::Unavailable => 14,
            Self::DataLoss => 15,
            Self::Unauthenticated => 16,
        }
    }

    /// Inverse of [`GrpcCode::as_i32`].
    pub fn from_i32(code: i32) -> Option<Self> {
        let code = match code {
            0 => Self::Ok,
            1 => Self::Cancelled,
            2 => Self::Unknown,
            3 => Self::InvalidArgument,
            4 => Self::DeadlineExceeded,
            5 => Self::NotFound,
            6 => Self::AlreadyExists,
            7 => Self::PermissionDenied,
            8 => Self::ResourceExhausted,
            9 => Self::FailedPrecondition,
            10 => Self::Aborted,
            11 => Self::OutOfRange,
            12 => Self::Unimplemented,
            13 => Self::Internal,
            14 => Self::Unavailable,
            15 => Self::DataLoss,
            16 => Self::Unauthenticated,
            _ => return None,
        };
        Some(code)
    }
}

impl fmt::Display for GrpcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

// ---------------------------------------------------------------------------
// Translator
// ---------------------------------------------------------------------------

/// gRPC error response: the generic body plus status code and message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GrpcErrorResponse {
    /// Generic body, sent as trailer metadata by the transport.
    #[serde(flatten)]
    pub response: ProtocolResponse,
    /// Numeric gRPC status.
    pub grpc_code: i32,
    /// Status message.
    pub grpc_message: String,
}

/// Maps errors to gRPC status codes.
#[derive(Debug, Clone)]
pub struct GrpcTranslator {
    mapping: StatusTable<GrpcCode>,
}

impl GrpcTranslator {
    /// Translator using [`default_mapping`].
    pub fn new() -> Self {
        Self {
            mapping: default_mapping(),
        }
    }

    /// Translator using only `mapping`; the default table is not consulted.
    pub fn with_mapping(mapping: impl Into<StatusTable<GrpcCode>>) -> Self {
        Self {
            mapping: mapping.into(),
        }
    }

    /// The table this translator resolves codes against.
    pub fn mapping(&self) -> &StatusTable<GrpcCode> {
        &self.mapping
    }

    /// Code used for error codes absent from the table.
    pub fn fallback_code(error_type: ErrorType) -> GrpcCode {
        match error_type {
            ErrorType::Validation | ErrorType::BusinessRule => GrpcCode::InvalidArgument,
            ErrorType::Authentication => GrpcCode::Unauthenticated,
            ErrorType::Authorization => GrpcCode::PermissionDenied,
            ErrorType::NotFound => GrpcCode::NotFound,
            ErrorType::Conflict => GrpcCode::AlreadyExists,
            ErrorType::Infrastructure => GrpcCode::Unavailable,
            ErrorType::Internal => GrpcCode::Internal,
        }
    }
}

impl Default for GrpcTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolTranslator for GrpcTranslator {
    type Response = GrpcErrorResponse;

    fn translate_native(&self, err: &dyn LayeredError) -> GrpcErrorResponse {
        let code = self.mapping.resolve("grpc", err, Self::fallback_code);
        GrpcErrorResponse {
            response: self.translate(err),
            grpc_code: code.as_i32(),
            grpc_message: err.to_string(),
        }
    }
}

/// Default gRPC table for the illustrative codes.
///
/// Each code maps to the fallback of the type it belongs to.
pub fn default_mapping() -> StatusTable<GrpcCode> {
    let entries: [(ErrorCode, GrpcCode); 18] = [
        (codes::INVALID_EMAIL, GrpcCode::InvalidArgument),
        (codes::INVALID_PASSWORD, GrpcCode::InvalidArgument),
        (codes::MISSING_REQUIRED, GrpcCode::InvalidArgument),
        (codes::INVALID_FORMAT, GrpcCode::InvalidArgument),
        (codes::INVALID_TOKEN, GrpcCode::Unauthenticated),
        (codes::EXPIRED_TOKEN, GrpcCode::Unauthenticated),
        (codes::INVALID_CREDENTIALS, GrpcCode::Unauthenticated),
        (codes::INSUFFICIENT_PERMISSIONS, GrpcCode::PermissionDenied),
        (codes::ACCESS_DENIED, GrpcCode::PermissionDenied),
        (codes::USER_NOT_FOUND, GrpcCode::NotFound),
        (codes::RESOURCE_NOT_FOUND, GrpcCode::NotFound),
        (codes::USER_ALREADY_EXISTS, GrpcCode::AlreadyExists),
        (codes::EMAIL_ALREADY_TAKEN, GrpcCode::AlreadyExists),
        (codes::INVALID_BUSINESS_RULE, GrpcCode::InvalidArgument),
        (codes::INVALID_STATE, GrpcCode::InvalidArgument),
        (codes::DATABASE_CONNECTION, GrpcCode::Unavailable),
        (codes::EXTERNAL_SERVICE, GrpcCode::Unavailable),
        (codes::REPOSITORY_OPERATION, GrpcCode::Unavailable),
    ];
    StatusTable::from(entries)
}
