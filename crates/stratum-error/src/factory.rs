// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error constructors.
//!
//! [`new_error`] accepts any combination of layer and type.  The named
//! constructors fix the canonical pairing:
//!
//! | Constructor | Layer | Type |
//! |---|---|---|
//! | [`validation_error`] | Application | Validation |
//! | [`authentication_error`] | Application | Authentication |
//! | [`authorization_error`] | Application | Authorization |
//! | [`not_found_error`] | Domain | NotFound |
//! | [`conflict_error`] | Domain | Conflict |
//! | [`business_rule_error`] | Domain | BusinessRule |
//! | [`infrastructure_error`] | Infrastructure | Infrastructure |
//!
//! Codes are never checked against a registry.

use crate::{Details, ErrorCode, ErrorType, LayerError, LayerType};

/// Primitive constructor.  Total over its inputs; never fails.
pub fn new_error(
    layer: LayerType,
    code: ErrorCode,
    error_type: ErrorType,
    message: impl Into<String>,
    details: Details,
) -> LayerError {
    LayerError::from_parts(layer, code, error_type, message.into(), details)
}

/// Infrastructure-layer error of type [`ErrorType::Infrastructure`].
pub fn infrastructure_error(
    code: ErrorCode,
    message: impl Into<String>,
    details: Details,
) -> LayerError {
    new_error(
        LayerType::Infrastructure,
        code,
        ErrorType::Infrastructure,
        message,
        details,
    )
}

/// Application-layer error with a caller-chosen type.
pub fn application_error(
    code: ErrorCode,
    error_type: ErrorType,
    message: impl Into<String>,
    details: Details,
) -> LayerError {
    new_error(LayerType::Application, code, error_type, message, details)
}

/// Domain-layer error with a caller-chosen type.
pub fn domain_error(
    code: ErrorCode,
    error_type: ErrorType,
    message: impl Into<String>,
    details: Details,
) -> LayerError {
    new_error(LayerType::Domain, code, error_type, message, details)
}

/// Input failed validation.
pub fn validation_error(code: ErrorCode, message: impl Into<String>, details: Details) -> LayerError {
    application_error(code, ErrorType::Validation, message, details)
}

/// Caller could not be authenticated.
pub fn authentication_error(
    code: ErrorCode,
    message: impl Into<String>,
    details: Details,
) -> LayerError {
    application_error(code, ErrorType::Authentication, message, details)
}

/// Caller is not allowed to perform the operation.
pub fn authorization_error(
    code: ErrorCode,
    message: impl Into<String>,
    details: Details,
) -> LayerError {
    application_error(code, ErrorType::Authorization, message, details)
}

/// Entity does not exist.
pub fn not_found_error(code: ErrorCode, message: impl Into<String>, details: Details) -> LayerError {
    domain_error(code, ErrorType::NotFound, message, details)
}

/// Entity already exists or conflicts with current state.
pub fn conflict_error(code: ErrorCode, message: impl Into<String>, details: Details) -> LayerError {
    domain_error(code, ErrorType::Conflict, message, details)
}

/// Business invariant violated.
pub fn business_rule_error(
    code: ErrorCode,
    message: impl Into<String>,
    details: Details,
) -> LayerError {
    domain_error(code, ErrorType::BusinessRule, message, details)
}
