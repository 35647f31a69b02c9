// SPDX-License-Identifier: MIT OR Apache-2.0
//! Illustrative error codes.
//!
//! Applications are free to define their own codes; these cover the common
//! conditions and are what the default translator tables are keyed on.

use crate::ErrorCode;

// -- Validation --
/// Email address is malformed.
pub const INVALID_EMAIL: ErrorCode = ErrorCode::from_static("INVALID_EMAIL");
/// Password does not meet requirements.
pub const INVALID_PASSWORD: ErrorCode = ErrorCode::from_static("INVALID_PASSWORD");
/// A required field is absent or blank.
pub const MISSING_REQUIRED: ErrorCode = ErrorCode::from_static("MISSING_REQUIRED");
/// A field has the wrong shape, length, or pattern.
pub const INVALID_FORMAT: ErrorCode = ErrorCode::from_static("INVALID_FORMAT");

// -- Authentication --
/// Token could not be parsed or verified.
pub const INVALID_TOKEN: ErrorCode = ErrorCode::from_static("INVALID_TOKEN");
/// Token was valid but has expired.
pub const EXPIRED_TOKEN: ErrorCode = ErrorCode::from_static("EXPIRED_TOKEN");
/// Username/password pair was rejected.
pub const INVALID_CREDENTIALS: ErrorCode = ErrorCode::from_static("INVALID_CREDENTIALS");

// -- Authorization --
/// Caller lacks a required permission.
pub const INSUFFICIENT_PERMISSIONS: ErrorCode =
    ErrorCode::from_static("INSUFFICIENT_PERMISSIONS");
/// Access to the resource is denied.
pub const ACCESS_DENIED: ErrorCode = ErrorCode::from_static("ACCESS_DENIED");

// -- Not found --
/// User does not exist.
pub const USER_NOT_FOUND: ErrorCode = ErrorCode::from_static("USER_NOT_FOUND");
/// Generic resource does not exist.
pub const RESOURCE_NOT_FOUND: ErrorCode = ErrorCode::from_static("RESOURCE_NOT_FOUND");

// -- Conflict --
/// User already registered.
pub const USER_ALREADY_EXISTS: ErrorCode = ErrorCode::from_static("USER_ALREADY_EXISTS");
/// Email address is already in use.
pub const EMAIL_ALREADY_TAKEN: ErrorCode = ErrorCode::from_static("EMAIL_ALREADY_TAKEN");

// -- Business rule --
/// A business rule was violated.
pub const INVALID_BUSINESS_RULE: ErrorCode = ErrorCode::from_static("INVALID_BUSINESS_RULE");
/// Entity is in a state that does not allow the operation.
pub const INVALID_STATE: ErrorCode = ErrorCode::from_static("INVALID_STATE");

// -- Infrastructure --
/// Database is unreachable.
pub const DATABASE_CONNECTION: ErrorCode = ErrorCode::from_static("DATABASE_CONNECTION");
/// A remote service failed.
pub const EXTERNAL_SERVICE: ErrorCode = ErrorCode::from_static("EXTERNAL_SERVICE");
/// A repository read or write failed.
pub const REPOSITORY_OPERATION: ErrorCode = ErrorCode::from_static("REPOSITORY_OPERATION");

/// Every illustrative code, grouped by the error type it belongs to.
pub static ALL: [ErrorCode; 18] = [
    INVALID_EMAIL,
    INVALID_PASSWORD,
    MISSING_REQUIRED,
    INVALID_FORMAT,
    INVALID_TOKEN,
    EXPIRED_TOKEN,
    INVALID_CREDENTIALS,
    INSUFFICIENT_PERMISSIONS,
    ACCESS_DENIED,
    USER_NOT_FOUND,
    RESOURCE_NOT_FOUND,
    USER_ALREADY_EXISTS,
    EMAIL_ALREADY_TAKEN,
    INVALID_BUSINESS_RULE,
    INVALID_STATE,
    DATABASE_CONNECTION,
    EXTERNAL_SERVICE,
    REPOSITORY_OPERATION,
];
