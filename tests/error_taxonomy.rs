// SPDX-License-Identifier: MIT OR Apache-2.0
//! Integration tests for the layered error taxonomy.
//!
//! Checks the factory's layer/type pairing, serialization of `LayerError`,
//! and that any `LayeredError` implementer flows through every translator.

use std::collections::HashSet;
use std::fmt;

use stratum_error::{
    DetailValue, Details, ErrorCode, ErrorType, LayerError, LayerType, LayeredError,
    application_error, authentication_error, authorization_error, business_rule_error, codes,
    conflict_error, domain_error, infrastructure_error, new_error, not_found_error,
    validation_error,
};
use stratum_protocol::{
    GraphQlTranslator, GrpcTranslator, HttpTranslator, ProtocolResponse, ProtocolTranslator,
    SoapTranslator,
};

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

#[test]
fn convenience_constructors_are_canonical() {
    let errs = [
        validation_error(codes::INVALID_EMAIL, "m", Details::new()),
        authentication_error(codes::INVALID_TOKEN, "m", Details::new()),
        authorization_error(codes::ACCESS_DENIED, "m", Details::new()),
        not_found_error(codes::USER_NOT_FOUND, "m", Details::new()),
        conflict_error(codes::USER_ALREADY_EXISTS, "m", Details::new()),
        business_rule_error(codes::INVALID_STATE, "m", Details::new()),
        infrastructure_error(codes::DATABASE_CONNECTION, "m", Details::new()),
    ];
    for err in &errs {
        assert!(err.is_canonical(), "{} is not canonical", err.code());
    }
    let types: HashSet<ErrorType> = errs.iter().map(LayerError::error_type).collect();
    assert_eq!(types.len(), errs.len());
}

#[test]
fn non_canonical_combinations_are_allowed() {
    let err = new_error(
        LayerType::Infrastructure,
        codes::USER_NOT_FOUND,
        ErrorType::NotFound,
        "row missing",
        Details::new(),
    );
    assert!(!err.is_canonical());
    assert_eq!(err.layer(), LayerType::Infrastructure);

    let err = application_error(codes::INVALID_STATE, ErrorType::Internal, "oops", Details::new());
    assert!(!err.is_canonical());
    assert_eq!(ErrorType::Internal.canonical_layer(), None);
}

#[test]
fn empty_code_and_message_are_accepted() {
    let err = domain_error(ErrorCode::new(""), ErrorType::Conflict, "", Details::new());
    assert_eq!(err.code().as_str(), "");
    assert_eq!(err.to_string(), "");
    let resp = HttpTranslator::new().translate_native(&err);
    assert_eq!(resp.http_status, 409);
}

#[test]
fn details_are_preserved_verbatim() {
    let mut details = Details::new();
    details.insert("field".into(), "email".into());
    details.insert("attempts".into(), 3.into());
    details.insert("ratio".into(), 0.5.into());
    details.insert("locked".into(), true.into());
    let err = authentication_error(codes::INVALID_CREDENTIALS, "nope", details.clone());
    assert_eq!(err.details(), &details);
    assert_eq!(err.details()["locked"], DetailValue::Bool(true));
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn layer_error_json_shape() {
    let err = not_found_error(codes::USER_NOT_FOUND, "user 7 missing", Details::new())
        .with_detail("user_id", 7);
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "layer": "domain",
            "code": "USER_NOT_FOUND",
            "type": "not_found",
            "message": "user 7 missing",
            "details": {"user_id": 7}
        })
    );
    let back: LayerError = serde_json::from_value(json).unwrap();
    assert_eq!(back, err);
}

// ---------------------------------------------------------------------------
// Foreign LayeredError implementations
// ---------------------------------------------------------------------------

/// Application error type that does not use `LayerError`.
#[derive(Debug)]
struct QuotaExceeded {
    code: ErrorCode,
    details: Details,
}

impl QuotaExceeded {
    fn new(limit: i64) -> Self {
        let mut details = Details::new();
        details.insert("limit".into(), limit.into());
        Self {
            code: ErrorCode::from_static("QUOTA_EXCEEDED"),
            details,
        }
    }
}

impl fmt::Display for QuotaExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quota of {} exceeded", self.details["limit"])
    }
}

impl std::error::Error for QuotaExceeded {}

impl LayeredError for QuotaExceeded {
    fn layer(&self) -> LayerType {
        LayerType::Domain
    }
    fn code(&self) -> &ErrorCode {
        &self.code
    }
    fn error_type(&self) -> ErrorType {
        ErrorType::BusinessRule
    }
    fn details(&self) -> &Details {
        &self.details
    }
}

#[test]
fn foreign_error_flows_through_every_translator() {
    let err = QuotaExceeded::new(100);
    let expected = ProtocolResponse {
        error: "quota of 100 exceeded".into(),
        code: "QUOTA_EXCEEDED".into(),
        error_type: "business_rule".into(),
        details: err.details.clone(),
    };

    let http = HttpTranslator::new().translate_native(&err);
    assert_eq!(http.response, expected);
    assert_eq!(http.http_status, 422);

    let grpc = GrpcTranslator::new().translate_native(&err);
    assert_eq!(grpc.grpc_code, 3);
    assert_eq!(grpc.grpc_message, "quota of 100 exceeded");

    let soap = SoapTranslator::new().translate_native(&err);
    assert_eq!(soap.fault_code, "soap:Client");

    let gql = GraphQlTranslator::new().translate_native(&err);
    assert_eq!(gql.error_code, "FAILED_PRECONDITION");
    assert_eq!(gql.extensions["limit"].as_i64(), Some(100));
}

#[test]
fn translators_work_behind_trait_objects() {
    let boxed: Vec<Box<dyn LayeredError>> = vec![
        Box::new(QuotaExceeded::new(5)),
        Box::new(infrastructure_error(codes::EXTERNAL_SERVICE, "down", Details::new())),
    ];
    let statuses: Vec<u16> = boxed
        .iter()
        .map(|e| HttpTranslator::new().translate_native(e.as_ref()).http_status)
        .collect();
    assert_eq!(statuses, vec![422, 424]);
}
