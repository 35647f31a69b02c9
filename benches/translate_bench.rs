// SPDX-License-Identifier: MIT OR Apache-2.0
//! Benchmarks for protocol translation: table hits, fallbacks, and details.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use stratum_error::{Details, ErrorCode, codes, not_found_error, validation_error};
use stratum_protocol::{
    GraphQlTranslator, GrpcTranslator, HttpTranslator, ProtocolTranslator, SoapTranslator,
};

fn bench_table_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_hit");
    let err = validation_error(codes::INVALID_EMAIL, "bad email", Details::new())
        .with_detail("field", "email");

    let http = HttpTranslator::new();
    group.bench_function("http", |b| b.iter(|| http.translate_native(black_box(&err))));
    let grpc = GrpcTranslator::new();
    group.bench_function("grpc", |b| b.iter(|| grpc.translate_native(black_box(&err))));
    let soap = SoapTranslator::new().with_actor("urn:bench");
    group.bench_function("soap", |b| b.iter(|| soap.translate_native(black_box(&err))));
    let graphql = GraphQlTranslator::new();
    group.bench_function("graphql", |b| {
        b.iter(|| graphql.translate_at(black_box(&err), ["mutation", "register", "email"]))
    });

    group.finish();
}

fn bench_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("fallback");
    let err = not_found_error(ErrorCode::from_static("ORDER_NOT_FOUND"), "no order", Details::new());

    let http = HttpTranslator::new();
    group.bench_function("http", |b| b.iter(|| http.translate_native(black_box(&err))));
    let graphql = GraphQlTranslator::new();
    group.bench_function("graphql", |b| {
        b.iter(|| graphql.translate_native(black_box(&err)))
    });

    group.finish();
}

fn bench_generic(c: &mut Criterion) {
    let mut details = Details::new();
    for i in 0..16 {
        details.insert(format!("key_{i}"), i.into());
    }
    let err = not_found_error(codes::USER_NOT_FOUND, "user missing", details);
    let http = HttpTranslator::new();
    c.bench_function("generic_with_16_details", |b| {
        b.iter(|| http.translate(black_box(&err)))
    });
}

criterion_group!(benches, bench_table_hit, bench_fallback, bench_generic);
criterion_main!(benches);
