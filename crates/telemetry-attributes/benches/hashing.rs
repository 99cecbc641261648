//! Fingerprint throughput for typical metric attribute sets.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use telemetry_attributes::{
    hash_attribute_map, hash_filtered_attributes, AttributeMap, AttributeValue,
    OrderedAttributeMap, StringAttributeMap,
};

const PORTS: [i32; 4] = [80, 443, 8080, 8443];
const HOSTS: [&str; 3] = ["edge-1", "edge-2", "edge-3"];

fn recorded() -> Vec<(&'static str, AttributeValue<'static>)> {
    vec![
        ("http.method", AttributeValue::Str("GET")),
        ("http.route", AttributeValue::Str("/api/v1/orders/:id")),
        ("http.status_code", AttributeValue::Int(200)),
        ("http.flavor", AttributeValue::Double(1.1)),
        ("net.host.ports", AttributeValue::IntSlice(&PORTS)),
        ("net.peer.names", AttributeValue::StrSlice(&HOSTS)),
        ("retry", AttributeValue::Bool(false)),
        ("request.bytes", AttributeValue::Int64(18_204)),
    ]
}

fn bench_map_hash(c: &mut Criterion) {
    let source = recorded();
    let ordered = OrderedAttributeMap::from_iterable(&source);
    let unordered = AttributeMap::from_iterable(&source);
    let text = StringAttributeMap::from_iterable(&source);

    let mut group = c.benchmark_group("hash_attribute_map");
    group.bench_function("ordered", |b| {
        b.iter(|| hash_attribute_map(black_box(&ordered)))
    });
    group.bench_function("unordered", |b| {
        b.iter(|| hash_attribute_map(black_box(&unordered)))
    });
    group.bench_function("string", |b| b.iter(|| hash_attribute_map(black_box(&text))));
    group.finish();
}

fn bench_filtered_hash(c: &mut Criterion) {
    let source = recorded();
    c.bench_function("hash_filtered_attributes/http_only", |b| {
        b.iter(|| hash_filtered_attributes(black_box(&source), |key| key.starts_with("http.")))
    });
}

fn bench_populate(c: &mut Criterion) {
    let source = recorded();
    c.bench_function("OrderedAttributeMap::from_iterable", |b| {
        b.iter(|| OrderedAttributeMap::from_iterable(black_box(&source)))
    });
}

criterion_group!(benches, bench_map_hash, bench_filtered_hash, bench_populate);
criterion_main!(benches);
