//! Code generation benchmarks.

use configen_bench::schemas::{nested_objects, reference_fanout, wide_object};
use configen_codegen::{GeneratorOptions, Generator, generate};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

fn options() -> GeneratorOptions {
    GeneratorOptions::builder()
        .namespace(["bench", "config"])
        .base_name("bench_config")
        .build()
}

fn benchmark_generate_wide(c: &mut Criterion) {
    let options = options();
    let mut group = c.benchmark_group("generate_wide_object");
    for members in [8, 64, 512] {
        let schema = configen_schema::parse_schema_str(&wide_object(members)).unwrap();
        group.throughput(Throughput::Elements(members as u64));
        group.bench_with_input(BenchmarkId::from_parameter(members), &schema, |b, schema| {
            b.iter(|| generate(black_box(schema), &options))
        });
    }
    group.finish();
}

fn benchmark_generate_nested(c: &mut Criterion) {
    let options = options();
    let mut group = c.benchmark_group("generate_nested");
    for depth in [2, 8, 32] {
        let schema = configen_schema::parse_schema_str(&nested_objects(depth)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(depth), &schema, |b, schema| {
            b.iter(|| generate(black_box(schema), &options))
        });
    }
    group.finish();
}

fn benchmark_walk_only(c: &mut Criterion) {
    let options = options();
    let schema = configen_schema::parse_schema_str(&reference_fanout(64)).unwrap();

    c.bench_function("walk_reference_fanout_64", |b| {
        b.iter(|| Generator::new(black_box(&schema), &options).generate())
    });
}

criterion_group!(
    benches,
    benchmark_generate_wide,
    benchmark_generate_nested,
    benchmark_walk_only,
);
criterion_main!(benches);
