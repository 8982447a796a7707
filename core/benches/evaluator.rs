//! Benchmarks for compiling and running expressions.
//!
//! Run with: `cargo bench` in the core/ directory.
//!
//! Benchmark groups:
//! 1. run_only: evaluation of an already compiled tree
//! 2. full_pipeline: tokenize + parse + evaluate together
//! 3. encoding: storing and loading a compiled tree

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use exprkit_core::{
    api::{CompiledExpression, Engine, EngineOptions},
    stdlib,
    values::Dynamic,
};

/// Generate an arithmetic expression like "1 + 1 + 1 + ... + 1" with `n` additions.
fn generate_arithmetic_chain(n: usize) -> String {
    let mut expr = String::from("1");
    for _ in 0..n {
        expr.push_str(" + 1");
    }
    expr
}

fn engine() -> Engine<(), Dynamic> {
    let builder = stdlib::arithmetic().expect("preset should configure");
    Engine::from_builder(builder, EngineOptions::default()).expect("preset should build")
}

fn bench_run_only(c: &mut Criterion) {
    let engine = engine();
    let mut group = c.benchmark_group("run_only");

    // Sizes chosen to stay under the default compilation depth limit (256)
    for size in [25, 50, 100, 200] {
        group.throughput(Throughput::Elements(size as u64));
        let expr = engine
            .compile(&generate_arithmetic_chain(size))
            .expect("compile failed");

        group.bench_with_input(BenchmarkId::from_parameter(size), &expr, |b, expr| {
            b.iter(|| expr.run(black_box(&engine), None, None).expect("run failed"));
        });
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let engine = engine();
    let mut group = c.benchmark_group("full_pipeline");

    for size in [25, 50, 100, 200] {
        group.throughput(Throughput::Elements(size as u64));
        let source = generate_arithmetic_chain(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| {
                engine
                    .eval(black_box(source), None, None)
                    .expect("eval failed")
            });
        });
    }

    group.finish();
}

fn bench_encoding(c: &mut Criterion) {
    let engine = engine();
    let expr = engine
        .compile("max($a, 2) * (b < 3 ? -c : pow(c, 2)) + str(d)")
        .expect("compile failed");
    let bytes = expr.to_bytes().expect("encode failed");

    c.bench_function("encode", |b| {
        b.iter(|| black_box(&expr).to_bytes().expect("encode failed"))
    });
    c.bench_function("decode", |b| {
        b.iter(|| CompiledExpression::from_bytes(black_box(&bytes)).expect("decode failed"))
    });
}

criterion_group!(benches, bench_run_only, bench_full_pipeline, bench_encoding);
criterion_main!(benches);
