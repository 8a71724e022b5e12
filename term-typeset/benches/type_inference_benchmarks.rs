//! Benchmarks for Typeset inference performance.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;
use term_typeset::column::{Column, Value};
use term_typeset::test_fixtures::profiling_series;
use term_typeset::typeset::Typeset;

fn typeset(threshold: usize) -> Typeset {
    Typeset::builder()
        .low_categorical_threshold(threshold)
        .build()
        .unwrap()
}

fn generated_columns(rows: usize) -> Vec<Column> {
    vec![
        Column::new("integers", (0..rows as i64).map(Value::Int)),
        Column::new("floats", (0..rows).map(|i| Value::Float(i as f64 * 0.5))),
        Column::new("numeric_text", (0..rows).map(|i| i.to_string())),
        Column::new(
            "yes_no",
            (0..rows).map(|i| if i % 3 == 0 { "Yes" } else { "no" }),
        ),
        Column::new("free_text", (0..rows).map(|i| format!("value {i}"))),
        Column::new("low_cardinality", (0..rows).map(|i| (i % 3) as i64)),
    ]
}

fn bench_single_column_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_column_inference");
    group.measurement_time(Duration::from_secs(10));

    let typeset = typeset(5);
    for column in generated_columns(1000) {
        group.bench_with_input(
            BenchmarkId::new("default_config", column.name().to_string()),
            &column,
            |b, column| {
                b.iter(|| typeset.infer_type(std::hint::black_box(column)));
            },
        );
    }

    group.finish();
}

fn bench_column_length_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_length_scaling");
    group.measurement_time(Duration::from_secs(8));

    let typeset = typeset(5);
    for rows in [10, 100, 1_000, 10_000] {
        let column = Column::new("numeric_text", (0..rows).map(|i| i.to_string()));
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &column, |b, column| {
            b.iter(|| typeset.infer_type(std::hint::black_box(column)));
        });
    }

    group.finish();
}

fn bench_profiling_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("profiling_series");

    let series = profiling_series();
    for threshold in [0, 2, 5] {
        let typeset = typeset(threshold);
        group.bench_with_input(
            BenchmarkId::new("threshold", threshold),
            &series,
            |b, series| {
                b.iter(|| typeset.infer_columns(std::hint::black_box(series)));
            },
        );
    }

    group.finish();
}

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");

    let typeset = typeset(5);
    let low_cardinality = Column::new("low_cardinality", (0..1000).map(|i| (i % 3) as i64));
    group.bench_function("numeric_to_categorical", |b| {
        b.iter(|| typeset.convert(std::hint::black_box(&low_cardinality), "Categorical"))
    });

    let flags = Column::new(
        "flags",
        (0..1000).map(|i| if i % 2 == 0 { "True" } else { "false" }),
    );
    group.bench_function("categorical_to_boolean", |b| {
        b.iter(|| typeset.convert(std::hint::black_box(&flags), "Boolean"))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_column_inference,
    bench_column_length_scaling,
    bench_profiling_series,
    bench_conversion
);
criterion_main!(benches);
