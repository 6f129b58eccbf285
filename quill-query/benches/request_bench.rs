//! Benchmarks for value formatting and request assembly.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quill_query::{
    FieldPath, FilterNode, Formatter, ObjectField, ParameterSet, Request, Value, combine,
};
use std::hint::black_box;

/// A flat object with `width` text fields.
fn create_object(width: usize) -> Value {
    let fields = (0..width)
        .map(|i| {
            let path = FieldPath::parse(format!(".field{}.value", i)).unwrap_or_else(|e| {
                panic!("bench path rejected: {}", e);
            });
            ObjectField::new(path, Value::Text(format!("value \"{}\"", i)))
        })
        .collect();
    Value::Object(fields)
}

/// A sequence nested `depth` levels deep.
fn create_nested(depth: usize) -> Value {
    (0..depth).fold(Value::from(42), |inner, _| Value::Sequence(vec![inner]))
}

fn create_params(count: usize) -> ParameterSet {
    let mut params = ParameterSet::with_capacity(count);
    for i in 0..count {
        params
            .insert(format!("p{}", i), i as i64)
            .unwrap_or_else(|e| panic!("duplicate bench key: {}", e));
    }
    params
}

fn bench_format_object(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_object");
    let formatter = Formatter::new();

    for width in [1, 10, 100] {
        let value = create_object(width);
        group.throughput(Throughput::Elements(width as u64));
        group.bench_with_input(BenchmarkId::from_parameter(width), &value, |b, value| {
            b.iter(|| formatter.format(black_box(value), 0))
        });
    }

    group.finish();
}

fn bench_format_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_nested");
    let formatter = Formatter::new();

    for depth in [5, 10, 20] {
        let value = create_nested(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &value, |b, value| {
            b.iter(|| formatter.format(black_box(value), 0))
        });
    }

    group.finish();
}

fn bench_build_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_request");

    for count in [0, 5, 50] {
        let params = create_params(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &params, |b, params| {
            b.iter(|| {
                Request::query("vvList")
                    .parameters(black_box(params.clone()))
                    .fields(["uuid", "location", "spu{serial}"])
                    .build()
            })
        });
    }

    group.finish();
}

#[derive(Clone, Default)]
struct BenchFilter {
    and: Option<Box<BenchFilter>>,
}

impl FilterNode for BenchFilter {
    fn and(&self) -> Option<&Self> {
        self.and.as_deref()
    }

    fn with_and(mut self, next: Self) -> Self {
        self.and = Some(Box::new(next));
        self
    }
}

fn bench_combine_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine_filters");

    for count in [2, 10, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| combine(vec![BenchFilter::default(); count]).map(|f| f.chain_len()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_format_object,
    bench_format_nested,
    bench_build_request,
    bench_combine_filters
);
criterion_main!(benches);
