//! Performance benchmarks for urilex
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Path reduction on already-reduced and dotted paths
//! - Reference resolution through chains of parts
//! - Relative reference computation
//! - Common base directory over many files

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use urilex::{compute_common_base_directory, reduce_path, relative_uri_fragment, resolve_uri, Uri};

fn bench_reduce_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce_path");

    group.bench_function("already_reduced", |b| {
        b.iter(|| reduce_path(black_box("/C:/Users/dev/project/src/lib/index.js")).unwrap())
    });

    group.bench_function("dotted", |b| {
        b.iter(|| reduce_path(black_box("/c%3a/Users/dev/./project/src/../lib/./index.js")).unwrap())
    });

    group.bench_function("backslashes", |b| {
        b.iter(|| reduce_path(black_box("c:\\Users\\dev\\project\\..\\lib\\index.js")).unwrap())
    });

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_uri");
    let base = Uri::parse("file:///home/dev/project/src/").unwrap();

    for depth in [1usize, 4, 16] {
        let parts: Vec<String> = (0..depth).map(|i| format!("../dir{}/file.js", i)).collect();
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(BenchmarkId::new("chain", depth), &parts, |b, parts| {
            b.iter(|| resolve_uri(black_box(&base), parts).unwrap())
        });
    }

    group.finish();
}

fn bench_relative(c: &mut Criterion) {
    let from = Uri::parse("file:///home/dev/project/src/lib/a/b/c.js").unwrap();
    let to = Uri::parse("file:///home/dev/project/test/fixtures/d.js").unwrap();

    c.bench_function("relative_uri_fragment", |b| {
        b.iter(|| relative_uri_fragment(black_box(&from), black_box(&to)))
    });
}

fn bench_common_base(c: &mut Criterion) {
    let mut group = c.benchmark_group("common_base_directory");

    for count in [10usize, 100, 1000] {
        let uris: Vec<Uri> = (0..count)
            .map(|i| Uri::parse(&format!("file:///home/dev/project/src/mod{}/file{}.js", i % 7, i)).unwrap())
            .collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &uris, |b, uris| {
            b.iter(|| compute_common_base_directory(black_box(uris)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_reduce_path,
    bench_resolve,
    bench_relative,
    bench_common_base
);
criterion_main!(benches);
