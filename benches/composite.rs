use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use ferrous_dispose::*;

// ===== Micro Benchmarks =====

fn bench_add(c: &mut Criterion) {
    let composite = CompositeDisposable::new();
    let item = disposable::empty();

    c.bench_function("composite_add", |b| {
        b.iter(|| {
            composite.add(item.clone()).unwrap();
        })
    });
}

fn bench_count(c: &mut Criterion) {
    let composite = CompositeDisposable::from_members((0..64).map(|_| disposable::empty() as SharedDisposable));

    c.bench_function("composite_count", |b| {
        b.iter(|| black_box(composite.count().unwrap()))
    });
}

fn bench_iter_cached(c: &mut Criterion) {
    let composite = CompositeDisposable::from_members((0..64).map(|_| disposable::empty() as SharedDisposable));
    let _ = composite.iter().unwrap();

    c.bench_function("composite_iter_cached", |b| {
        b.iter(|| black_box(composite.iter().unwrap().len()))
    });
}

fn bench_leaf_dispose(c: &mut Criterion) {
    c.bench_function("action_dispose", |b| {
        b.iter_batched(
            || disposable::create(|| {}),
            |d| d.dispose().unwrap(),
            BatchSize::SmallInput,
        )
    });
}

fn bench_composite_dispose(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite_dispose");
    for size in [1usize, 16, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let composite = CompositeDisposable::with_capacity(size);
                    for _ in 0..size {
                        composite.add(disposable::create(|| {})).unwrap();
                    }
                    composite
                },
                |composite| composite.dispose().unwrap(),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_add,
    bench_count,
    bench_iter_cached,
    bench_leaf_dispose,
    bench_composite_dispose
);
criterion_main!(benches);
