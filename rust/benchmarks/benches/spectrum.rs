use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use num_bigint::BigUint;
use rand::Rng;

use prime_graph::{fast_graph, prime_graph};
use semisimple::{Parity, SemisimpleElements, UniformSign};
use spectrum_core::numeric::sort_and_filter;
use spectrum_core::{BoundedSets, FieldPowerCache, Integer, Partitions, SetMode};

fn bench_partitions(c: &mut Criterion) {
    let mut group = c.benchmark_group("partitions");

    for n in [20u32, 30, 40] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| Partitions::new(n).map(|p| p.count()).unwrap_or(0));
        });
    }

    group.finish();
}

fn bench_bounded_sets(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_sets");

    for (name, mode) in [("all", SetMode::All), ("maximal", SetMode::Maximal), ("full", SetMode::Full)] {
        group.bench_with_input(BenchmarkId::new(name, 40), &mode, |b, &mode| {
            b.iter(|| BoundedSets::new(40, mode).count());
        });
    }

    group.finish();
}

fn bench_semisimple(c: &mut Criterion) {
    let mut group = c.benchmark_group("semisimple");
    group.sample_size(10);

    for n in [6u32, 9, 12] {
        group.bench_with_input(BenchmarkId::new("general", n), &n, |b, &n| {
            b.iter(|| SemisimpleElements::new(9, n).iter().count());
        });
        group.bench_with_input(BenchmarkId::new("parity", n), &n, |b, &n| {
            b.iter(|| SemisimpleElements::new(9, n).parity(Parity::Even).iter().count());
        });
        group.bench_with_input(BenchmarkId::new("unitary", n), &n, |b, &n| {
            b.iter(|| SemisimpleElements::new(9, n).sign(UniformSign::Unitary).iter().count());
        });
    }

    group.bench_function("general_replay_12", |b| {
        let mut elements = SemisimpleElements::new(9, 12);
        elements.iter().for_each(drop);
        b.iter(|| elements.iter().count());
    });

    group.finish();
}

fn bench_factorization(c: &mut Criterion) {
    let mut group = c.benchmark_group("factorization");
    let mut rng = rand::thread_rng();

    let values: Vec<u64> = (0..32).map(|_| rng.gen_range(1_000_000..100_000_000)).collect();
    group.bench_function("integer_factorize", |b| {
        b.iter(|| {
            values
                .iter()
                .map(|&v| Integer::new(v).factorize().len())
                .sum::<usize>()
        });
    });

    group.bench_function("field_power_cache", |b| {
        b.iter(|| {
            let mut cache = FieldPowerCache::new();
            cache.min_covering_power(3, 4, &[2, 3, 5, 7, 13, 41])
        });
    });

    group.finish();
}

fn bench_prime_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("prime_graph");
    group.sample_size(10);

    let values: Vec<BigUint> = SemisimpleElements::new(5, 8)
        .iter()
        .map(|e| e.into_value())
        .collect();
    let apex = sort_and_filter(values, true);

    group.bench_function("factorize", |b| {
        b.iter(|| prime_graph(&apex).len());
    });
    group.bench_function("fast", |b| {
        b.iter(|| fast_graph(&apex).len());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_partitions,
    bench_bounded_sets,
    bench_semisimple,
    bench_factorization,
    bench_prime_graph
);
criterion_main!(benches);
