//! Benchmarks for recording sort steps.
//!
//! Uses seeded random arrays at the page size (50) and a larger size to show
//! the quadratic algorithms pulling away.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use playground_sort::{random_array, sort_steps, SortAlgorithm, SortConfig};

fn bench_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_steps");

    for size in [50usize, 500] {
        let config = SortConfig { size, ..SortConfig::default() };
        let mut rng = StdRng::seed_from_u64(config.seed);
        let input = random_array(&config, &mut rng).expect("default range is non-empty");

        for algorithm in SortAlgorithm::ALL {
            group.bench_with_input(BenchmarkId::new(algorithm.name(), size), &input, |b, input| {
                b.iter(|| sort_steps(algorithm, black_box(input)))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_record);
criterion_main!(benches);
