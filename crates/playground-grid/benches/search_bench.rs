//! Benchmarks for the grid search engine.
//!
//! Measures each algorithm on:
//! - an open grid (best case for A*)
//! - a seeded random maze at the default 30% wall density

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use playground_grid::{generate_maze, search, Algorithm, Grid, GridConfig, MazeConfig};

/// Benchmark every algorithm on the default open grid
fn bench_open_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_grid");
    let grid = Grid::new(&GridConfig::default()).expect("default config is valid");

    for algorithm in Algorithm::ALL {
        group.throughput(Throughput::Elements(grid.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(algorithm), &algorithm, |b, &alg| {
            b.iter(|| {
                let mut g = grid.clone();
                search(black_box(&mut g), alg)
            })
        });
    }
    group.finish();
}

/// Benchmark every algorithm on seeded random mazes
fn bench_maze(c: &mut Criterion) {
    let mut group = c.benchmark_group("maze");

    for seed in [1u64, 7, 42] {
        let maze = generate_maze(&GridConfig::maze(), &MazeConfig { density: 0.3, seed })
            .expect("maze config is valid");
        for algorithm in Algorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), seed),
                &algorithm,
                |b, &alg| {
                    b.iter(|| {
                        let mut g = maze.clone();
                        search(black_box(&mut g), alg)
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_open_grid, bench_maze);
criterion_main!(benches);
