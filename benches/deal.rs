//! Benchmarks for dealing and snapshotting boards.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use memory_match::cards::{shuffle, Board, DeckGenerator};
use memory_match::core::{DealId, GameRng, GridSize};
use std::hint::black_box;

// =============================================================================
// Deck Generation
// =============================================================================

fn benchmark_generate(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("generate");
    let generator = DeckGenerator::new(8);

    for side in [2u16, 4, 8, 16] {
        let grid = GridSize::new(side, side);
        group.bench_with_input(BenchmarkId::new("square", side), &grid, |bencher, &grid| {
            let mut rng = GameRng::new(42);
            bencher.iter(|| black_box(generator.generate(black_box(grid), &mut rng)));
        });
    }

    group.finish();
}

fn benchmark_shuffle(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("shuffle");

    for size in [16usize, 256, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, &size| {
            let mut rng = GameRng::new(7);
            let mut items: Vec<usize> = (0..size).collect();
            bencher.iter(|| {
                shuffle(&mut items, &mut rng);
                black_box(items.first().copied())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Board Snapshot
// =============================================================================

fn benchmark_snapshot(criterion: &mut Criterion) {
    let grid = GridSize::new(16, 16);
    let faces = DeckGenerator::new(32).generate(grid, &mut GameRng::new(1));
    let board = Board::deal(DealId(1), grid, &faces);

    criterion.bench_function("snapshot_16x16", |bencher| {
        bencher.iter(|| black_box(board.snapshot()));
    });
}

criterion_group!(benches, benchmark_generate, benchmark_shuffle, benchmark_snapshot);
criterion_main!(benches);
