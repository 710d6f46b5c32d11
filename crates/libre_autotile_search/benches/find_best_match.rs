//! Query cost of PatternSearcher::find_best_match as the corpus grows

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use libre_autotile_core::{AtlasRef, GridPos, Pattern, PatternEntry};
use libre_autotile_search::PatternSearcher;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn random_pattern(rng: &mut SmallRng) -> Pattern {
    Pattern::new(std::array::from_fn(|_| rng.gen_range(-1..8)))
}

fn corpus(size: usize, rng: &mut SmallRng) -> PatternSearcher {
    (0..size)
        .map(|i| {
            PatternEntry::new(
                random_pattern(rng),
                AtlasRef::new(GridPos::new(i as i32, 0), "bench.png"),
            )
        })
        .collect()
}

/// Misses the exact table, so every query goes through scoring
fn bench_scored_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_best_match");

    for size in [64usize, 1_000, 10_000] {
        let mut rng = SmallRng::seed_from_u64(8008);
        let searcher = corpus(size, &mut rng);
        let targets: Vec<Pattern> = (0..256).map(|_| random_pattern(&mut rng)).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &targets, |b, targets| {
            b.iter(|| {
                for target in targets {
                    black_box(searcher.find_best_match(black_box(target)));
                }
            });
        });
    }

    group.finish();
}

/// Every query hits the exact table
fn bench_exact_lookup(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(1);
    let searcher = corpus(1_000, &mut rng);
    let targets: Vec<Pattern> = searcher.entries().iter().map(|e| e.pattern).collect();

    c.bench_function("find_best_match_exact", |b| {
        b.iter(|| {
            for target in &targets {
                black_box(searcher.find_best_match(black_box(target)));
            }
        });
    });
}

criterion_group!(benches, bench_scored_lookup, bench_exact_lookup);
criterion_main!(benches);
