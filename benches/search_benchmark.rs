//! Benchmarks for tree generation, recurrence evaluation and breeding.

#![allow(missing_docs)] // Benchmark macros generate undocumented functions
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use seqgp::gp::{Evolution, EvolutionConfig, Generator, GeneratorConfig, compute_sequence};
use seqgp::{DEFAULT_TARGET, Node, Op, Tree, Var};

fn bench_generate(c: &mut Criterion) {
    let generator = Generator::new(GeneratorConfig::default()).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);

    c.bench_function("generate_tree", |b| {
        b.iter(|| black_box(generator.generate_tree(&mut rng)));
    });
}

fn bench_compute_sequence(c: &mut Criterion) {
    // XP + XPP * N
    let tree = Tree::new(Node::binary(
        Op::Add,
        Node::Var(Var::Xp),
        Node::binary(Op::Mul, Node::Var(Var::Xpp), Node::Var(Var::N)),
    ));

    c.bench_function("compute_sequence_64", |b| {
        b.iter(|| black_box(compute_sequence(black_box(&tree), 64, 1, 1)));
    });
}

fn bench_evolution_step(c: &mut Criterion) {
    let config = EvolutionConfig {
        seed: Some(42),
        max_generations: 0,
        tolerance: 0.0,
        ..Default::default()
    };
    let mut evolution = Evolution::new(&DEFAULT_TARGET, &config).unwrap();

    c.bench_function("evolution_step_256", |b| {
        b.iter(|| {
            evolution.step().unwrap();
            black_box(evolution.best().1)
        });
    });
}

criterion_group!(benches, bench_generate, bench_compute_sequence, bench_evolution_step);
criterion_main!(benches);
