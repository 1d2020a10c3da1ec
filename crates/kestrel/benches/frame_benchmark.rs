//! # Frame Benchmark
//!
//! Measures a full game frame with many moving colliders, where the pairwise
//! collision sweep dominates.
//!
//! Run with: `cargo bench --package kestrel --bench frame_benchmark`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kestrel::components::{BoxCollider, RigidBody, Sprite, Transform, Vec2};
use kestrel::{Game, GameConfig};

fn crowded_game(count: usize) -> Game {
    let mut game = Game::new(GameConfig::default());
    game.load_level().unwrap();
    let registry = game.registry_mut();
    for i in 0..count {
        // Spread on a grid wide enough that nothing overlaps.
        let x = (i % 50) as f64 * 64.0;
        let y = (i / 50) as f64 * 64.0 + 200.0;
        let entity = registry.create_entity();
        registry
            .entity_mut(entity)
            .add_component(Transform::at(Vec2::new(x, y)))
            .unwrap()
            .add_component(RigidBody::new(Vec2::new(1.0, 0.0)))
            .unwrap()
            .add_component(Sprite::new("tank-image", 32.0, 32.0, 2))
            .unwrap()
            .add_component(BoxCollider::new(16.0, 16.0))
            .unwrap();
    }
    game.frame(0.0).unwrap();
    game
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");

    for count in [100, 500, 1_000] {
        group.bench_with_input(BenchmarkId::new("colliders", count), &count, |b, &count| {
            let mut game = crowded_game(count);
            b.iter(|| black_box(game.frame(black_box(0.016)).unwrap()));
        });
    }

    group.finish();
}

fn bench_render_order(c: &mut Criterion) {
    let game = crowded_game(1_000);
    c.bench_function("render_order_1000", |b| {
        b.iter(|| black_box(game.render_order().unwrap()));
    });
}

criterion_group!(benches, bench_frame, bench_render_order);
criterion_main!(benches);
