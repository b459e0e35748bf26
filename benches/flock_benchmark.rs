/*
 * Flock Benchmark
 *
 * Measures the cost of a single tick (the full O(n^2) neighbour scan) at
 * several flock sizes, sequential against parallel, and the cost of spawning.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use flocking::{Boid, Bounds, FlockParams, FlockWorld};

fn world_with(count: usize, parallel: bool) -> FlockWorld {
    let mut params = FlockParams::default();
    params.spawn_count = count;
    params.seed = Some(7);
    params.parallel = parallel;
    FlockWorld::from_params(&params).expect("benchmark params are valid")
}

// Benchmark one tick of the whole flock
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for num_boids in [10, 100, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("sequential", num_boids), num_boids, |b, &n| {
            let mut world = world_with(n, false);
            b.iter(|| {
                world.tick();
                black_box(world.tick_count());
            });
        });

        group.bench_with_input(BenchmarkId::new("parallel", num_boids), num_boids, |b, &n| {
            let mut world = world_with(n, true);
            b.iter(|| {
                world.tick();
                black_box(world.tick_count());
            });
        });
    }

    group.finish();
}

// Benchmark spawning a fresh flock
fn bench_spawn(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn");
    let bounds = Bounds::new(glam::Vec3::ZERO, 10.0);

    for num_boids in [100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), num_boids, |b, &n| {
            let mut rng = StdRng::seed_from_u64(11);
            b.iter(|| black_box(FlockWorld::spawn(n, &bounds, &mut rng, Boid::default)));
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_tick, bench_spawn
}
criterion_main!(benches);
