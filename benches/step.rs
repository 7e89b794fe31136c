use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;

use swept_collider::testutil::{self, ShortSegments};
use swept_collider::{World, WorldConfig};

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");
    for &n in &[100usize, 1_000, 5_000] {
        group.bench_function(format!("n={n}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
                    let mut world = World::new(n, WorldConfig::default());
                    testutil::populate::<ShortSegments>(&mut world, n, &mut rng);
                    world
                },
                |mut world| world.step(),
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
