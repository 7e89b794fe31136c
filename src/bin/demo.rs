//! Headless demo runner: populates a world with random segments and steps
//! it, logging the running collision counters. No rendering; progress is
//! reported through `log` instead of pixels.

use rand::SeedableRng;
use swept_collider::testutil::{self, ShortSegments};
use swept_collider::{World, WorldConfig};

fn main() {
    env_logger::init();

    let n = 1000;
    let steps = 200;
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);

    let mut world = World::new(n, WorldConfig::default());
    testutil::populate::<ShortSegments>(&mut world, n, &mut rng);

    let start = std::time::Instant::now();
    for step in 0..steps {
        world.step();
        if step % 20 == 0 {
            log::info!(
                "step {step}: line_line={} wall={}",
                world.line_line_count(),
                world.wall_count()
            );
        }
    }
    let elapsed = start.elapsed();

    println!(
        "{steps} steps over {} segments in {elapsed:.2?}: {} line-line, {} wall collisions",
        world.len(),
        world.line_line_count(),
        world.wall_count()
    );
}
