//! Integration-level property tests for the world's invariants, plus a
//! couple of end-to-end scenario checks.

use proptest::prelude::*;
use rand::SeedableRng;

use swept_collider::testutil::{self, ShortSegments};
use swept_collider::{Color, Vec2, World, WorldConfig};

fn arb_world(n: usize, seed: u64) -> World {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut world = World::new(n.max(1), WorldConfig::default());
    testutil::populate::<ShortSegments>(&mut world, n, &mut rng);
    world
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// `line_line_count` only ever grows: it's a running total of
    /// dispatched pair collisions, never reset or decremented.
    #[test]
    fn line_line_count_is_monotone(seed in any::<u64>(), n in 2usize..40) {
        let mut world = arb_world(n, seed);
        let mut previous = world.line_line_count();
        for _ in 0..10 {
            world.step();
            let current = world.line_line_count();
            prop_assert!(current >= previous);
            previous = current;
        }
    }

    /// After `step()`, no segment endpoint sits outside the box with
    /// velocity still pointing outward along that axis.
    #[test]
    fn wall_reflection_leaves_no_outward_escaping_velocity(seed in any::<u64>(), n in 2usize..40) {
        let mut world = arb_world(n, seed);
        for _ in 0..10 {
            world.step();
        }
        let config = *world.config();
        for i in 0..world.len() {
            let s = world.get_segment(i).unwrap();
            if (s.p1.x > config.box_hi.x || s.p2.x > config.box_hi.x) {
                prop_assert!(s.velocity.x <= 0.0);
            }
            if (s.p1.x < config.box_lo.x || s.p2.x < config.box_lo.x) {
                prop_assert!(s.velocity.x >= 0.0);
            }
            if (s.p1.y > config.box_hi.y || s.p2.y > config.box_hi.y) {
                prop_assert!(s.velocity.y <= 0.0);
            }
            if (s.p1.y < config.box_lo.y || s.p2.y < config.box_lo.y) {
                prop_assert!(s.velocity.y >= 0.0);
            }
        }
    }
}

#[test]
fn no_contact_scenario_advances_positions_without_change_in_velocity() {
    let mut world = World::new(2, WorldConfig::default());
    let v1 = Vec2::new(0.01, 0.0);
    let v2 = Vec2::new(0.0, 0.01);
    world
        .add_segment(Vec2::new(0.51, 0.51), Vec2::new(0.52, 0.51), v1, Color::Red)
        .unwrap();
    world
        .add_segment(Vec2::new(0.97, 0.97), Vec2::new(0.98, 0.97), v2, Color::Gray)
        .unwrap();

    world.step();

    assert_eq!(world.line_line_count(), 0);
    assert_eq!(world.wall_count(), 0);
    let s0 = world.get_segment(0).unwrap();
    assert!((s0.p1.x - (0.51 + 0.01 * 0.5)).abs() < 1e-9);
    assert!((s0.velocity.x - 0.01).abs() < 1e-9);
}

#[test]
fn dense_cluster_events_stay_within_their_quadrant() {
    // 500 short segments restricted to the NW quadrant [0.5,0.75]^2; no
    // event should ever involve a segment whose id falls outside this
    // generated set, and by construction every segment here has its swept
    // AABB inside x<=0.75, so no cross-quadrant leakage is possible by
    // the rectangles-overlap reject alone.
    let config = WorldConfig::default();
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let mut world = World::new(500, config);
    let quad_lo = config.box_lo;
    let quad_hi = Vec2::new(
        (config.box_lo.x + config.box_hi.x) * 0.5,
        (config.box_lo.y + config.box_hi.y) * 0.5,
    );
    for _ in 0..500 {
        use rand::Rng;
        let p1 = Vec2::new(
            rng.gen_range(quad_lo.x..quad_hi.x),
            rng.gen_range(quad_lo.y..quad_hi.y),
        );
        let p2 = Vec2::new(p1.x + 0.01, p1.y);
        let _ = world.add_segment(p1, p2, Vec2::new(0.0, 0.0), Color::Red);
    }

    world.step();

    for i in 0..world.len() {
        let s = world.get_segment(i).unwrap();
        assert!(s.aabb_hi.x <= quad_hi.x + 1e-9);
        assert!(s.aabb_hi.y <= quad_hi.y + 1e-9);
    }
}
