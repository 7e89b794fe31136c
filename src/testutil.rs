//! Random segment generators for tests, benches, and the demo binary.
//!
//! A trait implemented by marker types, driven by a free function with an
//! injected RNG, producing segments with velocities confined to the
//! world's box.

use rand::Rng;

use crate::config::WorldConfig;
use crate::geometry::Vec2;
use crate::segment::Color;
use crate::world::World;

pub trait SegmentGenerator {
    fn segment(config: &WorldConfig, rng: &mut impl Rng) -> (Vec2, Vec2, Vec2, Color);
}

/// Short segments (length <= 0.1 * box width) scattered anywhere in the
/// box, with a small random velocity.
pub struct ShortSegments;

impl SegmentGenerator for ShortSegments {
    fn segment(config: &WorldConfig, rng: &mut impl Rng) -> (Vec2, Vec2, Vec2, Color) {
        let width = config.box_hi.x - config.box_lo.x;
        let height = config.box_hi.y - config.box_lo.y;

        let p1 = Vec2::new(
            rng.gen_range(config.box_lo.x..config.box_hi.x),
            rng.gen_range(config.box_lo.y..config.box_hi.y),
        );
        let len = rng.gen_range((width.min(height) * 0.01)..(width.min(height) * 0.1));
        let theta = rng.gen_range(0.0..std::f64::consts::TAU);
        let p2 = Vec2::new(p1.x + len * theta.cos(), p1.y + len * theta.sin());

        let speed = rng.gen_range(0.0..(width.min(height) * 0.2));
        let vtheta = rng.gen_range(0.0..std::f64::consts::TAU);
        let velocity = Vec2::new(speed * vtheta.cos(), speed * vtheta.sin());

        let color = if rng.gen_bool(0.5) {
            Color::Red
        } else {
            Color::Gray
        };

        (p1, p2, velocity, color)
    }
}

/// Populates `world` with `n` segments generated by `G`, skipping the
/// vanishingly unlikely zero-length draw rather than retrying forever.
pub fn populate<G: SegmentGenerator>(world: &mut World, n: usize, rng: &mut impl Rng) {
    let config = *world.config();
    for _ in 0..n {
        let (p1, p2, velocity, color) = G::segment(&config, rng);
        let _ = world.add_segment(p1, p2, velocity, color);
    }
}
