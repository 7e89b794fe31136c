//! Tunable knobs for a [`crate::world::World`]: box bounds, time step, and
//! quadtree constants, gathered into a single config struct instead of
//! hardcoded constants.

use crate::geometry::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// Lower corner of the confining box.
    pub box_lo: Vec2,
    /// Upper corner of the confining box.
    pub box_hi: Vec2,
    /// Length of one simulation step, in box-coordinates per step.
    pub dt: f64,
    /// Quadtree node subdivides once its stored-segment count exceeds this.
    pub quad_n_max: usize,
    /// Quadtree recursion depth cap.
    pub quad_max_depth: u32,
    /// Detection recurses into a node's four children in parallel once the
    /// combined ancestor-overflow-list and node-list size exceeds this.
    pub parallel_threshold: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            box_lo: Vec2::new(0.5, 0.5),
            box_hi: Vec2::new(1.0, 1.0),
            dt: 0.5,
            quad_n_max: 64,
            quad_max_depth: 8,
            parallel_threshold: 64,
        }
    }
}
