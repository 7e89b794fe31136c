//! A moving line segment and its per-step swept cache.

use crate::geometry::Vec2;

/// Unique, immutable, totally-ordered identifier assigned at creation.
/// ID ordering is the canonical tie-break for any pair of segments.
pub type SegmentId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Gray,
}

#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub id: SegmentId,
    pub p1: Vec2,
    pub p2: Vec2,
    pub velocity: Vec2,
    pub color: Color,

    /// `p1 + velocity * dt`, cached for the current step.
    pub p3: Vec2,
    /// `p2 + velocity * dt`, cached for the current step.
    pub p4: Vec2,
    /// `velocity * dt`, cached for the current step.
    pub delta: Vec2,

    pub aabb_lo: Vec2,
    pub aabb_hi: Vec2,
}

impl Segment {
    pub fn new(id: SegmentId, p1: Vec2, p2: Vec2, velocity: Vec2, color: Color) -> Self {
        let mut s = Segment {
            id,
            p1,
            p2,
            velocity,
            color,
            p3: p1,
            p4: p2,
            delta: Vec2::default(),
            aabb_lo: Vec2::default(),
            aabb_hi: Vec2::default(),
        };
        s.update_swept_cache(0.0);
        s
    }

    /// `|p2 - p1|`, the solver's mass term. Non-zero is guaranteed by
    /// `World::add_segment` rejecting degenerate segments at construction.
    pub fn mass(&self) -> f64 {
        (self.p2 - self.p1).length()
    }

    /// Recomputes `p3`, `p4`, `delta`, and the swept AABB from the current
    /// `p1`, `p2`, `velocity` for a step of length `dt`. Must be called once
    /// per step before this segment takes part in detection.
    pub fn update_swept_cache(&mut self, dt: f64) {
        self.delta = self.velocity * dt;
        self.p3 = self.p1 + self.delta;
        self.p4 = self.p2 + self.delta;

        let xs = [self.p1.x, self.p2.x, self.p3.x, self.p4.x];
        let ys = [self.p1.y, self.p2.y, self.p3.y, self.p4.y];
        self.aabb_lo = Vec2::new(
            xs.iter().cloned().fold(f64::INFINITY, f64::min),
            ys.iter().cloned().fold(f64::INFINITY, f64::min),
        );
        self.aabb_hi = Vec2::new(
            xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        );
    }
}
