//! Swept-segment intersection predicate (narrow phase): given two segments
//! and a step length `dt`, classify what, if anything, happens between them
//! over the step.

use crate::geometry::{self, Vec2};
use crate::segment::Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectionKind {
    None,
    AlreadyIntersected,
    /// `l1`'s sweep is swallowed by / passes through `l2`'s side.
    L1WithL2,
    /// `l2`'s sweep is swallowed by / passes through `l1`'s side.
    L2WithL1,
}

fn rectangles_overlap(l1: &Segment, l2: &Segment) -> bool {
    l1.aabb_lo.x <= l2.aabb_hi.x
        && l1.aabb_hi.x >= l2.aabb_lo.x
        && l1.aabb_lo.y <= l2.aabb_hi.y
        && l1.aabb_hi.y >= l2.aabb_lo.y
}

/// Classifies the swept-pair relationship between `l1` and `l2` over one
/// step. Requires `l1.id < l2.id`; the caller canonicalizes.
pub fn classify(l1: &Segment, l2: &Segment) -> IntersectionKind {
    debug_assert!(l1.id < l2.id);

    if !rectangles_overlap(l1, l2) {
        return IntersectionKind::None;
    }

    if geometry::segments_intersect(l1.p1, l1.p2, l2.p1, l2.p2) {
        return IntersectionKind::AlreadyIntersected;
    }

    // Transform into l1's frame: p1'/p2' are l2's swept endpoints as seen
    // by an observer riding along with l1.
    let delta: Vec2 = l2.delta - l1.delta;
    let p1_other = l2.p1 + delta;
    let p2_other = l2.p2 + delta;

    let mut num_crossings = 0;
    let mut top_intersected = false;
    let mut bot_intersected = false;

    if geometry::segments_intersect(l1.p1, l1.p2, p1_other, p2_other) {
        num_crossings += 1;
    }
    if geometry::segments_intersect(l1.p1, l1.p2, p1_other, l2.p1) {
        num_crossings += 1;
        top_intersected = true;
    }
    if geometry::segments_intersect(l1.p1, l1.p2, p2_other, l2.p2) {
        num_crossings += 1;
        bot_intersected = true;
    }

    if num_crossings == 2 {
        return IntersectionKind::L2WithL1;
    }

    if geometry::point_in_parallelogram(l1.p1, l2.p1, l2.p2, p1_other, p2_other)
        && geometry::point_in_parallelogram(l1.p2, l2.p1, l2.p2, p1_other, p2_other)
    {
        return IntersectionKind::L1WithL2;
    }

    if num_crossings == 0 {
        return IntersectionKind::None;
    }

    let v1 = l1.p2 - l1.p1;
    let v2 = l2.p2 - l2.p1;
    let angle = geometry::signed_angle(v1, v2);

    if (top_intersected && angle < 0.0) || (bot_intersected && angle > 0.0) {
        IntersectionKind::L2WithL1
    } else {
        IntersectionKind::L1WithL2
    }
}
