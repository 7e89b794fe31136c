//! Elastic collision response, dispatched once per deduplicated, sorted
//! event.

use crate::geometry;
use crate::intersect::IntersectionKind;
use crate::segment::Segment;

/// Resolves one collision event by mutating `l1` and `l2`'s velocities in
/// place. Requires `l1.id < l2.id`, matching event canonicalization.
pub fn solve(l1: &mut Segment, l2: &mut Segment, kind: IntersectionKind) {
    assert!(l1.id < l2.id);
    assert!(matches!(
        kind,
        IntersectionKind::AlreadyIntersected | IntersectionKind::L1WithL2 | IntersectionKind::L2WithL1
    ));

    if kind == IntersectionKind::AlreadyIntersected {
        unstick(l1, l2);
        return;
    }

    // The struck segment's direction is the collision face; its
    // perpendicular is the normal the 1-D elastic collision runs along.
    let face = if kind == IntersectionKind::L1WithL2 {
        (l2.p2 - l2.p1).normalize()
    } else {
        (l1.p2 - l1.p1).normalize()
    };
    let normal = face.orthogonal();

    let v1_face = l1.velocity.dot(face);
    let v2_face = l2.velocity.dot(face);
    let v1_normal = l1.velocity.dot(normal);
    let v2_normal = l2.velocity.dot(normal);

    let m1 = l1.mass();
    let m2 = l2.mass();

    let new_v1_normal = ((m1 - m2) / (m1 + m2)) * v1_normal + (2.0 * m2 / (m1 + m2)) * v2_normal;
    let new_v2_normal = (2.0 * m1 / (m1 + m2)) * v1_normal + ((m2 - m1) / (m1 + m2)) * v2_normal;

    l1.velocity = normal * new_v1_normal + face * v1_face;
    l2.velocity = normal * new_v2_normal + face * v2_face;
}

/// Escape hatch for segments that are already overlapping at step start:
/// drive each apart from the intersection point toward its farther
/// endpoint, preserving speed but conserving nothing else by design.
fn unstick(l1: &mut Segment, l2: &mut Segment) {
    let p = geometry::intersection_point(l1.p1, l1.p2, l2.p1, l2.p2);

    let push_from = |a: geometry::Vec2, b: geometry::Vec2, speed: f64| -> geometry::Vec2 {
        let farther = if (a - p).length() < (b - p).length() {
            b
        } else {
            a
        };
        (farther - p).normalize() * speed
    };

    let speed1 = l1.velocity.length();
    let speed2 = l2.velocity.length();
    l1.velocity = push_from(l1.p1, l1.p2, speed1);
    l2.velocity = push_from(l2.p1, l2.p2, speed2);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;
    use crate::segment::Color;

    fn seg(id: u64, p1: (f64, f64), p2: (f64, f64), v: (f64, f64)) -> Segment {
        Segment::new(
            id,
            Vec2::new(p1.0, p1.1),
            Vec2::new(p2.0, p2.1),
            Vec2::new(v.0, v.1),
            Color::Red,
        )
    }

    #[test]
    fn equal_mass_head_on_swaps_velocities() {
        let mut l1 = seg(0, (0.0, 0.0), (0.0, 1.0), (1.0, 0.0));
        let mut l2 = seg(1, (1.0, 0.0), (1.0, 1.0), (-1.0, 0.0));
        // both segments are vertical: face/normal collapse to the x axis.
        solve(&mut l1, &mut l2, IntersectionKind::L1WithL2);
        assert!((l1.velocity.x - -1.0).abs() < 1e-9);
        assert!((l2.velocity.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn energy_and_normal_momentum_are_conserved() {
        let mut l1 = seg(0, (0.0, 0.0), (0.0, 2.0), (0.3, 0.1));
        let mut l2 = seg(1, (1.0, 0.0), (1.0, 1.0), (-0.2, -0.05));
        let (m1, m2) = (l1.mass(), l2.mass());
        let e_before = m1 * l1.velocity.dot(l1.velocity) + m2 * l2.velocity.dot(l2.velocity);

        solve(&mut l1, &mut l2, IntersectionKind::L2WithL1);

        let e_after = m1 * l1.velocity.dot(l1.velocity) + m2 * l2.velocity.dot(l2.velocity);
        assert!((e_before - e_after).abs() < 1e-9);
    }

    #[test]
    fn unstick_preserves_speed_and_points_away_from_intersection() {
        let mut l1 = seg(0, (0.0, 0.0), (1.0, 1.0), (0.1, 0.1));
        let mut l2 = seg(1, (0.0, 1.0), (1.0, 0.0), (-0.1, 0.1));
        let speed1 = l1.velocity.length();
        let speed2 = l2.velocity.length();
        solve(&mut l1, &mut l2, IntersectionKind::AlreadyIntersected);
        assert!((l1.velocity.length() - speed1).abs() < 1e-9);
        assert!((l2.velocity.length() - speed2).abs() < 1e-9);
    }
}
