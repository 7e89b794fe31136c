//! Two-dimensional vector arithmetic and the geometric predicates the
//! intersection pipeline is built on.
//!
//! The vector type itself is a trusted primitive; what matters here is
//! getting the side test and parallelogram test polarity exactly right,
//! since the quadtree's straddle classification and the predicate's
//! crossing count both depend on it.

use std::ops;

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize(self) -> Vec2 {
        let len = self.length();
        Vec2::new(self.x / len, self.y / len)
    }

    pub fn dot(self, rhs: Vec2) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Rotates the vector 90 degrees; used to turn a collision face into its
    /// normal.
    pub fn orthogonal(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }
}

impl ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl ops::Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

// scalar-vector multiplication is commutative
impl ops::Mul<Vec2> for f64 {
    type Output = Vec2;
    fn mul(self, rhs: Vec2) -> Vec2 {
        rhs * self
    }
}

pub fn cross2d(v: Vec2, w: Vec2) -> f64 {
    v.x * w.y - v.y * w.x
}

/// Signed area test: which side of line `E->F` does `P` lie on.
///
/// Uses the `>= 0` convention throughout the predicate; the quadtree's
/// quadrant classifier instead uses a strict `>` so that a segment lying
/// exactly on a midline is kept at the parent rather than pushed to a child.
pub fn which_side(e: Vec2, f: Vec2, p: Vec2) -> bool {
    (f.x - e.x) * (p.y - f.y) - (f.y - e.y) * (p.x - f.x) >= 0.0
}

/// Do segments `(p1,p2)` and `(p3,p4)` cross?
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    which_side(p1, p2, p3) != which_side(p1, p2, p4)
        && which_side(p3, p4, p1) != which_side(p3, p4, p2)
}

/// Intersection point of two (assumed-crossing) infinite lines through the
/// given segment endpoints.
pub fn intersection_point(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Vec2 {
    let u = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x))
        / ((p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y));
    p1 + (p2 - p1) * u
}

fn direction(pi: Vec2, pj: Vec2, pk: Vec2) -> f64 {
    cross2d(pk - pi, pj - pi)
}

/// Is `point` inside the (possibly self-crossing) quadrilateral
/// `p1 p2 p3 p4` formed by a swept parallelogram's two long edges and two
/// short edges?
pub fn point_in_parallelogram(point: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let d1 = direction(p1, p2, point);
    let d2 = direction(p3, p4, point);
    let d3 = direction(p1, p3, point);
    let d4 = direction(p2, p4, point);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}

/// Signed angle (via cross/dot) between two vectors; used only for its
/// sign, to disambiguate the single-crossing case in the predicate.
pub fn signed_angle(v1: Vec2, v2: Vec2) -> f64 {
    cross2d(v1, v2).atan2(v1.dot(v2))
}
