//! The broad-phase spatial index: a quadtree built fresh every step from
//! segments' swept parallelograms, used to cut the O(N^2) pairwise test down
//! to candidate pairs sharing a region.
//!
//! Every segment is stored at exactly one node: the deepest one whose
//! region fully contains its swept parallelogram. A segment whose sweep
//! straddles a node's midlines stays at that node rather than descending
//! further. Detection threads an explicit "ancestor overflow list" down the
//! recursion instead of keeping parent back-pointers, so a node's segments
//! can be tested against every ancestor's without any node needing to know
//! its parent.

use crate::config::WorldConfig;
use crate::events::EventList;
use crate::geometry::Vec2;
use crate::intersect::{self, IntersectionKind};
use crate::segment::Segment;

struct Node {
    lo: Vec2,
    hi: Vec2,
    /// Indices into the caller's segment slice stored at this node: either
    /// straddlers (if this node has children) or the whole leaf contents.
    items: Vec<usize>,
    children: Option<Box<[Node; 4]>>,
}

impl Node {
    fn new(lo: Vec2, hi: Vec2) -> Self {
        Node {
            lo,
            hi,
            items: Vec::new(),
            children: None,
        }
    }

    fn mid(&self) -> Vec2 {
        Vec2::new((self.lo.x + self.hi.x) * 0.5, (self.lo.y + self.hi.y) * 0.5)
    }

    fn build(&mut self, segments: &[Segment], config: &WorldConfig, depth: u32) {
        if self.items.len() <= config.quad_n_max || depth >= config.quad_max_depth {
            return;
        }

        let mid = self.mid();
        let mut children = [
            Node::new(self.lo, mid),
            Node::new(Vec2::new(mid.x, self.lo.y), Vec2::new(self.hi.x, mid.y)),
            Node::new(Vec2::new(self.lo.x, mid.y), Vec2::new(mid.x, self.hi.y)),
            Node::new(mid, self.hi),
        ];

        let mut straddlers = Vec::new();
        for idx in self.items.drain(..) {
            match quadrant_of(&segments[idx], mid) {
                Some(q) => children[q].items.push(idx),
                None => straddlers.push(idx),
            }
        }
        self.items = straddlers;

        for child in children.iter_mut() {
            child.build(segments, config, depth + 1);
        }
        self.children = Some(Box::new(children));
    }

    /// Total number of segments stored anywhere in this subtree, used to
    /// check the "every segment appears exactly once" invariant.
    fn count_stored(&self) -> usize {
        let own = self.items.len();
        match &self.children {
            Some(children) => own + children.iter().map(Node::count_stored).sum::<usize>(),
            None => own,
        }
    }
}

/// Quadrant index for `SW, SE, NW, NE`, matching `Node::build`'s child
/// array order.
///
/// Requires all four swept-parallelogram corners to lie strictly on one
/// side of each midline; a point exactly on a midline (or straddling
/// corners on opposite sides) returns `None`, which keeps the segment at
/// the parent rather than misclassifying it into a child that doesn't
/// fully contain it.
fn quadrant_of(seg: &Segment, mid: Vec2) -> Option<usize> {
    let pts = [seg.p1, seg.p2, seg.p3, seg.p4];
    let (mut west, mut east, mut south, mut north) = (true, true, true, true);
    for p in pts {
        if !(p.x < mid.x) {
            west = false;
        }
        if !(p.x > mid.x) {
            east = false;
        }
        if !(p.y < mid.y) {
            south = false;
        }
        if !(p.y > mid.y) {
            north = false;
        }
    }
    match (west, east, south, north) {
        (true, false, true, false) => Some(0),
        (false, true, true, false) => Some(1),
        (true, false, false, true) => Some(2),
        (false, true, false, true) => Some(3),
        _ => None,
    }
}

/// An immutable "ancestors so far" stack frame threaded down the recursion,
/// so sibling subtrees never share mutable state and can run in parallel.
enum Ancestors<'a> {
    Nil,
    Cons(&'a [usize], &'a Ancestors<'a>),
}

impl<'a> Ancestors<'a> {
    fn for_each(&self, mut f: impl FnMut(usize)) {
        let mut cur = self;
        loop {
            match cur {
                Ancestors::Nil => return,
                Ancestors::Cons(items, rest) => {
                    for &idx in *items {
                        f(idx);
                    }
                    cur = rest;
                }
            }
        }
    }
}

pub struct Quadtree {
    root: Node,
}

impl Quadtree {
    /// Builds a fresh tree over `segments`, which must already have their
    /// swept cache (`p3`, `p4`, AABB) up to date for this step.
    pub fn build(segments: &[Segment], config: &WorldConfig) -> Self {
        let mut root = Node::new(config.box_lo, config.box_hi);
        root.items = (0..segments.len()).collect();
        root.build(segments, config, 0);
        Quadtree { root }
    }

    /// Runs the full broad+narrow phase and returns every non-`None` event,
    /// not yet sorted or deduplicated.
    pub fn detect_events(&self, segments: &[Segment], config: &WorldConfig) -> EventList {
        detect_node(&self.root, &Ancestors::Nil, 0, segments, config)
    }

    /// Total segments stored across the whole tree; used to check the
    /// "every segment appears exactly once" invariant in tests.
    pub fn total_stored(&self) -> usize {
        self.root.count_stored()
    }
}

fn test_pair(i: usize, j: usize, segments: &[Segment], events: &mut EventList) {
    let (a, b) = if segments[i].id < segments[j].id {
        (i, j)
    } else {
        (j, i)
    };
    let l1 = &segments[a];
    let l2 = &segments[b];
    let kind = intersect::classify(l1, l2);
    if kind != IntersectionKind::None {
        events.push_canonical(l1.id, l2.id, kind);
    }
}

fn detect_node<'a>(
    node: &'a Node,
    ancestors: &'a Ancestors<'a>,
    ancestors_count: usize,
    segments: &[Segment],
    config: &WorldConfig,
) -> EventList {
    let mut events = EventList::new();

    for i in 0..node.items.len() {
        for j in (i + 1)..node.items.len() {
            test_pair(node.items[i], node.items[j], segments, &mut events);
        }
    }

    ancestors.for_each(|a_idx| {
        for &n_idx in &node.items {
            test_pair(n_idx, a_idx, segments, &mut events);
        }
    });

    let Some(children) = &node.children else {
        return events;
    };

    let new_ancestors = Ancestors::Cons(&node.items, ancestors);
    let new_count = ancestors_count + node.items.len();

    if new_count >= config.parallel_threshold {
        let ((e0, e1), (e2, e3)) = rayon::join(
            || {
                rayon::join(
                    || detect_node(&children[0], &new_ancestors, new_count, segments, config),
                    || detect_node(&children[1], &new_ancestors, new_count, segments, config),
                )
            },
            || {
                rayon::join(
                    || detect_node(&children[2], &new_ancestors, new_count, segments, config),
                    || detect_node(&children[3], &new_ancestors, new_count, segments, config),
                )
            },
        );
        events.combine(e0);
        events.combine(e1);
        events.combine(e2);
        events.combine(e3);
    } else {
        for child in children.iter() {
            events.combine(detect_node(child, &new_ancestors, new_count, segments, config));
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Color;

    fn make_segments(n: usize, config: &WorldConfig) -> Vec<Segment> {
        let lo = config.box_lo;
        let hi = config.box_hi;
        (0..n)
            .map(|i| {
                let t = i as f64 / n as f64;
                let x = lo.x + (hi.x - lo.x) * t;
                let mut s = Segment::new(
                    i as u64,
                    Vec2::new(x, lo.y),
                    Vec2::new(x, lo.y + 0.01),
                    Vec2::new(0.0, 0.0),
                    Color::Red,
                );
                s.update_swept_cache(config.dt);
                s
            })
            .collect()
    }

    #[test]
    fn every_segment_is_stored_exactly_once() {
        let config = WorldConfig {
            quad_n_max: 4,
            ..WorldConfig::default()
        };
        let segments = make_segments(500, &config);
        let tree = Quadtree::build(&segments, &config);
        assert_eq!(tree.total_stored(), segments.len());
    }

    #[test]
    fn straddling_segment_stays_at_the_parent() {
        let config = WorldConfig {
            quad_n_max: 1,
            ..WorldConfig::default()
        };
        let mid = Vec2::new(
            (config.box_lo.x + config.box_hi.x) * 0.5,
            (config.box_lo.y + config.box_hi.y) * 0.5,
        );
        // A segment centered exactly on the midpoint straddles all four
        // quadrants and must stay at the root.
        let mut straddler = Segment::new(
            0,
            Vec2::new(mid.x - 0.1, mid.y),
            Vec2::new(mid.x + 0.1, mid.y),
            Vec2::new(0.0, 0.0),
            Color::Red,
        );
        straddler.update_swept_cache(config.dt);
        let mut filler = Segment::new(
            1,
            Vec2::new(config.box_lo.x + 0.01, config.box_lo.y + 0.01),
            Vec2::new(config.box_lo.x + 0.02, config.box_lo.y + 0.01),
            Vec2::new(0.0, 0.0),
            Color::Red,
        );
        filler.update_swept_cache(config.dt);

        let segments = vec![straddler, filler];
        let tree = Quadtree::build(&segments, &config);
        assert_eq!(tree.total_stored(), 2);
        assert!(tree.root.items.contains(&0));
    }
}
