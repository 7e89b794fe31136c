//! `World` orchestrates one discrete simulation step: build the spatial
//! index, detect and resolve collisions, advance positions, and reflect
//! segments off the confining box's walls.

use rayon::prelude::*;

use crate::config::WorldConfig;
use crate::error::WorldError;
use crate::geometry::Vec2;
use crate::quadtree::Quadtree;
use crate::segment::{Color, Segment, SegmentId};
use crate::solver;

/// Monotonic totals of wall and pair collisions observed over the
/// simulation's lifetime; the only externally observable counters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Counters {
    pub line_line: u64,
    pub line_wall: u64,
}

pub struct World {
    config: WorldConfig,
    segments: Vec<Segment>,
    next_id: SegmentId,
    counters: Counters,
}

impl World {
    /// Creates a world with an empty segment pool. `capacity` is a
    /// programmer-supplied sizing hint (`Vec` pre-allocation); it is a
    /// construction-time invariant, not recoverable input, so an invalid
    /// value panics rather than returning `Result`.
    pub fn new(capacity: usize, config: WorldConfig) -> Self {
        assert!(capacity > 0, "World capacity must be positive");
        World {
            config,
            segments: Vec::with_capacity(capacity),
            next_id: 0,
            counters: Counters::default(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Adds a segment, assigning it the next monotonically-increasing ID.
    /// Must be called before the first `step()`. Rejects zero-length
    /// segments: their mass (segment length) would be zero and the solver's
    /// mass ratios would divide by zero.
    pub fn add_segment(
        &mut self,
        p1: Vec2,
        p2: Vec2,
        velocity: Vec2,
        color: Color,
    ) -> Result<SegmentId, WorldError> {
        let id = self.next_id;
        if p1 == p2 {
            return Err(WorldError::DegenerateSegment { id });
        }
        self.segments.push(Segment::new(id, p1, p2, velocity, color));
        self.next_id += 1;
        log::debug!("added segment {id}");
        Ok(id)
    }

    pub fn get_segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn line_line_count(&self) -> u64 {
        self.counters.line_line
    }

    pub fn wall_count(&self) -> u64 {
        self.counters.line_wall
    }

    /// Runs one discrete step: detect -> solve -> advance -> walls.
    pub fn step(&mut self) {
        log::debug!("step: {} segments", self.segments.len());
        self.build_swept_cache();
        let dispatched = self.detect_and_solve();
        self.counters.line_line += dispatched;
        self.advance_positions();
        self.reflect_walls();
    }

    fn build_swept_cache(&mut self) {
        let dt = self.config.dt;
        self.segments
            .par_iter_mut()
            .for_each(|s| s.update_swept_cache(dt));
    }

    /// Builds the quadtree, detects events, sorts and deduplicates them
    /// into a deterministic `(id1, id2)` order, and dispatches each to the
    /// solver in that order. Returns the number of events dispatched.
    fn detect_and_solve(&mut self) -> u64 {
        let tree = Quadtree::build(&self.segments, &self.config);
        let events = tree.detect_events(&self.segments, &self.config);
        let events = events.into_sorted_deduped();
        log::trace!("{} candidate events after dedup", events.len());

        let count = events.len() as u64;
        for event in events {
            debug_assert!(event.l1 < event.l2);
            let (lo_idx, hi_idx) = self.index_pair(event.l1, event.l2);
            let (lo_slice, hi_slice) = self.segments.split_at_mut(hi_idx);
            solver::solve(&mut lo_slice[lo_idx], &mut hi_slice[0], event.kind);
        }
        count
    }

    /// Finds the storage indices of two segment IDs, in ascending order.
    /// IDs are assigned densely starting at 0 and segments are never
    /// removed, so `id == index` always holds; this still looks the id up
    /// rather than assuming it, since that invariant is internal.
    fn index_pair(&self, id1: SegmentId, id2: SegmentId) -> (usize, usize) {
        let idx1 = self
            .segments
            .iter()
            .position(|s| s.id == id1)
            .expect("event references a live segment id");
        let idx2 = self
            .segments
            .iter()
            .position(|s| s.id == id2)
            .expect("event references a live segment id");
        if idx1 < idx2 {
            (idx1, idx2)
        } else {
            (idx2, idx1)
        }
    }

    fn advance_positions(&mut self) {
        let dt = self.config.dt;
        self.segments.par_iter_mut().for_each(|s| {
            let d = s.velocity * dt;
            s.p1 = s.p1 + d;
            s.p2 = s.p2 + d;
        });
    }

    fn reflect_walls(&mut self) {
        let (xmin, xmax) = (self.config.box_lo.x, self.config.box_hi.x);
        let (ymin, ymax) = (self.config.box_lo.y, self.config.box_hi.y);

        let wall_hits: u64 = self
            .segments
            .par_iter_mut()
            .map(|s| {
                let mut hits = 0u64;
                if (s.p1.x > xmax || s.p2.x > xmax) && s.velocity.x > 0.0 {
                    s.velocity.x = -s.velocity.x;
                    hits += 1;
                } else if (s.p1.x < xmin || s.p2.x < xmin) && s.velocity.x < 0.0 {
                    s.velocity.x = -s.velocity.x;
                    hits += 1;
                }
                if (s.p1.y > ymax || s.p2.y > ymax) && s.velocity.y > 0.0 {
                    s.velocity.y = -s.velocity.y;
                    hits += 1;
                } else if (s.p1.y < ymin || s.p2.y < ymin) && s.velocity.y < 0.0 {
                    s.velocity.y = -s.velocity.y;
                    hits += 1;
                }
                hits
            })
            .sum();
        self.counters.line_wall += wall_hits;
    }
}
