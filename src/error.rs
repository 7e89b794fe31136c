//! Errors surfaced at construction time.
//!
//! The core has no recoverable errors during normal operation; all inputs
//! are validated at construction. Internal invariant violations (bad
//! event ordering, out-of-range quadrant classification) are programming
//! errors and `panic!`/`assert!` instead of going through this type.

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WorldError {
    #[error("segment {id} has zero length (p1 == p2); mass would be zero")]
    DegenerateSegment { id: crate::segment::SegmentId },
}
