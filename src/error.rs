//! Quadtree error types.

use crate::{Point, Square};
use thiserror::Error;

/// Contract violations reported by [`crate::Quadtree`] instead of aborting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadtreeError {
    #[error("Point {point} lies outside of the outer square {boundary}")]
    OutOfBounds { point: Point, boundary: Square },

    #[error("Point {0} is already in the tree")]
    DuplicatePoint(Point),

    #[error("Malformed square {0}: bottom left must lie below and left of top right")]
    MalformedBoundary(Square),

    #[error("Points {existing} and {new} can not be separated at the coordinate precision")]
    PrecisionExhausted { existing: Point, new: Point },
}
