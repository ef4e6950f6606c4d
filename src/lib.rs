//! Point region Quadtree.
//! # Contracts:
//! - The outer square must be non-degenerate: `bl < tr` on both axes, finite coordinates
//! - Every inserted point must lie within the outer square (edges inclusive)
//! - At most one point per leaf; inserting an exactly equal point twice is rejected
//!
pub mod error;
pub mod quadtree;
pub mod session;
pub mod square;

pub use error::QuadtreeError;
pub use quadtree::Quadtree;
pub use square::Square;

use std::fmt;
use std::ops::Deref;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point(pub [f64; 2]);

impl Deref for Point {
    type Target = [f64; 2];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(prec) => write!(f, "({:.*}, {:.*})", prec, self[0], prec, self[1]),
            None => write!(f, "({}, {})", self[0], self[1]),
        }
    }
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self([x, y])
    }

    pub fn is_finite(&self) -> bool {
        self[0].is_finite() && self[1].is_finite()
    }
}
