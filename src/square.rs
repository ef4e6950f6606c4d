use crate::Point;
use std::fmt;

/// Axis-aligned region given by its bottom-left and top-right corners.
///
/// Serves as the outer boundary of a tree, as the region of every node and as the query
/// rectangle of range searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub bl: Point,
    pub tr: Point,
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(prec) => write!(f, "[bL {:.*}, tR {:.*}]", prec, self.bl, prec, self.tr),
            None => write!(f, "[bL {}, tR {}]", self.bl, self.tr),
        }
    }
}

impl Square {
    pub fn new(bl: Point, tr: Point) -> Self {
        Self { bl, tr }
    }

    pub fn from_coords(xl: f64, yb: f64, xr: f64, yt: f64) -> Self {
        Self::new(Point::new(xl, yb), Point::new(xr, yt))
    }

    /// `bl <= tr` on both axes. Zero width or height is allowed, which is fine for query
    /// rectangles but not for tree boundaries, see [`Square::is_proper`].
    pub fn is_well_formed(&self) -> bool {
        self.bl[0] <= self.tr[0] && self.bl[1] <= self.tr[1]
    }

    /// Finite corners and `bl < tr` strictly on both axes.
    pub fn is_proper(&self) -> bool {
        self.bl.is_finite()
            && self.tr.is_finite()
            && self.bl[0] < self.tr[0]
            && self.bl[1] < self.tr[1]
    }

    /// Return wether point is within this square, edges included
    pub fn contains(&self, point: &Point) -> bool {
        let [x, y] = **point;

        self.bl[0] <= x && self.bl[1] <= y && x <= self.tr[0] && y <= self.tr[1]
    }

    /// Closed overlap test; touching edges or corners count as intersecting.
    pub fn intersects(&self, other: &Square) -> bool {
        if self.tr[0] < other.bl[0] || self.bl[0] > other.tr[0] {
            return false;
        }
        if self.tr[1] < other.bl[1] || self.bl[1] > other.tr[1] {
            return false;
        }
        true
    }

    pub fn center(&self) -> Point {
        Point::new(
            midpoint(self.bl[0], self.tr[0]),
            midpoint(self.bl[1], self.tr[1]),
        )
    }

    pub fn width(&self) -> f64 {
        self.tr[0] - self.bl[0]
    }

    pub fn height(&self) -> f64 {
        self.tr[1] - self.bl[1]
    }
}

/// Halving each side first keeps the midpoint finite when the sum overflows.
fn midpoint(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if sum.is_finite() {
        sum / 2.0
    } else {
        a / 2.0 + b / 2.0
    }
}
