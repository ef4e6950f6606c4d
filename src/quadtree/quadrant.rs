use crate::{Point, Square};

/// Child slot of a subdivided node.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Quadrant {
    NW = 0,
    NE = 1,
    SW = 2,
    SE = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::NW, Quadrant::NE, Quadrant::SW, Quadrant::SE];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Determine which quadrant of `square` the point belongs to.
    ///
    /// The checks run in the order NW, NE, SW and fall back to SE. Points on the midlines are
    /// assigned by that order: e.g. the exact center ends up in SE, a point on the vertical
    /// midline above the center in NE.
    pub fn classify(square: &Square, point: &Point) -> Self {
        debug_assert!(
            square.contains(point),
            "{} is not within {}",
            point,
            square
        );

        let [x, y] = **point;
        let Point([xmid, ymid]) = square.center();

        if x < xmid && y >= ymid {
            Quadrant::NW
        } else if x >= xmid && y > ymid {
            Quadrant::NE
        } else if x <= xmid && y < ymid {
            Quadrant::SW
        } else {
            Quadrant::SE
        }
    }

    /// The region of this quadrant within `square`.
    pub fn square_of(self, square: &Square) -> Square {
        let [xl, yb] = *square.bl;
        let [xr, yt] = *square.tr;
        let Point([xmid, ymid]) = square.center();

        match self {
            Quadrant::NW => Square::from_coords(xl, ymid, xmid, yt),
            Quadrant::NE => Square::from_coords(xmid, ymid, xr, yt),
            Quadrant::SW => Square::from_coords(xl, yb, xmid, ymid),
            Quadrant::SE => Square::from_coords(xmid, yb, xr, ymid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outer() -> Square {
        Square::from_coords(0.0, 0.0, 20.0, 20.0)
    }

    #[test]
    fn interior_points() {
        let s = outer();
        assert_eq!(Quadrant::classify(&s, &Point::new(2.0, 15.0)), Quadrant::NW);
        assert_eq!(Quadrant::classify(&s, &Point::new(15.0, 15.0)), Quadrant::NE);
        assert_eq!(Quadrant::classify(&s, &Point::new(2.0, 2.0)), Quadrant::SW);
        assert_eq!(Quadrant::classify(&s, &Point::new(15.0, 2.0)), Quadrant::SE);
    }

    #[test]
    fn midline_tie_breaks() {
        let s = outer();
        // center
        assert_eq!(Quadrant::classify(&s, &Point::new(10.0, 10.0)), Quadrant::SE);
        // horizontal midline
        assert_eq!(Quadrant::classify(&s, &Point::new(3.0, 10.0)), Quadrant::NW);
        assert_eq!(Quadrant::classify(&s, &Point::new(13.0, 10.0)), Quadrant::SE);
        // vertical midline
        assert_eq!(Quadrant::classify(&s, &Point::new(10.0, 13.0)), Quadrant::NE);
        assert_eq!(Quadrant::classify(&s, &Point::new(10.0, 3.0)), Quadrant::SW);
        // corners of the outer square
        assert_eq!(Quadrant::classify(&s, &Point::new(0.0, 0.0)), Quadrant::SW);
        assert_eq!(Quadrant::classify(&s, &Point::new(0.0, 20.0)), Quadrant::NW);
        assert_eq!(Quadrant::classify(&s, &Point::new(20.0, 20.0)), Quadrant::NE);
        assert_eq!(Quadrant::classify(&s, &Point::new(20.0, 0.0)), Quadrant::SE);
    }

    #[test]
    fn classified_point_lies_in_its_quadrant_square() {
        let s = outer();
        let coords = [0.0, 2.5, 9.999, 10.0, 10.001, 17.0, 20.0];
        for &x in coords.iter() {
            for &y in coords.iter() {
                let p = Point::new(x, y);
                let q = Quadrant::classify(&s, &p);
                assert!(q.square_of(&s).contains(&p), "{} {:?}", p, q);
                // repeated calls agree
                assert_eq!(q, Quadrant::classify(&s, &p));
            }
        }
    }

    #[test]
    fn quadrant_squares_tile_parent() {
        let s = Square::from_coords(-3.0, 1.0, 5.0, 4.0);
        let nw = Quadrant::NW.square_of(&s);
        let ne = Quadrant::NE.square_of(&s);
        let sw = Quadrant::SW.square_of(&s);
        let se = Quadrant::SE.square_of(&s);

        let area: f64 = [nw, ne, sw, se]
            .iter()
            .map(|q| q.width() * q.height())
            .sum();
        assert_eq!(area, s.width() * s.height());

        // shared edges
        assert_eq!(nw.tr[0], ne.bl[0]);
        assert_eq!(sw.tr[0], se.bl[0]);
        assert_eq!(sw.tr[1], nw.bl[1]);
        assert_eq!(se.tr[1], ne.bl[1]);
        // outer corners
        assert_eq!(sw.bl, s.bl);
        assert_eq!(ne.tr, s.tr);
        assert_eq!(nw.bl[0], s.bl[0]);
        assert_eq!(nw.tr[1], s.tr[1]);
        assert_eq!(se.bl[1], s.bl[1]);
        assert_eq!(se.tr[0], s.tr[0]);
    }
}
