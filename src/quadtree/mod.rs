mod quadrant;
mod traversal;

pub use quadrant::Quadrant;
pub use traversal::{Dump, Levels};

use crate::{Point, QuadtreeError, Square};
use arrayvec::ArrayVec;
use tracing::{debug, trace};

/// Level limit of [`Quadtree::dump`] used by the `qtree` binary unless told otherwise.
pub const DEFAULT_PRINT_LIMIT: usize = 10000;

type Children = Box<[Node; 4]>;

#[derive(Debug, Clone)]
enum Cell {
    Empty,
    Occupied(Point),
    Split(Children),
}

/// A region of the tree. Either an empty leaf, a leaf holding exactly one point, or an internal
/// node with four children indexed by [`Quadrant`]. Internal nodes never hold a point.
#[derive(Debug, Clone)]
pub struct Node {
    boundary: Square,
    cell: Cell,
}

impl Node {
    fn new(boundary: Square) -> Self {
        Self {
            boundary,
            cell: Cell::Empty,
        }
    }

    pub fn boundary(&self) -> &Square {
        &self.boundary
    }

    /// The point stored in this node, if it is an occupied leaf
    pub fn point(&self) -> Option<&Point> {
        match self.cell {
            Cell::Occupied(ref p) => Some(p),
            _ => None,
        }
    }

    pub fn children(&self) -> Option<&[Node; 4]> {
        match self.cell {
            Cell::Split(ref children) => Some(children),
            _ => None,
        }
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&Node> {
        self.children().map(|c| &c[quadrant.index()])
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_none()
    }

    fn insert(&mut self, point: Point, depth: usize) -> Result<(), QuadtreeError> {
        match self.cell {
            Cell::Split(ref mut children) => {
                let q = Quadrant::classify(&self.boundary, &point);
                children[q.index()].insert(point, depth + 1)
            }
            Cell::Empty => {
                self.cell = Cell::Occupied(point);
                Ok(())
            }
            Cell::Occupied(existing) => self.split_insert(existing, point, depth),
        }
    }

    /// Place `point` into this leaf that currently holds `existing`, subdividing until the two
    /// points end up in different quadrants.
    fn split_insert(
        &mut self,
        existing: Point,
        point: Point,
        depth: usize,
    ) -> Result<(), QuadtreeError> {
        if existing == point {
            return Err(QuadtreeError::DuplicatePoint(point));
        }

        let qexisting = Quadrant::classify(&self.boundary, &existing);
        let qpoint = Quadrant::classify(&self.boundary, &point);

        // splitting a square that spans adjacent floats may reproduce the same square
        if qexisting == qpoint && qpoint.square_of(&self.boundary) == self.boundary {
            return Err(QuadtreeError::PrecisionExhausted {
                existing,
                new: point,
            });
        }

        trace!(depth, ?qexisting, ?qpoint, "splitting node");

        let children = self.split();
        children[qexisting.index()].cell = Cell::Occupied(existing);

        if qexisting == qpoint {
            children[qpoint.index()].split_insert(existing, point, depth + 1)
        } else {
            children[qpoint.index()].cell = Cell::Occupied(point);
            Ok(())
        }
    }

    /// Turn this leaf into an internal node with four empty children.
    /// A point held by the leaf is dropped, the caller has to re-insert it.
    fn split(&mut self) -> &mut [Node; 4] {
        debug_assert!(self.is_leaf());

        let b = self.boundary;
        self.cell = Cell::Split(Box::new([
            Node::new(Quadrant::NW.square_of(&b)),
            Node::new(Quadrant::NE.square_of(&b)),
            Node::new(Quadrant::SW.square_of(&b)),
            Node::new(Quadrant::SE.square_of(&b)),
        ]));

        match self.cell {
            Cell::Split(ref mut children) => &mut **children,
            _ => unreachable!("split produced a leaf"),
        }
    }

    /// Visit this node and every descendant whose boundary intersects `rect`.
    /// Subtrees outside of `rect` are not entered.
    fn visit_range<'a, F>(&'a self, rect: &Square, visit: &mut F)
    where
        F: FnMut(&'a Node),
    {
        visit(self);

        if let Cell::Split(ref children) = self.cell {
            for child in children.iter().filter(|c| c.boundary.intersects(rect)) {
                child.visit_range(rect, visit);
            }
        }
    }

    fn par_find_in_range(&self, rect: &Square, out: &mut Vec<Point>) {
        match self.cell {
            Cell::Empty => {}
            Cell::Occupied(p) => {
                if rect.contains(&p) {
                    out.push(p);
                }
            }
            Cell::Split(ref children) => {
                let overlapping = children
                    .iter()
                    .filter(|c| c.boundary.intersects(rect))
                    .collect::<ArrayVec<[&Node; 4]>>();
                par_find_in_nodes(&overlapping, rect, out);
            }
        }
    }
}

/// Search the given sibling nodes, halving the list between `rayon::join` calls.
fn par_find_in_nodes(nodes: &[&Node], rect: &Square, out: &mut Vec<Point>) {
    match nodes.len() {
        0 => {}
        1 => nodes[0].par_find_in_range(rect, out),
        len => {
            let (lo, hi) = nodes.split_at(len / 2);
            let ((), rest) = rayon::join(
                || par_find_in_nodes(lo, rect, out),
                || {
                    let mut rest = Vec::new();
                    par_find_in_nodes(hi, rect, &mut rest);
                    rest
                },
            );
            out.extend(rest);
        }
    }
}

/// Point region quadtree over a fixed outer square.
///
/// Holds at most one point per leaf and subdivides a leaf into four quadrants when a second
/// point arrives. Mutation goes through `&mut self`; any number of read-only queries may run
/// at the same time.
#[derive(Debug, Clone)]
pub struct Quadtree {
    root: Node,
    len: usize,
}

impl Quadtree {
    /// Create an empty tree over `boundary`.
    ///
    /// Fails with [`QuadtreeError::MalformedBoundary`] unless the corners are finite and `bl`
    /// is strictly below and left of `tr`.
    pub fn new(boundary: Square) -> Result<Self, QuadtreeError> {
        if !boundary.is_proper() {
            return Err(QuadtreeError::MalformedBoundary(boundary));
        }
        Ok(Self {
            root: Node::new(boundary),
            len: 0,
        })
    }

    /// The outer square
    pub fn boundary(&self) -> &Square {
        &self.root.boundary
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of points stored
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a point, subdividing leaves as needed.
    ///
    /// On error the set of stored points is unchanged.
    pub fn insert(&mut self, point: Point) -> Result<(), QuadtreeError> {
        if !self.root.boundary.contains(&point) {
            debug!(%point, "insertion outside of the outer square");
            return Err(QuadtreeError::OutOfBounds {
                point,
                boundary: self.root.boundary,
            });
        }

        match self.root.insert(point, 0) {
            Ok(()) => {
                self.len += 1;
                Ok(())
            }
            Err(err) => {
                debug!(%err, "insertion rejected");
                Err(err)
            }
        }
    }

    /// Return wether the exact point is stored in the tree.
    /// Points outside of the outer square are never contained.
    pub fn contains(&self, point: &Point) -> bool {
        if !self.root.boundary.contains(point) {
            return false;
        }

        let mut node = &self.root;
        loop {
            match node.cell {
                Cell::Split(ref children) => {
                    let q = Quadrant::classify(&node.boundary, point);
                    node = &children[q.index()];
                }
                Cell::Occupied(ref p) => return p == point,
                Cell::Empty => return false,
            }
        }
    }

    /// Call `f` with every stored point within `rect`, edges inclusive.
    /// Returns the number of points reported.
    pub fn for_each_in_range<F>(&self, rect: &Square, mut f: F) -> Result<usize, QuadtreeError>
    where
        F: FnMut(&Point),
    {
        check_query(rect)?;

        let mut found = 0;
        self.root.visit_range(rect, &mut |node: &Node| {
            if let Cell::Occupied(ref p) = node.cell {
                if rect.contains(p) {
                    found += 1;
                    f(p);
                }
            }
        });
        Ok(found)
    }

    /// Append every stored point within `rect` to `out`.
    /// Returns wether any point was found.
    pub fn find_in_range(&self, rect: &Square, out: &mut Vec<Point>) -> Result<bool, QuadtreeError> {
        let found = self.for_each_in_range(rect, |p| out.push(*p))?;
        Ok(found > 0)
    }

    pub fn query_range(&self, rect: &Square) -> Result<Vec<Point>, QuadtreeError> {
        let mut res = Vec::new();
        self.find_in_range(rect, &mut res)?;
        Ok(res)
    }

    /// Same result set as [`Quadtree::find_in_range`], searching sibling subtrees on the rayon
    /// thread pool. The order of the appended points is unspecified.
    pub fn par_find_in_range(
        &self,
        rect: &Square,
        out: &mut Vec<Point>,
    ) -> Result<bool, QuadtreeError> {
        check_query(rect)?;

        let before = out.len();
        if self.root.boundary.intersects(rect) {
            self.root.par_find_in_range(rect, out);
        }
        Ok(out.len() > before)
    }

    /// Level-order walk over every node.
    pub fn levels(&self) -> Levels<'_> {
        Levels::new(&self.root)
    }

    /// Level of the deepest node; 0 while the root is a leaf.
    pub fn depth(&self) -> usize {
        self.levels().map(|(level, _)| level).max().unwrap_or(0)
    }

    /// Human readable listing of the tree, see [`Dump`].
    pub fn dump(&self, max_level: usize) -> Dump<'_> {
        Dump::new(self, max_level)
    }

    /// Number of nodes a range search over `rect` enters
    #[cfg(test)]
    fn visited_in_range(&self, rect: &Square) -> usize {
        let mut visited = 0;
        self.root.visit_range(rect, &mut |_: &Node| visited += 1);
        visited
    }
}

fn check_query(rect: &Square) -> Result<(), QuadtreeError> {
    if rect.is_well_formed() {
        Ok(())
    } else {
        Err(QuadtreeError::MalformedBoundary(*rect))
    }
}
