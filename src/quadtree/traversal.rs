use super::{Node, Quadtree};
use std::collections::VecDeque;
use std::fmt;

/// Level-order iterator over the nodes of a tree, yielding `(level, node)` with the root at
/// level 0. Children are visited in `NW, NE, SW, SE` order.
#[derive(Debug, Clone)]
pub struct Levels<'a> {
    queue: VecDeque<(usize, &'a Node)>,
}

impl<'a> Levels<'a> {
    pub(super) fn new(root: &'a Node) -> Self {
        let mut queue = VecDeque::with_capacity(16);
        queue.push_back((0, root));
        Self { queue }
    }
}

impl<'a> Iterator for Levels<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (level, node) = self.queue.pop_front()?;
        if let Some(children) = node.children() {
            self.queue
                .extend(children.iter().map(|child| (level + 1, child)));
        }
        Some((level, node))
    }
}

/// Diagnostic listing of a tree.
///
/// One line with the center of every node's square, in level order, followed by the stored
/// point for occupied leaves:
///
/// ```text
/// Square's center (at level 0):	(10.00000, 10.00000)
/// Square's center (at level 1):	(5.00000, 15.00000)
///    The point in this root is:	(1.00000, 13.00000)
/// ```
///
/// Nodes below `max_level` are replaced by a single elision marker.
pub struct Dump<'a> {
    tree: &'a Quadtree,
    max_level: usize,
}

impl<'a> Dump<'a> {
    pub(super) fn new(tree: &'a Quadtree, max_level: usize) -> Self {
        Self { tree, max_level }
    }
}

impl<'a> fmt::Display for Dump<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (level, node) in self.tree.levels() {
            if level > self.max_level {
                writeln!(f, "\t...\n   < many more >")?;
                break;
            }
            writeln!(
                f,
                "Square's center (at level {}):\t{:.5}",
                level,
                node.boundary().center()
            )?;
            if let Some(p) = node.point() {
                writeln!(f, "   The point in this root is:\t{:.5}", p)?;
            }
        }
        Ok(())
    }
}
