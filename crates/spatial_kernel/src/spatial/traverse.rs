//! Breadth-first point location

use std::collections::VecDeque;

use super::{NodeId, SpatialTree};
use crate::math::Vector;

/// Iterator over the leaves whose domain contains a point
///
/// Created by [`SpatialTree::traverse`]. Nodes are visited breadth-first and
/// only children containing the point (boundary included) are expanded, so
/// a point on a shared face yields every leaf touching it.
#[derive(Debug)]
pub struct Traverse<'a, T> {
    tree: &'a SpatialTree<T>,
    point: &'a Vector,
    queue: VecDeque<NodeId>,
}

impl<'a, T> Traverse<'a, T> {
    pub(crate) fn new(tree: &'a SpatialTree<T>, from: NodeId, point: &'a Vector) -> Self {
        Self { tree, point, queue: VecDeque::from([from]) }
    }
}

impl<T> Iterator for Traverse<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.queue.pop_front() {
            let Some(node) = self.tree.get(id) else {
                continue;
            };
            if !node.domain().contains_point(self.point).unwrap_or(false) {
                continue;
            }
            if node.is_leaf() {
                return Some(id);
            }
            self.queue.extend(node.children().iter().copied());
        }
        None
    }
}
