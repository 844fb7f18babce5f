//! Spatial tree arena and split/traverse operations

use std::collections::VecDeque;
use std::iter;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use super::{NodeId, SpatialTreeNode, Traverse};
use crate::error::{GeometryError, GeometryResult};
use crate::geometry::Domain;
use crate::math::Vector;

/// Configuration for tree behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Deepest level that may still be split (`None` for unlimited)
    ///
    /// Splitting a node whose level is `>= max_depth` is rejected.
    pub max_depth: Option<usize>,
}

impl TreeConfig {
    /// Limit splitting to nodes above `max_depth`
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Recursive partition of an N-dimensional domain
///
/// The root covers the domain given at construction and starts as a leaf.
/// Nodes are stored in an arena; a [`NodeId`] from a subtree that has been
/// cleared or re-split no longer resolves and yields
/// [`GeometryError::MissingNode`].
#[derive(Debug, Clone)]
pub struct SpatialTree<T> {
    nodes: SlotMap<NodeId, SpatialTreeNode<T>>,
    root: NodeId,
    config: TreeConfig,
}

impl<T> SpatialTree<T> {
    /// Create a tree with a single leaf covering `domain`
    pub fn new(domain: Domain) -> Self {
        Self::with_config(domain, TreeConfig::default())
    }

    /// Create a tree with explicit configuration
    pub fn with_config(domain: Domain, config: TreeConfig) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SpatialTreeNode::new(domain, None));
        Self { nodes, root, config }
    }

    /// The root node
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Active configuration
    pub const fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Number of axes of the root domain
    pub fn dimension(&self) -> usize {
        self.nodes.get(self.root).map_or(0, |root| root.domain.dimension())
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True when `id` refers to a live node of this tree
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Node for `id`, or `None` when stale
    pub fn get(&self, id: NodeId) -> Option<&SpatialTreeNode<T>> {
        self.nodes.get(id)
    }

    fn missing(id: NodeId) -> GeometryError {
        GeometryError::MissingNode(format!("{id:?} is not a live tree node"))
    }

    /// Node for `id`
    pub fn node(&self, id: NodeId) -> GeometryResult<&SpatialTreeNode<T>> {
        self.nodes.get(id).ok_or_else(|| Self::missing(id))
    }

    /// Mutable node for `id`
    pub fn node_mut(&mut self, id: NodeId) -> GeometryResult<&mut SpatialTreeNode<T>> {
        self.nodes.get_mut(id).ok_or_else(|| Self::missing(id))
    }

    /// Domain of `id`
    pub fn domain(&self, id: NodeId) -> GeometryResult<&Domain> {
        Ok(self.node(id)?.domain())
    }

    /// Parent of `id`, `None` for the root
    pub fn parent(&self, id: NodeId) -> GeometryResult<Option<NodeId>> {
        Ok(self.node(id)?.parent())
    }

    /// Children of `id` in split order
    pub fn children(&self, id: NodeId) -> GeometryResult<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    /// True when `id` has not been split
    pub fn is_leaf(&self, id: NodeId) -> GeometryResult<bool> {
        Ok(self.node(id)?.is_leaf())
    }

    /// Payload of `id`
    pub fn value(&self, id: NodeId) -> GeometryResult<Option<&T>> {
        Ok(self.node(id)?.value())
    }

    /// Mutable payload of `id`
    pub fn value_mut(&mut self, id: NodeId) -> GeometryResult<Option<&mut T>> {
        Ok(self.node_mut(id)?.value_mut())
    }

    /// Store a payload on `id`, returning the previous one
    pub fn set_value(&mut self, id: NodeId, value: T) -> GeometryResult<Option<T>> {
        Ok(self.node_mut(id)?.set_value(value))
    }

    /// Remove and return the payload of `id`
    pub fn take_value(&mut self, id: NodeId) -> GeometryResult<Option<T>> {
        Ok(self.node_mut(id)?.take_value())
    }

    /// Depth of `id` (root is 0)
    pub fn level(&self, id: NodeId) -> GeometryResult<usize> {
        let mut level = 0;
        let mut current = self.node(id)?.parent;
        while let Some(parent) = current {
            level += 1;
            current = self.node(parent)?.parent;
        }
        Ok(level)
    }

    /// Nodes on the path from the root down to the parent of `id`
    ///
    /// Empty for the root.
    pub fn ancestors(&self, id: NodeId) -> GeometryResult<Vec<NodeId>> {
        let mut path = Vec::new();
        let mut current = self.node(id)?.parent;
        while let Some(parent) = current {
            path.push(parent);
            current = self.node(parent)?.parent;
        }
        path.reverse();
        Ok(path)
    }

    /// Child positions along the path from the root to `id`
    ///
    /// `indices[d]` is the position of the depth `d + 1` node within its
    /// parent's children. [`SpatialTree::node_at`] maps the result back.
    pub fn indices(&self, id: NodeId) -> GeometryResult<Vec<usize>> {
        let mut path = self.ancestors(id)?;
        path.push(id);
        path.windows(2)
            .map(|pair| {
                self.node(pair[0])?
                    .children
                    .iter()
                    .position(|child| *child == pair[1])
                    .ok_or_else(|| Self::missing(pair[1]))
            })
            .collect()
    }

    /// Node reached from the root by following child positions
    pub fn node_at(&self, indices: &[usize]) -> GeometryResult<NodeId> {
        let mut current = self.root;
        for &index in indices {
            let children = &self.node(current)?.children;
            current = *children.get(index).ok_or(GeometryError::IndexOutOfBounds {
                index,
                len: children.len(),
            })?;
        }
        Ok(current)
    }

    /// Split `id` along every axis at the given fractions
    ///
    /// `divisions[axis]` lists strictly increasing cut positions inside
    /// `(0, 1)`; an empty list leaves that axis uncut. With `kᵢ` cuts on axis
    /// `i` the node gets `Π(kᵢ + 1)` children, ordered with axis 0 varying
    /// fastest. Any previous children of `id` and their subtrees are removed.
    /// Nothing changes when validation fails.
    pub fn split(&mut self, id: NodeId, divisions: &[Vec<f64>]) -> GeometryResult<Vec<NodeId>> {
        let node = self.node(id)?;
        GeometryError::check_dimension(node.domain.dimension(), divisions.len())?;
        for (axis, cuts) in divisions.iter().enumerate() {
            validate_cuts(axis, cuts)?;
        }
        if let Some(max_depth) = self.config.max_depth {
            let level = self.level(id)?;
            if level >= max_depth {
                return Err(GeometryError::InvalidArgument(format!(
                    "cannot split node at level {level}, max depth is {max_depth}"
                )));
            }
        }

        let domains = child_domains(&node.domain, divisions)?;
        let removed = self.remove_subtree(id);
        if removed > 0 {
            trace!("split discarded {removed} nodes below {id:?}");
        }

        let children: Vec<NodeId> = domains
            .into_iter()
            .map(|domain| self.nodes.insert(SpatialTreeNode::new(domain, Some(id))))
            .collect();
        self.node_mut(id)?.children.clone_from(&children);

        debug!("split {id:?} into {} children", children.len());
        Ok(children)
    }

    /// Split `id` into `parts` equal slices along every axis
    pub fn split_even(&mut self, id: NodeId, parts: usize) -> GeometryResult<Vec<NodeId>> {
        if parts == 0 {
            return Err(GeometryError::InvalidArgument(
                "split_even needs at least one part".to_string(),
            ));
        }
        let cuts: Vec<f64> = (1..parts).map(|i| i as f64 / parts as f64).collect();
        let dimension = self.domain(id)?.dimension();
        self.split(id, &vec![cuts; dimension])
    }

    /// Remove every descendant of `id`, turning it into a leaf
    ///
    /// Returns the number of nodes removed.
    pub fn clear(&mut self, id: NodeId) -> GeometryResult<usize> {
        self.node(id)?;
        let removed = self.remove_subtree(id);
        debug!("cleared {removed} nodes below {id:?}");
        Ok(removed)
    }

    fn remove_subtree(&mut self, id: NodeId) -> usize {
        let mut pending = match self.nodes.get_mut(id) {
            Some(node) => std::mem::take(&mut node.children),
            None => return 0,
        };
        let mut removed = 0;
        while let Some(child) = pending.pop() {
            if let Some(node) = self.nodes.remove(child) {
                removed += 1;
                pending.extend(node.children);
            }
        }
        removed
    }

    /// Leaves below `from` whose domain contains `point`, breadth-first
    ///
    /// Containment is inclusive (`minimum <= p <= maximum`).
    pub fn traverse<'a>(
        &'a self,
        from: NodeId,
        point: &'a Vector,
    ) -> GeometryResult<Traverse<'a, T>> {
        let node = self.node(from)?;
        GeometryError::check_dimension(node.domain.dimension(), point.len())?;
        Ok(Traverse::new(self, from, point))
    }

    /// All nodes in breadth-first order starting at the root
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SpatialTreeNode<T>)> + '_ {
        let mut queue = VecDeque::from([self.root]);
        iter::from_fn(move || {
            let id = queue.pop_front()?;
            let node = self.nodes.get(id)?;
            queue.extend(node.children.iter().copied());
            Some((id, node))
        })
    }

    /// All leaves in breadth-first order
    pub fn leaves(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(id, _)| id)
            .collect()
    }

    /// All nodes at depth `level`, in breadth-first order
    pub fn nodes_at_level(&self, level: usize) -> Vec<NodeId> {
        let mut current = vec![self.root];
        for _ in 0..level {
            current = current
                .iter()
                .filter_map(|id| self.nodes.get(*id))
                .flat_map(|node| node.children.iter().copied())
                .collect();
        }
        current
    }
}

fn validate_cuts(axis: usize, cuts: &[f64]) -> GeometryResult<()> {
    if let Some(bad) = cuts.iter().find(|t| !(**t > 0.0 && **t < 1.0)) {
        return Err(GeometryError::InvalidArgument(format!(
            "split value {bad} on axis {axis} is outside (0, 1)"
        )));
    }
    if let Some(pair) = cuts.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(GeometryError::InvalidArgument(format!(
            "split values on axis {axis} must be strictly increasing, got {} then {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

/// Child domains for a split, axis 0 varying fastest
fn child_domains(parent: &Domain, divisions: &[Vec<f64>]) -> GeometryResult<Vec<Domain>> {
    let boundaries: Vec<Vec<f64>> = divisions
        .iter()
        .map(|cuts| {
            iter::once(0.0)
                .chain(cuts.iter().copied())
                .chain(iter::once(1.0))
                .collect()
        })
        .collect();
    let counts: Vec<usize> = boundaries.iter().map(|b| b.len() - 1).collect();
    let total: usize = counts.iter().product();

    (0..total)
        .map(|index| {
            let mut rest = index;
            let mut lower = Vec::with_capacity(counts.len());
            let mut upper = Vec::with_capacity(counts.len());
            for (bounds, count) in boundaries.iter().zip(&counts) {
                let slot = rest % count;
                rest /= count;
                lower.push(bounds[slot]);
                upper.push(bounds[slot + 1]);
            }
            parent.sub_domain(&Vector::new(lower), &Vector::new(upper))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square_tree() -> SpatialTree<&'static str> {
        SpatialTree::new(Domain::unit(2))
    }

    fn domain(min: (f64, f64), max: (f64, f64)) -> Domain {
        Domain::new(Vector::vector2(min.0, min.1), Vector::vector2(max.0, max.1)).unwrap()
    }

    #[test]
    fn test_new_tree_is_single_leaf() {
        let tree = unit_square_tree();
        let root = tree.root();
        assert_eq!(tree.node_count(), 1);
        assert!(tree.is_leaf(root).unwrap());
        assert_eq!(tree.level(root).unwrap(), 0);
        assert_eq!(tree.parent(root).unwrap(), None);
        assert_eq!(tree.value(root).unwrap(), None);
        assert_eq!(tree.dimension(), 2);
    }

    #[test]
    fn test_half_split_order() {
        let mut tree = unit_square_tree();
        let root = tree.root();
        let children = tree.split(root, &[vec![0.5], vec![0.5]]).unwrap();

        let domains: Vec<Domain> = children
            .iter()
            .map(|id| tree.domain(*id).unwrap().clone())
            .collect();
        assert_eq!(
            domains,
            vec![
                domain((0.0, 0.0), (0.5, 0.5)),
                domain((0.5, 0.0), (1.0, 0.5)),
                domain((0.0, 0.5), (0.5, 1.0)),
                domain((0.5, 0.5), (1.0, 1.0)),
            ]
        );
        assert_eq!(tree.children(root).unwrap(), children.as_slice());
        assert!(!tree.is_leaf(root).unwrap());
        for child in &children {
            assert_eq!(tree.parent(*child).unwrap(), Some(root));
            assert_eq!(tree.level(*child).unwrap(), 1);
        }
    }

    #[test]
    fn test_uneven_split_counts() {
        let mut tree = SpatialTree::<()>::new(Domain::unit(3));
        let root = tree.root();
        let children = tree.split(root, &[vec![0.25, 0.5, 0.75], vec![], vec![0.1]]).unwrap();
        assert_eq!(children.len(), 4 * 2);

        let first = tree.domain(children[0]).unwrap();
        assert_eq!(first.maximum(), &Vector::vector3(0.25, 1.0, 0.1));
        let last = tree.domain(children[7]).unwrap();
        assert_eq!(last.minimum(), &Vector::vector3(0.75, 0.0, 0.1));
    }

    #[test]
    fn test_split_validation_leaves_tree_untouched() {
        let mut tree = unit_square_tree();
        let root = tree.root();
        let children = tree.split_even(root, 2).unwrap();

        let bad_inputs: Vec<Vec<Vec<f64>>> = vec![
            vec![vec![0.5]],
            vec![vec![0.0], vec![0.5]],
            vec![vec![0.5], vec![1.0]],
            vec![vec![0.6, 0.4], vec![]],
            vec![vec![0.5, 0.5], vec![]],
            vec![vec![f64::NAN], vec![]],
        ];
        for divisions in bad_inputs {
            assert!(tree.split(root, &divisions).is_err(), "{divisions:?}");
        }
        assert_eq!(tree.children(root).unwrap(), children.as_slice());
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn test_resplit_discards_old_subtree() {
        let mut tree = unit_square_tree();
        let root = tree.root();
        let first = tree.split_even(root, 2).unwrap();
        tree.split_even(first[0], 2).unwrap();
        assert_eq!(tree.node_count(), 9);

        let second = tree.split(root, &[vec![0.5], vec![]]).unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(tree.node_count(), 3);
        assert!(!tree.contains(first[0]));
        assert!(matches!(tree.node(first[0]), Err(GeometryError::MissingNode(_))));
    }

    #[test]
    fn test_clear() {
        let mut tree = unit_square_tree();
        let root = tree.root();
        let children = tree.split_even(root, 3).unwrap();
        assert_eq!(children.len(), 9);
        assert_eq!(tree.clear(root).unwrap(), 9);
        assert!(tree.is_leaf(root).unwrap());
        assert_eq!(tree.clear(children[0]), Err(SpatialTree::<&str>::missing(children[0])));
    }

    #[test]
    fn test_max_depth() {
        let config = TreeConfig::default().with_max_depth(1);
        let mut tree = SpatialTree::<u32>::with_config(Domain::unit(2), config);
        let root = tree.root();
        let children = tree.split_even(root, 2).unwrap();
        assert!(matches!(
            tree.split_even(children[0], 2),
            Err(GeometryError::InvalidArgument(_))
        ));
        assert!(tree.split_even(root, 0).is_err());
    }

    #[test]
    fn test_traverse_finds_containing_leaf() {
        let mut tree = unit_square_tree();
        let root = tree.root();
        let children = tree.split(root, &[vec![0.5], vec![0.5]]).unwrap();

        let point = Vector::vector2(0.25, 0.25);
        let hits: Vec<NodeId> = tree.traverse(root, &point).unwrap().collect();
        assert_eq!(hits, vec![children[0]]);

        let grandchildren = tree.split_even(children[3], 2).unwrap();
        let point = Vector::vector2(0.9, 0.9);
        let hits: Vec<NodeId> = tree.traverse(root, &point).unwrap().collect();
        assert_eq!(hits, vec![grandchildren[3]]);

        let outside = Vector::vector2(2.0, 0.5);
        assert_eq!(tree.traverse(root, &outside).unwrap().count(), 0);
        assert!(tree.traverse(root, &Vector::zeros(3)).is_err());
    }

    #[test]
    fn test_traverse_shared_boundary_is_inclusive() {
        let mut tree = unit_square_tree();
        let root = tree.root();
        let children = tree.split_even(root, 2).unwrap();
        let center = Vector::vector2(0.5, 0.5);
        let hits: Vec<NodeId> = tree.traverse(root, &center).unwrap().collect();
        assert_eq!(hits, children);
    }

    #[test]
    fn test_ancestors_and_indices() {
        let mut tree = unit_square_tree();
        let root = tree.root();
        let level1 = tree.split_even(root, 2).unwrap();
        let level2 = tree.split_even(level1[2], 3).unwrap();
        let target = level2[5];

        assert_eq!(tree.ancestors(target).unwrap(), vec![root, level1[2]]);
        assert_eq!(tree.indices(target).unwrap(), vec![2, 5]);
        assert_eq!(tree.node_at(&[2, 5]).unwrap(), target);
        assert_eq!(tree.level(target).unwrap(), 2);

        assert!(tree.ancestors(root).unwrap().is_empty());
        assert!(tree.indices(root).unwrap().is_empty());
        assert_eq!(tree.node_at(&[]).unwrap(), root);
        assert_eq!(
            tree.node_at(&[4]),
            Err(GeometryError::IndexOutOfBounds { index: 4, len: 4 })
        );
    }

    #[test]
    fn test_values() {
        let mut tree = unit_square_tree();
        let root = tree.root();
        let children = tree.split_even(root, 2).unwrap();

        assert_eq!(tree.set_value(children[1], "east").unwrap(), None);
        assert_eq!(tree.set_value(children[1], "right").unwrap(), Some("east"));
        if let Some(value) = tree.value_mut(children[1]).unwrap() {
            *value = "changed";
        }
        assert_eq!(tree.value(children[1]).unwrap(), Some(&"changed"));
        assert_eq!(tree.take_value(children[1]).unwrap(), Some("changed"));
        assert_eq!(tree.value(children[1]).unwrap(), None);
    }

    #[test]
    fn test_iteration_helpers() {
        let mut tree = unit_square_tree();
        let root = tree.root();
        let level1 = tree.split_even(root, 2).unwrap();
        let level2 = tree.split_even(level1[0], 2).unwrap();

        let order: Vec<NodeId> = tree.iter().map(|(id, _)| id).collect();
        assert_eq!(order.len(), 9);
        assert_eq!(order[0], root);
        assert_eq!(&order[1..5], level1.as_slice());

        let leaves = tree.leaves();
        assert_eq!(leaves.len(), 7);
        assert!(!leaves.contains(&level1[0]));

        assert_eq!(tree.nodes_at_level(0), vec![root]);
        assert_eq!(tree.nodes_at_level(2), level2);
        assert!(tree.nodes_at_level(3).is_empty());
    }
}
