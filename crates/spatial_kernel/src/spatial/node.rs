//! Tree node storage

use crate::geometry::Domain;

slotmap::new_key_type! {
    /// Handle to a node of a [`SpatialTree`](super::SpatialTree)
    ///
    /// Handles stay valid until the node's subtree is cleared or re-split.
    pub struct NodeId;
}

/// Single node of a spatial tree
///
/// A node is either a leaf (no children) or internal, with the children
/// produced by one split. Any node may carry an optional payload.
#[derive(Debug, Clone)]
pub struct SpatialTreeNode<T> {
    pub(crate) domain: Domain,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) value: Option<T>,
}

impl<T> SpatialTreeNode<T> {
    pub(crate) const fn new(domain: Domain, parent: Option<NodeId>) -> Self {
        Self { domain, parent, children: Vec::new(), value: None }
    }

    /// Region covered by this node
    pub const fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Parent handle, `None` for the root
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in split order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// True when the node has not been split
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Payload
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Mutable payload
    pub fn value_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Store a payload, returning the previous one
    pub fn set_value(&mut self, value: T) -> Option<T> {
        self.value.replace(value)
    }

    /// Remove and return the payload
    pub fn take_value(&mut self) -> Option<T> {
        self.value.take()
    }
}
