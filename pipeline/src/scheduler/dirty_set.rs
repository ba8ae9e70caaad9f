//! Depth-ordered, identity-unique set of dirty nodes.

use std::collections::{BTreeSet, HashMap, btree_set};

use crate::tree::NodeId;

/// Handle to a node waiting for work, with the depth it had when queued.
///
/// Ordered by depth first, node identity second. The field order matters for
/// the derived ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DirtyNode {
    /// Nesting level captured at insertion.
    pub depth: u32,
    /// Queued node.
    pub id: NodeId,
}

impl DirtyNode {
    /// Creates a new entry.
    #[must_use]
    pub const fn new(depth: u32, id: NodeId) -> Self {
        Self { depth, id }
    }
}

/// Dirty nodes of a single page.
///
/// A node is stored at most once even if its depth changed between two
/// inserts; the first insert wins.
#[derive(Debug, Default, Clone)]
pub struct DirtyNodeSet {
    ordered: BTreeSet<DirtyNode>,
    members: HashMap<NodeId, u32>,
}

impl DirtyNodeSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node`. Returns false if its id was already present.
    pub fn insert(&mut self, node: DirtyNode) -> bool {
        if self.members.contains_key(&node.id) {
            return false;
        }
        self.members.insert(node.id, node.depth);
        self.ordered.insert(node)
    }

    /// Removes the node with `id`. Returns false if it was not present.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(depth) = self.members.remove(&id) else {
            return false;
        };
        self.ordered.remove(&DirtyNode::new(depth, id))
    }

    /// Returns true if `id` is queued.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.members.contains_key(&id)
    }

    /// Number of queued nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Iterates in ascending depth order.
    pub fn iter(&self) -> btree_set::Iter<'_, DirtyNode> {
        self.ordered.iter()
    }
}

impl IntoIterator for DirtyNodeSet {
    type Item = DirtyNode;
    type IntoIter = btree_set::IntoIter<DirtyNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.into_iter()
    }
}

impl<'a> IntoIterator for &'a DirtyNodeSet {
    type Item = &'a DirtyNode;
    type IntoIter = btree_set::Iter<'a, DirtyNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter()
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn ids(count: usize) -> Vec<NodeId> {
        let mut map = SlotMap::<NodeId, ()>::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn orders_by_depth_then_identity() {
        let ids = ids(3);
        let mut set = DirtyNodeSet::new();
        set.insert(DirtyNode::new(2, ids[0]));
        set.insert(DirtyNode::new(0, ids[2]));
        set.insert(DirtyNode::new(2, ids[1]));

        let order: Vec<_> = set.iter().map(|node| node.id).collect();
        assert_eq!(order, vec![ids[2], ids[0], ids[1]]);
    }

    #[test]
    fn identity_is_unique_across_depths() {
        let ids = ids(1);
        let mut set = DirtyNodeSet::new();
        assert!(set.insert(DirtyNode::new(3, ids[0])));
        assert!(!set.insert(DirtyNode::new(3, ids[0])));
        assert!(!set.insert(DirtyNode::new(1, ids[0])));
        assert_eq!(set.len(), 1);

        assert!(set.remove(ids[0]));
        assert!(!set.contains(ids[0]));
        assert!(set.is_empty());
        assert!(!set.remove(ids[0]));
    }

    #[test]
    fn comparator_is_irreflexive() {
        let ids = ids(1);
        let node = DirtyNode::new(4, ids[0]);
        let same = node;
        assert_eq!(node.cmp(&same), core::cmp::Ordering::Equal);
    }
}
